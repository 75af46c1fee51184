use eframe::egui::{self, Color32, Context, Key, Modifiers, RichText, Sense};
use rfd::FileDialog;

use crate::header;
use crate::icon::Icon;
use crate::image_io;

/// Width of the gridline between cells, in points.
const GRID_LINE: f32 = 1.0;

pub struct EditorApp {
    pub icon: Icon,
    // UI state
    pub cell_size: f32,
    pub status: String,
    pub dirty: bool,
    // true while a paint/erase stroke is in progress
    pub drawing: bool,
    pub show_exit_confirm: bool,
    // undo/redo: whole-grid snapshots, one per stroke or action
    pub undo_stack: Vec<Icon>,
    pub redo_stack: Vec<Icon>,
    pub max_undo_steps: usize,
}

impl EditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self {
            icon: Icon::new(),
            cell_size: 12.0,
            status: "Left click paints, right click erases.".to_owned(),
            dirty: false,
            drawing: false,
            show_exit_confirm: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_steps: 100,
        }
    }

    fn push_undo(&mut self, snapshot: Icon) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.max_undo_steps {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    fn undo(&mut self) {
        if let Some(prev) = self.undo_stack.pop() {
            let cur = std::mem::replace(&mut self.icon, prev);
            self.redo_stack.push(cur);
            self.dirty = true;
            self.status = "Undone.".to_owned();
        }
    }

    fn redo(&mut self) {
        if let Some(next) = self.redo_stack.pop() {
            let cur = std::mem::replace(&mut self.icon, next);
            self.undo_stack.push(cur);
            self.dirty = true;
            self.status = "Redone.".to_owned();
        }
    }

    pub fn ui_menu(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Open .h file...").clicked() {
                ui.close_menu();
                self.action_open_header();
            }
            if ui.button("Save as .h file...").clicked() {
                ui.close_menu();
                self.action_save_header();
            }
            ui.separator();
            if ui.button("Import image (PNG/JPG)...").clicked() {
                ui.close_menu();
                self.action_import_image();
            }
            if ui.button("Export as PNG...").clicked() {
                ui.close_menu();
                self.action_export_png();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.close_menu();
                self.request_quit(ctx);
            }
        });

        ui.menu_button("Edit", |ui| {
            if ui
                .add_enabled(!self.undo_stack.is_empty(), egui::Button::new("Undo (Ctrl+Z)"))
                .clicked()
            {
                ui.close_menu();
                self.undo();
            }
            if ui
                .add_enabled(!self.redo_stack.is_empty(), egui::Button::new("Redo (Ctrl+Y)"))
                .clicked()
            {
                ui.close_menu();
                self.redo();
            }
            ui.separator();
            if ui.button("Copy C array").clicked() {
                ui.close_menu();
                self.action_copy_array(ctx);
            }
            if ui.button("Clear canvas").clicked() {
                ui.close_menu();
                self.action_clear();
            }
        });

        ui.separator();
        ui.label(RichText::new(&self.status).color(Color32::LIGHT_GRAY));
    }

    fn action_copy_array(&mut self, ctx: &Context) {
        let text = header::format_c_array(&self.icon.encode());
        ctx.output_mut(|o| o.copied_text = text);
        self.status = "C array copied to the clipboard.".to_owned();
    }

    fn action_save_header(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Header files", &["h"])
            .set_file_name("icon.h")
            .save_file()
        {
            let text = header::format_c_array(&self.icon.encode());
            match std::fs::write(&path, text) {
                Ok(()) => {
                    self.status = format!("Saved: {}", path.display());
                    self.dirty = false;
                }
                Err(e) => {
                    log::error!("writing {} failed: {}", path.display(), e);
                    self.status = format!("Save failed: {}", e);
                }
            }
        }
    }

    fn action_open_header(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Header files", &["h"])
            .pick_file()
        {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|text| header::parse_c_array(&text))
                .and_then(|bytes| Icon::decode(&bytes));
            match loaded {
                Ok(icon) => {
                    self.icon = icon;
                    self.status = format!("Loaded: {}", path.display());
                    self.dirty = false;
                    self.drawing = false;
                    self.undo_stack.clear();
                    self.redo_stack.clear();
                }
                Err(e) => {
                    log::error!("loading {} failed: {}", path.display(), e);
                    self.status = format!("Open failed: {}", e);
                }
            }
        }
    }

    fn action_import_image(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file()
        {
            match image_io::load_icon(&path) {
                Ok(icon) => {
                    let snapshot = std::mem::replace(&mut self.icon, icon);
                    self.push_undo(snapshot);
                    self.status = format!("Imported: {}", path.display());
                    self.dirty = true;
                }
                Err(e) => {
                    log::error!("importing {} failed: {}", path.display(), e);
                    self.status = format!("Import failed: {}", e);
                }
            }
        }
    }

    fn action_export_png(&mut self) {
        if let Some(path) = FileDialog::new().set_file_name("icon.png").save_file() {
            match image_io::export_png(&self.icon, &path) {
                Ok(()) => self.status = format!("Exported: {}", path.display()),
                Err(e) => {
                    log::error!("exporting {} failed: {}", path.display(), e);
                    self.status = format!("Export failed: {}", e);
                }
            }
        }
    }

    fn action_clear(&mut self) {
        let snapshot = self.icon.clone();
        self.push_undo(snapshot);
        self.icon.clear();
        self.dirty = true;
        self.status = "Canvas cleared.".to_owned();
    }

    fn request_quit(&mut self, ctx: &Context) {
        if self.dirty {
            self.show_exit_confirm = true;
        } else {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn ui_canvas(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(
            Icon::WIDTH as f32 * self.cell_size,
            Icon::HEIGHT as f32 * self.cell_size,
        );
        let (rect, _response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        // gridline background, cells inset on top of it
        ui.painter().rect_filled(rect, 0.0, Color32::from_gray(110));
        for (y, row) in self.icon.pixels.iter().enumerate() {
            for (x, &lit) in row.iter().enumerate() {
                let min = rect.min
                    + egui::vec2(x as f32 * self.cell_size, y as f32 * self.cell_size);
                let cell = egui::Rect::from_min_size(
                    min + egui::vec2(GRID_LINE, GRID_LINE),
                    egui::vec2(self.cell_size - GRID_LINE, self.cell_size - GRID_LINE),
                );
                let color = if lit { Color32::BLACK } else { Color32::WHITE };
                ui.painter().rect_filled(cell, 0.0, color);
            }
        }

        // Process the pointer whenever it is over the canvas, so fast drags
        // keep painting.
        let primary = ui.input(|i| i.pointer.primary_down());
        let secondary = ui.input(|i| i.pointer.secondary_down());
        let pointer_pos = ui.input(|i| i.pointer.interact_pos());
        if let Some(pos) = pointer_pos {
            if rect.contains(pos) && (primary || secondary) {
                if !self.drawing {
                    // one undo entry per stroke
                    let snapshot = self.icon.clone();
                    self.push_undo(snapshot);
                    self.drawing = true;
                }
                let local = (pos - rect.min) / self.cell_size;
                let x = local.x.floor() as i32;
                let y = local.y.floor() as i32;
                let changed = if primary {
                    self.icon.paint(x, y)
                } else {
                    self.icon.erase(x, y)
                };
                if changed {
                    self.dirty = true;
                }
            }
        }
        if !primary && !secondary {
            self.drawing = false;
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                self.ui_menu(ui, ctx);
            });
        });

        egui::SidePanel::left("left")
            .resizable(false)
            .default_width(190.0)
            .show(ctx, |ui| {
                ui.heading("Actions");
                if ui.button("Copy C array").clicked() {
                    self.action_copy_array(ctx);
                }
                if ui.button("Save as .h file...").clicked() {
                    self.action_save_header();
                }
                if ui.button("Clear canvas").clicked() {
                    self.action_clear();
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.undo_stack.is_empty(), egui::Button::new("Undo"))
                        .clicked()
                    {
                        self.undo();
                    }
                    if ui
                        .add_enabled(!self.redo_stack.is_empty(), egui::Button::new("Redo"))
                        .clicked()
                    {
                        self.redo();
                    }
                });
                ui.separator();
                ui.label("Zoom");
                ui.add(egui::Slider::new(&mut self.cell_size, 6.0..=20.0).text("px"));
                ui.separator();
                let lit = self
                    .icon
                    .pixels
                    .iter()
                    .flatten()
                    .filter(|&&p| p)
                    .count();
                ui.label(format!(
                    "{}x{} - {} lit",
                    Icon::WIDTH,
                    Icon::HEIGHT,
                    lit
                ));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_canvas(ui);
        });

        // shortcuts
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::O)) {
            self.action_open_header();
        }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::S)) {
            self.action_save_header();
        }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::Z)) {
            self.undo();
        }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::Y)) {
            self.redo();
        }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::Q)) {
            self.request_quit(ctx);
        }

        // intercept window close while there are unsaved changes
        let close_requested = ctx.input(|i| i.viewport().close_requested());
        if close_requested && self.dirty {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_exit_confirm = true;
        }
        if self.show_exit_confirm {
            egui::Window::new("Unsaved changes")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("The icon has unsaved changes.");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Save and quit").clicked() {
                            self.action_save_header();
                            if !self.dirty {
                                self.show_exit_confirm = false;
                                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                            }
                        }
                        if ui.button("Quit without saving").clicked() {
                            self.show_exit_confirm = false;
                            self.dirty = false;
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                        if ui.button("Cancel").clicked() {
                            self.show_exit_confirm = false;
                        }
                    });
                });
        }
    }
}
