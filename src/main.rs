#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use eframe::egui;
use eframe::NativeOptions;

mod app;
mod header;
mod icon;
mod image_io;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 440.0]),
        ..Default::default()
    };
    eframe::run_native(
        "VMU LCD Icon Editor",
        native_options,
        Box::new(|cc| Box::new(app::EditorApp::new(cc))),
    )
}
