use std::path::Path;

use crate::icon::Icon;

/// Loads a PNG/JPEG from disk and squeezes it onto the 48x32 grid:
/// nearest-neighbour resize, then a luminance threshold. Transparent and
/// light pixels stay unlit, dark pixels become lit.
pub fn load_icon(path: &Path) -> Result<Icon, String> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" => {}
        _ => return Err("unsupported image extension".into()),
    }
    let img = image::open(path).map_err(|e| e.to_string())?;
    let rgba = image::imageops::resize(
        &img.to_rgba8(),
        Icon::WIDTH as u32,
        Icon::HEIGHT as u32,
        image::imageops::Nearest,
    );

    let mut icon = Icon::new();
    for (x, y, px) in rgba.enumerate_pixels() {
        if px[3] < 8 {
            continue;
        }
        // Integer rec.601 luma; the LCD draws dark-on-light.
        let luma = (299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32) / 1000;
        if luma < 128 {
            icon.pixels[y as usize][x as usize] = true;
        }
    }
    Ok(icon)
}

/// Writes the grid as a 48x32 black/white PNG.
pub fn export_png(icon: &Icon, path: &Path) -> Result<(), String> {
    let mut img = image::RgbaImage::new(Icon::WIDTH as u32, Icon::HEIGHT as u32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = if icon.pixels[y as usize][x as usize] {
            image::Rgba([0, 0, 0, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        };
    }
    image::DynamicImage::ImageRgba8(img)
        .save(path)
        .map_err(|e| e.to_string())
}
