//! PNG snapshot of a painted canvas.

use crate::scene::{AppError, AppResult};
use ricochet_core::{PaintSurface, PixelCanvas};
use std::fs;
use std::path::Path;

/// Encode the canvas as an RGBA8 PNG.
pub fn encode_png(canvas: &PixelCanvas) -> AppResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::Png(format!("Failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(&canvas.as_rgba8_bytes())
            .map_err(|e| AppError::Png(format!("Failed to write PNG data: {}", e)))?;
    }
    Ok(png_data)
}

/// Encode the canvas and write it to `path`.
pub fn write_png(canvas: &PixelCanvas, path: &Path) -> AppResult<()> {
    let png_data = encode_png(canvas)?;
    fs::write(path, &png_data)
        .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("PNG export complete: {} ({} bytes)", path.display(), png_data.len());
    Ok(())
}
