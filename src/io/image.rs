use crate::error::AppError;
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

/// Unpacks a 0RGB buffer (row 0 at the top) into an RGB image.
pub fn buffer_to_image(buffer: &[u32], width: usize, height: usize) -> RgbImage {
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let color = buffer
            .get(y as usize * width + x as usize)
            .copied()
            .unwrap_or(0);
        Rgb([(color >> 16) as u8, (color >> 8) as u8, color as u8])
    })
}

/// Saves a u32 (0RGB) buffer to an image file; the format follows the extension.
pub fn save_buffer_to_image<P: AsRef<Path>>(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<(), AppError> {
    let path = path.as_ref();
    buffer_to_image(buffer, width, height)
        .save(path)
        .map_err(|source| AppError::Output {
            path: path.to_path_buf(),
            source,
        })
}
