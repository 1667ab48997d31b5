use enough::Stop;
use log::debug;

use crate::bitmap::Bitmap;
use crate::error::{BitmapError, try_zeroed};

/// Rotate a 24-bit uncompressed image by `angle_degrees` about its center.
///
/// Nearest-neighbor inverse mapping onto a canvas of the same size:
/// corners that rotate out of the frame are clipped, and destination pixels
/// whose source falls outside the frame stay black.
pub fn rotate(src: &Bitmap, angle_degrees: f64, stop: impl Stop) -> Result<Bitmap, BitmapError> {
    rotate_impl(src, angle_degrees, &stop)
}

fn rotate_impl(src: &Bitmap, angle_degrees: f64, stop: &dyn Stop) -> Result<Bitmap, BitmapError> {
    if src.info_header.bit_count != 24 || src.info_header.compression != 0 {
        return Err(src.unsupported("rotate"));
    }
    if !angle_degrees.is_finite() {
        return Err(BitmapError::InvalidArgument(format!(
            "rotation angle {angle_degrees} is not finite"
        )));
    }
    let layout = src.layout("rotate")?;
    let (width, height) = (layout.width(), layout.height());
    let bpp = layout.bytes_per_pixel();

    // Same dimensions, so headers carry over untouched.
    let mut dst = Bitmap::from_parts(
        src.file_header.clone(),
        src.info_header.clone(),
        src.header_extra.clone(),
        try_zeroed(src.pixels.len())?,
    );

    let (sin, cos) = (angle_degrees * std::f64::consts::PI / 180.0).sin_cos();
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let (w, h) = (width as f64, height as f64);

    for y in 0..height {
        if y % 16 == 0 {
            stop.check()?;
        }
        let dy = y as f64 - cy;
        for x in 0..width {
            let dx = x as f64 - cx;
            let src_x = (cos * dx + sin * dy + cx).round();
            let src_y = (-sin * dx + cos * dy + cy).round();
            if src_x < 0.0 || src_y < 0.0 || src_x >= w || src_y >= h {
                continue;
            }
            if let (Some(s), Some(d)) = (
                layout.offset(src_x as usize, src_y as usize),
                layout.offset(x, y),
            ) {
                dst.pixels[d..d + bpp].copy_from_slice(&src.pixels[s..s + bpp]);
            }
        }
    }

    debug!("rotated {width}x{height} image by {angle_degrees} degrees");
    Ok(dst)
}
