use enough::Stop;
use log::debug;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// Copy the `width x height` rectangle whose top-left corner is at logical
/// `(x, y)` into a new image. The row order is preserved.
///
/// The rectangle must lie fully inside the image; this is checked before
/// anything is allocated.
pub fn crop(
    src: &Bitmap,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Bitmap, BitmapError> {
    crop_impl(src, x, y, width, height, &stop)
}

fn crop_impl(
    src: &Bitmap,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    let layout = src.layout("crop")?;
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidArgument(format!(
            "crop size {width}x{height} is empty"
        )));
    }

    let fits = |start: u32, len: u32, limit: usize| {
        start
            .checked_add(len)
            .is_some_and(|end| end as usize <= limit)
    };
    if !fits(x, width, layout.width()) || !fits(y, height, layout.height()) {
        return Err(BitmapError::OutOfBounds {
            x,
            y,
            width,
            height,
            image_width: layout.width() as u32,
            image_height: layout.height() as u32,
        });
    }

    let (x, y) = (x as usize, y as usize);
    let (mut dst, dst_layout) = src.with_dimensions(&layout, width as usize, height as usize)?;
    let row_bytes = dst_layout.row_bytes();

    for row in 0..dst_layout.height() {
        if row % 16 == 0 {
            stop.check()?;
        }
        if let (Some(s), Some(d)) = (layout.offset(x, y + row), dst_layout.row_start(row)) {
            dst.pixels[d..d + row_bytes].copy_from_slice(&src.pixels[s..s + row_bytes]);
        }
    }

    debug!(
        "cropped {width}x{height} at ({x},{y}) from {}x{}",
        layout.width(),
        layout.height()
    );
    Ok(dst)
}
