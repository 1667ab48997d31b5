//! Nearest-neighbor scaling: by factor (`scale`) and to an exact size
//! (`resize`).

use enough::Stop;
use log::debug;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// Scale a 24-bit image by `factor` using nearest-neighbor sampling.
///
/// The new size is `floor(width * factor) x floor(|height| * factor)` and the
/// row order is preserved. 32-bit images are rejected; use [`resize`] for
/// those, which copies all four channel bytes.
pub fn scale(src: &Bitmap, factor: f64, stop: impl Stop) -> Result<Bitmap, BitmapError> {
    scale_impl(src, factor, &stop)
}

fn scale_impl(src: &Bitmap, factor: f64, stop: &dyn Stop) -> Result<Bitmap, BitmapError> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(BitmapError::InvalidArgument(format!(
            "scale factor must be > 0, got {factor}"
        )));
    }
    if src.info_header.bit_count != 24 {
        return Err(src.unsupported("scale"));
    }
    let layout = src.layout("scale")?;
    let (old_w, old_h) = (layout.width(), layout.height());

    // `as` saturates, so oversized results fall through to the dimension check
    let new_w = (old_w as f64 * factor) as usize;
    let new_h = (old_h as f64 * factor) as usize;
    if new_w == 0 || new_h == 0 {
        return Err(BitmapError::InvalidArgument(format!(
            "scaling {old_w}x{old_h} by {factor} leaves no pixels"
        )));
    }

    let (mut dst, dst_layout) = src.with_dimensions(&layout, new_w, new_h)?;
    let bpp = layout.bytes_per_pixel();

    for y in 0..new_h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src_y = ((y as f64 / factor) as usize).min(old_h - 1);
        for x in 0..new_w {
            let src_x = ((x as f64 / factor) as usize).min(old_w - 1);
            if let (Some(s), Some(d)) = (layout.offset(src_x, src_y), dst_layout.offset(x, y)) {
                dst.pixels[d..d + bpp].copy_from_slice(&src.pixels[s..s + bpp]);
            }
        }
    }

    debug!("scaled {old_w}x{old_h} by {factor} to {new_w}x{new_h}");
    Ok(dst)
}

/// Resize a 24-bit or 32-bit image to `new_width x new_height` using
/// nearest-neighbor sampling. The row order is preserved.
pub fn resize(
    src: &Bitmap,
    new_width: u32,
    new_height: u32,
    stop: impl Stop,
) -> Result<Bitmap, BitmapError> {
    resize_impl(src, new_width as usize, new_height as usize, &stop)
}

fn resize_impl(
    src: &Bitmap,
    new_w: usize,
    new_h: usize,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    if new_w == 0 || new_h == 0 {
        return Err(BitmapError::InvalidArgument(format!(
            "target size {new_w}x{new_h} is empty"
        )));
    }
    let layout = src.layout("resize")?;
    if layout.is_empty() {
        return Err(BitmapError::InvalidArgument(
            "cannot resize an image with no pixels".into(),
        ));
    }
    let (src_w, src_h) = (layout.width(), layout.height());

    let (mut dst, dst_layout) = src.with_dimensions(&layout, new_w, new_h)?;
    let bpp = layout.bytes_per_pixel();

    for y in 0..new_h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src_y = (y as u64 * src_h as u64 / new_h as u64) as usize;
        for x in 0..new_w {
            let src_x = (x as u64 * src_w as u64 / new_w as u64) as usize;
            if let (Some(s), Some(d)) = (layout.offset(src_x, src_y), dst_layout.offset(x, y)) {
                dst.pixels[d..d + bpp].copy_from_slice(&src.pixels[s..s + bpp]);
            }
        }
    }

    debug!("resized {src_w}x{src_h} to {new_w}x{new_h}");
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowOrder;
    use crate::pixel::PixelFormat;
    use enough::Unstoppable;

    #[test]
    fn scale_rejects_bad_factors() {
        let img = Bitmap::new(4, 4, PixelFormat::Bgr24, RowOrder::BottomUp).unwrap();
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    scale(&img, factor, Unstoppable),
                    Err(BitmapError::InvalidArgument(_))
                ),
                "factor {factor}"
            );
        }
        assert!(matches!(
            scale(&img, 0.1, Unstoppable),
            Err(BitmapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn scale_rejects_32_bit() {
        let img = Bitmap::new(4, 4, PixelFormat::Bgra32, RowOrder::BottomUp).unwrap();
        assert!(matches!(
            scale(&img, 2.0, Unstoppable),
            Err(BitmapError::UnsupportedFormat { operation: "scale", .. })
        ));
    }

    #[test]
    fn scale_truncates_dimensions() {
        let img = Bitmap::new(5, 3, PixelFormat::Bgr24, RowOrder::TopDown).unwrap();
        let out = scale(&img, 1.5, Unstoppable).unwrap();
        assert_eq!(out.width(), 7);
        assert_eq!(out.height(), -4);
        assert_eq!(out.info_header.image_size, 24 * 4);
        assert_eq!(
            out.file_header.file_size,
            out.file_header.pixel_offset + out.info_header.image_size
        );
    }

    #[test]
    fn resize_rejects_empty_target() {
        let img = Bitmap::new(4, 4, PixelFormat::Bgr24, RowOrder::BottomUp).unwrap();
        assert!(matches!(
            resize(&img, 0, 4, Unstoppable),
            Err(BitmapError::InvalidArgument(_))
        ));
    }
}
