use log::debug;

use crate::bitmap::Bitmap;

/// Fill every pixel of a 24-bit image with `color`, given as `[R, G, B]`.
///
/// Row padding is left untouched. Images that are not 24-bit, or whose
/// buffer does not match their header, are left unchanged; the return value
/// tells whether anything was written.
pub fn fill(image: &mut Bitmap, color: [u8; 3]) -> bool {
    if image.info_header.bit_count != 24 {
        debug!(
            "fill skipped: {} bpp image, only 24-bit is filled",
            image.info_header.bit_count
        );
        return false;
    }
    let Ok(layout) = image.layout("fill") else {
        return false;
    };

    // BMP stores pixels as BGR
    let [r, g, b] = color;
    let bgr = [b, g, r];
    for y in 0..layout.height() {
        let Some(start) = layout.row_start(y) else {
            continue;
        };
        let row = &mut image.pixels[start..start + layout.row_bytes()];
        for px in row.chunks_exact_mut(3) {
            px.copy_from_slice(&bgr);
        }
    }
    true
}

/// Fill every pixel of a 24-bit image with a typed RGB color.
#[cfg(feature = "rgb")]
pub fn fill_rgb(image: &mut Bitmap, color: rgb::RGB8) -> bool {
    fill(image, [color.r, color.g, color.b])
}
