//! BMP encoder: headers and pixel buffer written back verbatim.

use enough::Stop;
use log::debug;

use crate::bitmap::{BASE_HEADER_LEN, Bitmap, FileHeader};
use crate::error::BitmapError;

/// Serialize the file header and info header (54 bytes).
pub(crate) fn header_bytes(image: &Bitmap) -> [u8; BASE_HEADER_LEN] {
    let fh = &image.file_header;
    let ih = &image.info_header;
    let mut out = [0u8; BASE_HEADER_LEN];
    let mut pos = 0;
    let mut put = |bytes: &[u8]| {
        out[pos..pos + bytes.len()].copy_from_slice(bytes);
        pos += bytes.len();
    };

    // File header (14 bytes)
    put(&FileHeader::SIGNATURE);
    put(&fh.file_size.to_le_bytes());
    put(&fh.reserved);
    put(&fh.pixel_offset.to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    put(&ih.header_size.to_le_bytes());
    put(&ih.width.to_le_bytes());
    put(&ih.height.to_le_bytes()); // positive = bottom-up
    put(&ih.planes.to_le_bytes());
    put(&ih.bit_count.to_le_bytes());
    put(&ih.compression.to_le_bytes());
    put(&ih.image_size.to_le_bytes());
    put(&ih.x_pels_per_meter.to_le_bytes());
    put(&ih.y_pels_per_meter.to_le_bytes());
    put(&ih.colors_used.to_le_bytes());
    put(&ih.colors_important.to_le_bytes());

    out
}

/// Encode a bitmap to BMP bytes.
pub(crate) fn encode_bitmap(image: &Bitmap, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let total = BASE_HEADER_LEN + image.header_extra.len() + image.pixels.len();
    let mut out = Vec::new();
    out.try_reserve_exact(total)
        .map_err(|_| BitmapError::AllocationFailure(total))?;

    stop.check()?;
    out.extend_from_slice(&header_bytes(image));
    out.extend_from_slice(&image.header_extra);
    out.extend_from_slice(&image.pixels);

    debug!(
        "encoded BMP {}x{} at {} bpp, {} bytes",
        image.info_header.width,
        image.info_header.height,
        image.info_header.bit_count,
        out.len()
    );
    Ok(out)
}

/// Write a bitmap to `writer` without building an intermediate buffer.
pub(crate) fn write_bitmap<W: std::io::Write>(
    image: &Bitmap,
    mut writer: W,
) -> Result<(), BitmapError> {
    writer.write_all(&header_bytes(image))?;
    writer.write_all(&image.header_extra)?;
    writer.write_all(&image.pixels)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowOrder;
    use crate::pixel::PixelFormat;
    use enough::Unstoppable;

    #[test]
    fn header_layout_matches_bitmapinfoheader() {
        let img = Bitmap::new(3, 2, PixelFormat::Bgr24, RowOrder::TopDown).unwrap();
        let h = header_bytes(&img);
        assert_eq!(&h[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(h[2..6].try_into().unwrap()), 54 + 24);
        assert_eq!(u32::from_le_bytes(h[10..14].try_into().unwrap()), 54);
        assert_eq!(u32::from_le_bytes(h[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(h[18..22].try_into().unwrap()), 3);
        assert_eq!(i32::from_le_bytes(h[22..26].try_into().unwrap()), -2);
        assert_eq!(u16::from_le_bytes(h[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(h[28..30].try_into().unwrap()), 24);
        assert_eq!(u32::from_le_bytes(h[34..38].try_into().unwrap()), 24);
        assert_eq!(i32::from_le_bytes(h[38..42].try_into().unwrap()), 2835);
    }

    #[test]
    fn encode_and_write_agree() {
        let mut img = Bitmap::new(2, 2, PixelFormat::Bgra32, RowOrder::BottomUp).unwrap();
        img.pixels_mut()[5] = 0x42;
        let encoded = encode_bitmap(&img, &Unstoppable).unwrap();
        let mut written = Vec::new();
        write_bitmap(&img, &mut written).unwrap();
        assert_eq!(encoded, written);
        assert_eq!(encoded.len(), 54 + 16);
        assert_eq!(encoded[54 + 5], 0x42);
    }
}
