//! BMP decoder: file header, BITMAPINFOHEADER and raw pixel rows.
//!
//! Only the fixed 54-byte header prefix is interpreted. Whatever sits
//! between it and `bfOffBits` is kept as opaque bytes so that encoding
//! reproduces the file.

use enough::Stop;
use log::{debug, warn};

use crate::bitmap::{BASE_HEADER_LEN, Bitmap, FileHeader, InfoHeader};
use crate::error::{BitmapError, try_zeroed};
use crate::layout::row_stride;
use crate::limits::Limits;
use crate::pixel::PixelFormat;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let end = self.pos.checked_add(N).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }

    /// Borrow `len` bytes starting at absolute offset `start`.
    fn slice_at(&self, start: usize, len: usize) -> Result<&'a [u8], BitmapError> {
        let end = start.checked_add(len).ok_or(BitmapError::UnexpectedEof)?;
        self.data.get(start..end).ok_or(BitmapError::UnexpectedEof)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parse the file header and info header from the front of `data`.
pub(crate) fn parse_headers(data: &[u8]) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let mut cursor = Cursor::new(data);

    if cursor.read_fixed_bytes::<2>()? != FileHeader::SIGNATURE {
        return Err(BitmapError::NotBmp);
    }

    let file_header = FileHeader {
        file_size: cursor.get_u32_le()?,
        reserved: cursor.read_fixed_bytes()?,
        pixel_offset: cursor.get_u32_le()?,
    };

    let info_header = InfoHeader {
        header_size: cursor.get_u32_le()?,
        width: cursor.get_i32_le()?,
        height: cursor.get_i32_le()?,
        planes: cursor.get_u16_le()?,
        bit_count: cursor.get_u16_le()?,
        compression: cursor.get_u32_le()?,
        image_size: cursor.get_u32_le()?,
        x_pels_per_meter: cursor.get_i32_le()?,
        y_pels_per_meter: cursor.get_i32_le()?,
        colors_used: cursor.get_u32_le()?,
        colors_important: cursor.get_u32_le()?,
    };

    if (file_header.pixel_offset as usize) < BASE_HEADER_LEN {
        return Err(BitmapError::InvalidHeader(format!(
            "pixel data offset {} overlaps the {BASE_HEADER_LEN}-byte header",
            file_header.pixel_offset
        )));
    }
    if info_header.planes != 1 {
        warn!("BMP declares {} color planes, expected 1", info_header.planes);
    }

    Ok((file_header, info_header))
}

/// Size of the pixel buffer to read.
///
/// `biSizeImage` may legally be zero for uncompressed images; the size is
/// then derived from the geometry for the supported depths.
fn pixel_data_len(info: &InfoHeader) -> Result<usize, BitmapError> {
    if info.image_size != 0 {
        return Ok(info.image_size as usize);
    }
    let Some(format) = PixelFormat::from_bit_count(info.bit_count) else {
        return Ok(0);
    };
    if info.compression != 0 || info.width < 0 {
        return Ok(0);
    }
    let width = info.width as usize;
    let height = info.height.unsigned_abs() as usize;
    let too_large = || BitmapError::DimensionsTooLarge {
        width: width as u64,
        height: height as u64,
    };
    let len = row_stride(width, format.bytes_per_pixel())
        .and_then(|stride| stride.checked_mul(height))
        .ok_or_else(too_large)?;
    warn!("BMP has biSizeImage = 0, derived {len} bytes from the geometry");
    Ok(len)
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a complete BMP from `data`.
pub(crate) fn decode_bitmap(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    let (file_header, mut info_header) = parse_headers(data)?;

    let len = pixel_data_len(&info_header)?;
    if let Some(limits) = limits {
        limits.check(
            info_header.width.unsigned_abs(),
            info_header.height.unsigned_abs(),
        )?;
        limits.check_memory(len)?;
    }
    if info_header.image_size == 0 {
        info_header.image_size = u32::try_from(len).map_err(|_| {
            BitmapError::DimensionsTooLarge {
                width: u64::from(info_header.width.unsigned_abs()),
                height: u64::from(info_header.height.unsigned_abs()),
            }
        })?;
    }

    let cursor = Cursor::new(data);
    let offset = file_header.pixel_offset as usize;
    let header_extra = cursor
        .slice_at(BASE_HEADER_LEN, offset - BASE_HEADER_LEN)?
        .to_vec();
    let source = cursor.slice_at(offset, len)?;

    stop.check()?;
    let mut pixels = try_zeroed(len)?;
    pixels.copy_from_slice(source);

    debug!(
        "decoded BMP {}x{} at {} bpp, compression {}, {} pixel bytes at offset {}",
        info_header.width,
        info_header.height,
        info_header.bit_count,
        info_header.compression,
        len,
        offset
    );

    Ok(Bitmap::from_parts(
        file_header,
        info_header,
        header_extra,
        pixels,
    ))
}
