//! In-memory BMP image: headers plus an owned pixel buffer.

use crate::error::{BitmapError, try_zeroed};
use crate::layout::{Layout, RowOrder};
use crate::pixel::PixelFormat;

/// Size of the BITMAPFILEHEADER.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of the BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the pixel data when no extra header bytes are present.
pub const BASE_HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// BITMAPFILEHEADER fields. The `"BM"` signature is implied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// `bfSize`: total file size in bytes.
    pub file_size: u32,
    /// `bfReserved1` and `bfReserved2`, passed through untouched.
    pub reserved: [u8; 4],
    /// `bfOffBits`: offset of the pixel data from the start of the file.
    pub pixel_offset: u32,
}

impl FileHeader {
    pub const SIGNATURE: [u8; 2] = *b"BM";
}

/// BITMAPINFOHEADER fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up row order, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    /// `biSizeImage`: size of the pixel buffer in bytes.
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// A decoded BMP image.
///
/// Owns its pixel buffer exclusively. Transforms return a new `Bitmap`;
/// only [`crate::fill`] and [`crate::embed`] modify one in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    /// Bytes between the 54-byte base header and `pixel_offset`.
    pub(crate) header_extra: Vec<u8>,
    pub(crate) pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a zero-filled (black) uncompressed image with a
    /// BITMAPINFOHEADER and pixel data at offset 54.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        order: RowOrder,
    ) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let layout = Layout::new(
            width as usize,
            height as usize,
            format.bytes_per_pixel(),
            order,
        )?;
        let image_size = u32::try_from(layout.buffer_len()).map_err(|_| too_large())?;
        let file_size = image_size
            .checked_add(BASE_HEADER_LEN as u32)
            .ok_or_else(too_large)?;

        Ok(Self {
            file_header: FileHeader {
                file_size,
                reserved: [0; 4],
                pixel_offset: BASE_HEADER_LEN as u32,
            },
            info_header: InfoHeader {
                header_size: INFO_HEADER_LEN as u32,
                width: w,
                height: order.signed_height(h),
                planes: 1,
                bit_count: format.bit_count(),
                compression: 0,
                image_size,
                x_pels_per_meter: 2835, // 72 DPI
                y_pels_per_meter: 2835,
                colors_used: 0,
                colors_important: 0,
            },
            header_extra: Vec::new(),
            pixels: try_zeroed(layout.buffer_len())?,
        })
    }

    pub(crate) fn from_parts(
        file_header: FileHeader,
        info_header: InfoHeader,
        header_extra: Vec<u8>,
        pixels: Vec<u8>,
    ) -> Self {
        Self {
            file_header,
            info_header,
            header_extra,
            pixels,
        }
    }

    pub fn width(&self) -> i32 {
        self.info_header.width
    }

    /// Signed height as stored in the header.
    pub fn height(&self) -> i32 {
        self.info_header.height
    }

    pub fn bit_count(&self) -> u16 {
        self.info_header.bit_count
    }

    /// The supported pixel format, if `biBitCount` is 24 or 32.
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        PixelFormat::from_bit_count(self.info_header.bit_count)
    }

    pub fn row_order(&self) -> RowOrder {
        RowOrder::from_height(self.info_header.height)
    }

    /// Raw pixel buffer, rows in stored order including padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the raw pixel buffer. Its length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Header bytes that follow the 40-byte info header (extended header
    /// fields, color masks, gap bytes), preserved verbatim.
    pub fn header_extra(&self) -> &[u8] {
        &self.header_extra
    }

    /// Buffer offset of the pixel at logical `(x, y)`, with `y == 0` the top
    /// row. `None` when out of range, when the format is unsupported, or when
    /// the buffer is shorter than the header geometry requires.
    pub fn pixel_offset(&self, x: usize, y: usize) -> Option<usize> {
        let layout = self.layout("pixel_offset").ok()?;
        layout.offset(x, y)
    }

    /// The stored bytes (B, G, R[, A]) of the pixel at logical `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        let layout = self.layout("pixel").ok()?;
        let offset = layout.offset(x, y)?;
        self.pixels.get(offset..offset + layout.bytes_per_pixel())
    }

    /// The color of the pixel at logical `(x, y)`.
    #[cfg(feature = "rgb")]
    pub fn pixel_rgb(&self, x: usize, y: usize) -> Option<rgb::RGB8> {
        self.pixel(x, y).map(|p| rgb::RGB8::new(p[2], p[1], p[0]))
    }

    /// Geometry of this image for `operation`.
    ///
    /// Fails with `UnsupportedFormat` unless the image is 24 or 32-bit, and
    /// with `InvalidHeader` if the width is negative or the buffer is shorter
    /// than `stride * |height|`.
    pub fn layout(&self, operation: &'static str) -> Result<Layout, BitmapError> {
        let format = self
            .pixel_format()
            .ok_or_else(|| self.unsupported(operation))?;
        let width = usize::try_from(self.info_header.width).map_err(|_| {
            BitmapError::InvalidHeader(format!("negative width {}", self.info_header.width))
        })?;
        let height = self.info_header.height.unsigned_abs() as usize;
        let layout = Layout::new(width, height, format.bytes_per_pixel(), self.row_order())?;
        if self.pixels.len() < layout.buffer_len() {
            return Err(BitmapError::InvalidHeader(format!(
                "pixel buffer holds {} bytes, {}x{} at {} bpp needs {}",
                self.pixels.len(),
                width,
                height,
                self.info_header.bit_count,
                layout.buffer_len()
            )));
        }
        Ok(layout)
    }

    pub(crate) fn unsupported(&self, operation: &'static str) -> BitmapError {
        BitmapError::UnsupportedFormat {
            operation,
            bit_count: self.info_header.bit_count,
            compression: self.info_header.compression,
        }
    }

    /// A zero-filled image with this image's headers and new dimensions.
    ///
    /// Row order and bytes per pixel follow `source`; `biWidth`, `biHeight`,
    /// `biSizeImage` and `bfSize` are recomputed.
    pub(crate) fn with_dimensions(
        &self,
        source: &Layout,
        width: usize,
        height: usize,
    ) -> Result<(Self, Layout), BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        };
        let layout = Layout::new(width, height, source.bytes_per_pixel(), source.order())?;
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = u32::try_from(layout.buffer_len()).map_err(|_| too_large())?;
        let file_size = self
            .file_header
            .pixel_offset
            .checked_add(image_size)
            .ok_or_else(too_large)?;

        let mut file_header = self.file_header.clone();
        file_header.file_size = file_size;
        let mut info_header = self.info_header.clone();
        info_header.width = w;
        info_header.height = layout.order().signed_height(h);
        info_header.image_size = image_size;

        let image = Self {
            file_header,
            info_header,
            header_extra: self.header_extra.clone(),
            pixels: try_zeroed(layout.buffer_len())?,
        };
        Ok((image, layout))
    }
}
