//! # bmpkit
//!
//! Uncompressed Windows bitmap (BMP) codec, nearest-neighbor geometry
//! transforms, and bit-plane steganography.
//!
//! ## Components
//!
//! - **Codec**: [`decode_bmp`] / [`DecodeRequest`] parse the 14-byte file
//!   header and 40-byte BITMAPINFOHEADER and copy the raw pixel rows;
//!   [`encode_bmp`] writes them back byte for byte.
//! - **Transforms**: [`fill`], [`rotate`], [`scale`], [`resize`], [`crop`].
//!   All except `fill` return a new [`Bitmap`] with recomputed
//!   `biSizeImage` / `bfSize` and zeroed row padding.
//! - **Steganography**: [`embed`] / [`extract`] hide a length-prefixed
//!   payload in one bit ([`BitPlane::Lsb`] or [`BitPlane::Msb`]) of every
//!   color-channel byte.
//!
//! Pixel coordinates are always logical (`(0, 0)` is the top-left pixel);
//! the bottom-up / top-down storage order is handled by [`Layout`].
//!
//! ## Supported input
//!
//! Decoding accepts any BMP whose headers and pixel buffer are present.
//! Transforms and steganography require 24-bit or 32-bit pixels; `fill`,
//! `rotate` and `scale` require 24-bit.
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, JPEG/PNG-in-BMP) and palette images
//! - Color-space conversion
//! - Formats other than BMP
//!
//! ## Usage
//!
//! ```no_run
//! use bmpkit::{BitPlane, Unstoppable};
//!
//! let data = std::fs::read("input.bmp")?;
//! let mut image = bmpkit::decode_bmp(&data, Unstoppable)?;
//!
//! bmpkit::embed(&mut image, "Hello Stego", BitPlane::Lsb)?;
//! assert_eq!(bmpkit::extract_text(&image, BitPlane::Lsb)?, "Hello Stego");
//!
//! let cropped = bmpkit::crop(&image, 0, 0, 50, 50, Unstoppable)?;
//! let resized = bmpkit::resize(&cropped, 100, 100, Unstoppable)?;
//! std::fs::write("output.bmp", bmpkit::encode_bmp(&resized, Unstoppable)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod bmp;
mod decode;
mod error;
mod layout;
mod limits;
mod pixel;
pub mod stego;
pub mod transform;

#[cfg(feature = "cli")]
pub mod shell;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// Re-exports
pub use bitmap::{BASE_HEADER_LEN, Bitmap, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader};
pub use decode::DecodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use layout::{Layout, RowOrder, row_stride};
pub use limits::Limits;
pub use pixel::PixelFormat;
pub use stego::{BitPlane, capacity, embed, extract, extract_text};
pub use transform::{crop, fill, resize, rotate, scale};
#[cfg(feature = "rgb")]
pub use transform::fill_rgb;

/// Decode a BMP from memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a bitmap to BMP bytes.
pub fn encode_bmp(image: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(image, &stop)
}

/// Read and decode a BMP file.
pub fn read_bmp(path: impl AsRef<Path>) -> Result<Bitmap, BitmapError> {
    let data = std::fs::read(path)?;
    decode_bmp(&data, Unstoppable)
}

/// Encode a bitmap and write it to a file.
pub fn write_bmp(path: impl AsRef<Path>, image: &Bitmap) -> Result<(), BitmapError> {
    let file = File::create(path)?;
    image.write_to(BufWriter::new(file))
}

impl Bitmap {
    /// Encode this bitmap into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), BitmapError> {
        bmp::write(self, writer)
    }
}
