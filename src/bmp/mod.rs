//! Uncompressed BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.

mod decode;
mod encode;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::limits::Limits;
use enough::Stop;

/// Decode BMP data into a [`Bitmap`].
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    decode::decode_bitmap(data, limits, stop)
}

/// Encode to BMP.
pub(crate) fn encode(image: &Bitmap, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bitmap(image, stop)
}

/// Stream a BMP to `writer`.
pub(crate) fn write<W: std::io::Write>(image: &Bitmap, writer: W) -> Result<(), BitmapError> {
    encode::write_bitmap(image, writer)
}
