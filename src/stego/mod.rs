//! Length-prefixed payload hidden one bit per color-channel byte.
//!
//! ## Stream layout
//!
//! The payload is a 4-byte little-endian length followed by the message
//! bytes. Every byte is split MSB-first into bits, and each bit replaces
//! the selected [`BitPlane`] of one carrier byte.
//!
//! ## Traversal
//!
//! Carrier bytes are visited in logical order: rows top to bottom whatever
//! the stored row order, pixels left to right, channels in stored B,G,R[,A]
//! order. Row padding never carries payload.
//!
//! The bit plane is not recorded in the image; extraction must use the
//! plane the payload was embedded with.

mod bits;

pub use bits::{BitPlane, pack_bits, unpack_bits};

use log::{debug, trace};

use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// Bits taken by the length prefix.
pub const LENGTH_PREFIX_BITS: u64 = 32;

/// Carrier bytes needed to hide a message of `len` bytes.
pub fn required_bits(len: usize) -> u64 {
    LENGTH_PREFIX_BITS + 8 * len as u64
}

/// Largest message, in bytes, that fits in `image`.
pub fn capacity(image: &Bitmap) -> Result<u64, BitmapError> {
    let layout = image.layout("capacity")?;
    Ok(layout
        .carrier_bytes()
        .saturating_sub(LENGTH_PREFIX_BITS)
        / 8)
}

/// Hide `message` in a 24-bit or 32-bit image.
///
/// Capacity is checked before any byte is touched, so on error the image is
/// unchanged. Headers are never modified.
pub fn embed(
    image: &mut Bitmap,
    message: impl AsRef<[u8]>,
    plane: BitPlane,
) -> Result<(), BitmapError> {
    let message = message.as_ref();
    let layout = image.layout("embed")?;

    let available = layout.carrier_bytes();
    let needed = required_bits(message.len());
    let len = u32::try_from(message.len()).ok().filter(|_| needed <= available);
    let Some(len) = len else {
        return Err(BitmapError::CapacityExceeded {
            needed_bits: needed,
            available_bits: available,
        });
    };

    let prefix = len.to_le_bytes();
    let payload = pack_bits(&prefix).chain(pack_bits(message));
    let pixels = &mut image.pixels;
    for (offset, bit) in layout.carrier_offsets().zip(payload) {
        pixels[offset] = plane.write(pixels[offset], bit);
    }

    trace!("embedded {needed} bits of {available} available ({plane})");
    Ok(())
}

/// Recover the raw payload bytes hidden by [`embed`].
///
/// A declared length that cannot fit in the image (for instance when no
/// payload was ever embedded) fails with `CapacityExceeded`.
pub fn extract(image: &Bitmap, plane: BitPlane) -> Result<Vec<u8>, BitmapError> {
    let layout = image.layout("extract")?;
    let available = layout.carrier_bytes();
    if available < LENGTH_PREFIX_BITS {
        return Err(BitmapError::CapacityExceeded {
            needed_bits: LENGTH_PREFIX_BITS,
            available_bits: available,
        });
    }

    let pixels = &image.pixels;
    let mut bits = layout
        .carrier_offsets()
        .map(|offset| plane.read(pixels[offset]));

    let prefix = unpack_bits(&mut bits, 4);
    let prefix = <[u8; 4]>::try_from(prefix.as_slice()).map_err(|_| {
        BitmapError::CapacityExceeded {
            needed_bits: LENGTH_PREFIX_BITS,
            available_bits: available,
        }
    })?;
    let len = u32::from_le_bytes(prefix);
    debug!("declared payload length {len}");

    let needed = required_bits(len as usize);
    if needed > available {
        return Err(BitmapError::CapacityExceeded {
            needed_bits: needed,
            available_bits: available,
        });
    }

    Ok(unpack_bits(&mut bits, len as usize))
}

/// Recover a UTF-8 message hidden by [`embed`].
pub fn extract_text(image: &Bitmap, plane: BitPlane) -> Result<String, BitmapError> {
    String::from_utf8(extract(image, plane)?).map_err(|_| BitmapError::InvalidUtf8)
}
