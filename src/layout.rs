//! Row-padding arithmetic and pixel addressing shared by the codec,
//! the transforms and the stego codec.

use crate::error::BitmapError;

/// Vertical storage order of the rows in a BMP pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Positive `biHeight`: the first stored row is the bottom of the image.
    BottomUp,
    /// Negative `biHeight`: the first stored row is the top of the image.
    TopDown,
}

impl RowOrder {
    /// Row order implied by a signed `biHeight`.
    pub fn from_height(height: i32) -> Self {
        if height < 0 {
            Self::TopDown
        } else {
            Self::BottomUp
        }
    }

    /// Apply this order's sign to an absolute height.
    pub fn signed_height(self, height: i32) -> i32 {
        match self {
            Self::BottomUp => height,
            Self::TopDown => -height,
        }
    }
}

/// Bytes per stored row, rounded up to a multiple of 4.
///
/// Returns `None` on overflow.
pub fn row_stride(width: usize, bytes_per_pixel: usize) -> Option<usize> {
    width
        .checked_mul(bytes_per_pixel)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// Geometry of a pixel buffer: dimensions, stride and row order.
///
/// Coordinates taken by [`Layout::offset`] and [`Layout::row_start`] are
/// logical: `y == 0` is the top row no matter how the rows are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    stride: usize,
    order: RowOrder,
}

impl Layout {
    /// Build a layout, failing if the buffer size would overflow `usize`.
    pub fn new(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        order: RowOrder,
    ) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        };
        let stride = row_stride(width, bytes_per_pixel).ok_or_else(too_large)?;
        stride.checked_mul(height).ok_or_else(too_large)?;
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            stride,
            order,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Absolute height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn order(&self) -> RowOrder {
        self.order
    }

    /// Total buffer size: `stride * height`.
    pub fn buffer_len(&self) -> usize {
        self.stride * self.height
    }

    /// Bytes of pixel data in a row, excluding padding.
    pub fn row_bytes(&self) -> usize {
        self.width * self.bytes_per_pixel
    }

    /// Number of pixel bytes in the whole image, padding excluded.
    pub fn carrier_bytes(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.bytes_per_pixel as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Stored row index holding logical row `y`.
    pub fn stored_row(&self, y: usize) -> usize {
        match self.order {
            RowOrder::BottomUp => self.height - 1 - y,
            RowOrder::TopDown => y,
        }
    }

    /// Buffer offset of the first byte of logical row `y`.
    pub fn row_start(&self, y: usize) -> Option<usize> {
        (y < self.height).then(|| self.stored_row(y) * self.stride)
    }

    /// Buffer offset of the first byte of the pixel at logical `(x, y)`.
    pub fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width {
            return None;
        }
        self.row_start(y).map(|start| start + x * self.bytes_per_pixel)
    }

    /// Offsets of every color-channel byte in logical order: rows top to
    /// bottom, pixels left to right, channels in stored order. Row padding
    /// is skipped.
    pub fn carrier_offsets(&self) -> impl Iterator<Item = usize> + use<> {
        let layout = *self;
        (0..layout.height).flat_map(move |y| {
            let start = layout.stored_row(y) * layout.stride;
            start..start + layout.row_bytes()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_four_byte_aligned() {
        assert_eq!(row_stride(1, 3), Some(4));
        assert_eq!(row_stride(2, 3), Some(8));
        assert_eq!(row_stride(3, 3), Some(12));
        assert_eq!(row_stride(5, 3), Some(16));
        assert_eq!(row_stride(5, 4), Some(20));
        assert_eq!(row_stride(0, 3), Some(0));
        assert_eq!(row_stride(usize::MAX, 3), None);
    }

    #[test]
    fn bottom_up_rows_are_flipped() {
        let layout = Layout::new(2, 3, 3, RowOrder::BottomUp).unwrap();
        assert_eq!(layout.stride(), 8);
        assert_eq!(layout.buffer_len(), 24);
        assert_eq!(layout.offset(0, 0), Some(16));
        assert_eq!(layout.offset(1, 2), Some(3));
        assert_eq!(layout.offset(2, 0), None);
        assert_eq!(layout.offset(0, 3), None);
    }

    #[test]
    fn top_down_rows_are_direct() {
        let layout = Layout::new(2, 3, 4, RowOrder::TopDown).unwrap();
        assert_eq!(layout.offset(0, 0), Some(0));
        assert_eq!(layout.offset(1, 2), Some(20));
    }

    #[test]
    fn carrier_offsets_skip_padding() {
        // 1 pixel wide, 24-bit: 3 data bytes + 1 padding byte per row
        let layout = Layout::new(1, 2, 3, RowOrder::BottomUp).unwrap();
        let offsets: Vec<usize> = layout.carrier_offsets().collect();
        assert_eq!(offsets, vec![4, 5, 6, 0, 1, 2]);
        assert_eq!(layout.carrier_bytes(), 6);

        let layout = Layout::new(1, 2, 3, RowOrder::TopDown).unwrap();
        let offsets: Vec<usize> = layout.carrier_offsets().collect();
        assert_eq!(offsets, vec![0, 1, 2, 4, 5, 6]);
    }

    #[test]
    fn signed_height_follows_order() {
        assert_eq!(RowOrder::from_height(10), RowOrder::BottomUp);
        assert_eq!(RowOrder::from_height(-10), RowOrder::TopDown);
        assert_eq!(RowOrder::TopDown.signed_height(7), -7);
        assert_eq!(RowOrder::BottomUp.signed_height(7), 7);
    }
}
