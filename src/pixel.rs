/// On-disk pixel format of an uncompressed BMP, derived from `biBitCount`.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 24-bit, 3 bytes per pixel in B,G,R order.
    Bgr24,
    /// 32-bit, 4 bytes per pixel in B,G,R,A order (4th byte may be unused padding).
    Bgra32,
}

impl PixelFormat {
    /// Map a `biBitCount` value to a supported format.
    pub fn from_bit_count(bit_count: u16) -> Option<Self> {
        match bit_count {
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgra32),
            _ => None,
        }
    }

    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr24 => 3,
            Self::Bgra32 => 4,
        }
    }

    /// The `biBitCount` header value.
    pub fn bit_count(&self) -> u16 {
        match self {
            Self::Bgr24 => 24,
            Self::Bgra32 => 32,
        }
    }
}
