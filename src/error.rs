use enough::StopReason;

/// Errors from BMP decoding, encoding, transforms and steganography.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("not a BMP file (missing \"BM\" signature)")]
    NotBmp,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{operation}: unsupported BMP format ({bit_count} bpp, compression {compression})")]
    UnsupportedFormat {
        operation: &'static str,
        bit_count: u16,
        compression: u32,
    },

    #[error("crop rectangle {width}x{height} at ({x},{y}) exceeds image bounds {image_width}x{image_height}")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("payload needs {needed_bits} bits, image carries only {available_bits}")]
    CapacityExceeded { needed_bits: u64, available_bits: u64 },

    #[error("failed to allocate {0} bytes")]
    AllocationFailure(usize),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("extracted payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

/// Allocate a zero-filled buffer, surfacing allocation failure as an error.
pub(crate) fn try_zeroed(len: usize) -> Result<Vec<u8>, BitmapError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BitmapError::AllocationFailure(len))?;
    buf.resize(len, 0);
    Ok(buf)
}
