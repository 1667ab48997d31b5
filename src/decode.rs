use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::limits::Limits;

/// Builder for decoding a BMP with optional resource limits.
///
/// ```no_run
/// use bmpkit::{DecodeRequest, Limits, Unstoppable};
///
/// let data = std::fs::read("input.bmp")?;
/// let limits = Limits { max_pixels: Some(16_000_000), ..Default::default() };
/// let image = DecodeRequest::new(&data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose dimensions or pixel buffer exceed `limits`
    /// before anything is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BitmapError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}
