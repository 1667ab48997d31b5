//! Geometric pixel transforms.
//!
//! Every transform except [`fill`] borrows its input and returns a freshly
//! allocated image with zeroed row padding. Coordinates are logical: `(0, 0)`
//! is the top-left pixel regardless of the stored row order.

mod crop;
mod fill;
mod resample;
mod rotate;

pub use crop::crop;
#[cfg(feature = "rgb")]
pub use fill::fill_rgb;
pub use fill::fill;
pub use resample::{resize, scale};
pub use rotate::rotate;
