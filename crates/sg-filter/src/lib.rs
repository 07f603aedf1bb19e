//! Slice preprocessing primitives: Gaussian smoothing, 8-bit conversion and
//! binary thresholding.
//!
//! Intensities entering [`gaussian_blur_f32`] are expected in unit range
//! (`0.0..=1.0`); [`to_ubyte`] maps that range onto `0..=255` before
//! [`threshold_binary_u8`] binarizes the slice.
//!
//! Smoothing is separable and uses the nearest-edge border by default, the
//! same convention most scientific imaging stacks apply to Gaussian filters.

pub mod blur;
pub mod conv1d;
pub mod intensity;
pub mod kernel;

pub use blur::gaussian_blur_f32;
pub use intensity::{threshold_binary_u8, to_ubyte};
pub use kernel::{DEFAULT_TRUNCATE, GaussianKernel1D};
