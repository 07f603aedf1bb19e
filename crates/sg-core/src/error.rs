use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("slice {index} is {actual:?} (width, height), expected {expected:?}")]
    SliceShape {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("invalid spacing {0:?}: every component must be finite and > 0")]
    InvalidSpacing([f64; 3]),
}
