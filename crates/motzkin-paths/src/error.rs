//! Error types shared by the counter and the enumerator.

use thiserror::Error;

/// Errors returned by [`crate::count`] and [`crate::enumerate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MotzkinError {
    /// A size argument was negative.
    #[error("invalid argument: {name} must be non-negative, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    /// The number of paths does not fit in a `u128`.
    #[error("path count for length {length} and min width {width} overflows u128")]
    CountOverflow { length: usize, width: usize },
}

pub type Result<T> = std::result::Result<T, MotzkinError>;

/// Convert a caller-supplied size to `usize`, rejecting negatives.
pub fn non_negative(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| MotzkinError::InvalidArgument { name, value })
}
