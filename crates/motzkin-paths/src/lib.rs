//! Counting and enumeration of Motzkin paths.
//!
//! A Motzkin path is a string over `.`, `(` and `)` whose marks balance like
//! parentheses and where every matched pair encloses at least a minimum
//! number of symbols. [`count`] computes how many such paths exist for a
//! length and minimum width; [`enumerate`] lazily produces all of them. Both
//! follow the same recurrence, so the enumerated sequence always has exactly
//! the counted length.

pub mod counter;
pub mod enumerator;
pub mod error;
pub mod path;
pub mod selftest;

pub use counter::{reset_shared, Counter};
pub use enumerator::MotzkinPaths;
pub use error::{MotzkinError, Result};
pub use path::{is_valid_path, validate_path, PathViolation, Symbol};
pub use selftest::{run_self_test, SelfTestConfig, SelfTestReport};

use error::non_negative;

/// Number of paths of `length` whose pairs each enclose at least `min_width`
/// symbols.
///
/// Results are memoized in a process-wide [`Counter`]. Use a `Counter`
/// directly for a private cache.
pub fn count(length: i64, min_width: i64) -> Result<u128> {
    let length = non_negative("length", length)?;
    let min_width = non_negative("min_width", min_width)?;
    counter::shared_count(length, min_width)
}

/// Every path of `length` whose pairs each enclose at least `min_width`
/// symbols, produced lazily.
///
/// Each call returns an independent iterator.
pub fn enumerate(length: i64, min_width: i64) -> Result<MotzkinPaths> {
    let length = non_negative("length", length)?;
    let min_width = non_negative("min_width", min_width)?;
    Ok(MotzkinPaths::new(length, min_width))
}
