//! Memoized path counting.
//!
//! The number of paths of length `n` at minimum width `w` satisfies
//!
//! ```text
//! count(0, w) = 1
//! count(n, w) = count(n - 1, w)
//!             + sum over inner in w..=n-2 of count(inner, w) * count(n - 2 - inner, w)
//! ```
//!
//! The first term covers paths starting with a dot. Each summand covers paths
//! whose first symbol opens a pair enclosing `inner` symbols, followed by an
//! arbitrary remainder.
//!
//! The valid range of `inner` depends on `w`, so memoized counts are kept in
//! one `WidthCache` per width and never shared between widths.

use std::collections::HashMap;
use std::sync::Mutex;

use log::{debug, trace};
use once_cell::sync::Lazy;

use crate::error::{MotzkinError, Result};

/// Counts for a single minimum width.
///
/// Lengths up to `width + 1` are too short for any pair and always count 1,
/// so only longer lengths are stored: `counts[i]` holds length `width + 2 + i`.
#[derive(Debug, Clone)]
pub(crate) struct WidthCache {
    width: usize,
    counts: Vec<u128>,
}

impl WidthCache {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            counts: Vec::new(),
        }
    }

    /// Number of stored counts.
    pub(crate) fn stored(&self) -> usize {
        self.counts.len()
    }

    /// Count paths of `length`, extending the cache as needed.
    pub(crate) fn count(&mut self, length: usize) -> Result<u128> {
        if self.is_dots_only(length) {
            return Ok(1);
        }
        let index = length - self.width - 2;
        if index >= self.counts.len() {
            self.extend_to(length)?;
        }
        Ok(self.counts[index])
    }

    fn is_dots_only(&self, length: usize) -> bool {
        length.saturating_sub(1) <= self.width
    }

    /// Cached count for a length already covered by the cache.
    fn cached(&self, length: usize) -> u128 {
        if self.is_dots_only(length) {
            1
        } else {
            self.counts[length - self.width - 2]
        }
    }

    /// Fill in every length up to and including `length`.
    ///
    /// Lengths are computed in ascending order so every term of the
    /// recurrence is already cached when it is needed.
    fn extend_to(&mut self, length: usize) -> Result<()> {
        let from = self.width + 2 + self.counts.len();

        for n in from..=length {
            let value = self.next_count(n).ok_or(MotzkinError::CountOverflow {
                length,
                width: self.width,
            })?;
            trace!("count({}, {}) = {}", n, self.width, value);
            self.counts.push(value);
        }

        debug!(
            "extended width {} cache from length {} to {}",
            self.width, from, length
        );
        Ok(())
    }

    /// Apply the recurrence for `n > width + 1`, assuming every shorter
    /// length is cached.
    fn next_count(&self, n: usize) -> Option<u128> {
        let mut total = self.cached(n - 1);
        for inner in self.width..=n - 2 {
            let pairs = self.cached(inner).checked_mul(self.cached(n - 2 - inner))?;
            total = total.checked_add(pairs)?;
        }
        Some(total)
    }
}

/// Path counter owning one cache per minimum width.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    caches: HashMap<usize, WidthCache>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of valid paths of `length` with every pair at least `width` wide.
    pub fn count(&mut self, length: usize, width: usize) -> Result<u128> {
        self.caches
            .entry(width)
            .or_insert_with(|| {
                debug!("creating count cache for width {}", width);
                WidthCache::new(width)
            })
            .count(length)
    }

    /// Number of counts stored for `width`, or 0 if none. Lengths up to
    /// `width + 1` are answered without being stored.
    pub fn cached_len(&self, width: usize) -> usize {
        self.caches.get(&width).map_or(0, WidthCache::stored)
    }

    /// Drop the cache for one width.
    pub fn reset_width(&mut self, width: usize) {
        self.caches.remove(&width);
    }

    /// Drop every cache.
    pub fn reset(&mut self) {
        self.caches.clear();
    }
}

// Process-wide counter behind `crate::count`.
static SHARED_COUNTER: Lazy<Mutex<Counter>> = Lazy::new(|| Mutex::new(Counter::new()));

/// Count using the process-wide counter.
pub fn shared_count(length: usize, width: usize) -> Result<u128> {
    // The cache only ever holds completed entries, so a poisoned lock is still usable.
    let mut counter = SHARED_COUNTER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    counter.count(length, width)
}

/// Clear the process-wide counter.
pub fn reset_shared() {
    SHARED_COUNTER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .reset();
}

#[cfg(test)]
fn shared_cached_len(width: usize) -> usize {
    SHARED_COUNTER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .cached_len(width)
}
