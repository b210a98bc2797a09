//! Threshold evaluation

/// Whether a miss count is at or above the alert threshold
#[inline]
pub fn is_alertable(threshold: u64, misses: u64) -> bool {
    misses >= threshold
}
