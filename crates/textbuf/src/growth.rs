//! Capacity growth policy.
//!
//! Growth is geometric: starting from the current capacity, each step
//! multiplies by the load factor and rounds up to the next even number, until
//! the target is reached. Because every step scales by a constant factor, a
//! sequence of appends costs amortized O(1) per byte.

use crate::{
    config::{LOAD_FACTOR_DENOMINATOR, LOAD_FACTOR_NUMERATOR, SIZE_SENTINEL},
    error::TextError,
};

#[inline]
fn next_even(size: usize) -> Option<usize> {
    size.checked_add(size % 2)
}

/// One growth step. Always strictly larger than `size`.
fn apply_load_factor(size: usize) -> Option<usize> {
    let scaled = size as u128 * LOAD_FACTOR_NUMERATOR as u128 / LOAD_FACTOR_DENOMINATOR as u128;
    let scaled = usize::try_from(scaled).ok()?;
    // 0 and 1 do not grow under the factor alone.
    let scaled = scaled.max(size.checked_add(1)?);
    next_even(scaled).filter(|&grown| grown < SIZE_SENTINEL)
}

/// Computes the capacity to reallocate to when `current` cannot hold
/// `target` bytes.
///
/// The caller must only ask for growth, i.e. `current < target`.
pub(crate) fn calculate_new_capacity(current: usize, target: usize) -> Result<usize, TextError> {
    debug_assert!(current < target, "growth requested for {current} -> {target}");
    if target == SIZE_SENTINEL {
        return Err(TextError::SentinelSize);
    }

    let mut capacity = current;
    while capacity < target {
        capacity =
            apply_load_factor(capacity).ok_or(TextError::Allocation { capacity: target })?;
    }
    Ok(capacity)
}
