//! Build-time configuration of the buffer.
//!
//! None of these values can be changed at runtime. The `const` assertions at
//! the bottom of this module reject an invalid configuration at compile time.

/// Capacity of a buffer created by [`Text::new`](crate::Text::new), and the
/// smallest capacity any constructor hands out.
pub const DEFAULT_CAPACITY: usize = 32;

/// Numerator of the growth load factor.
///
/// Each growth step multiplies the current capacity by
/// `LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR`.
pub const LOAD_FACTOR_NUMERATOR: usize = 3;

/// Denominator of the growth load factor.
pub const LOAD_FACTOR_DENOMINATOR: usize = 2;

/// The reserved size value. It is never a legal size, capacity or index, and
/// passing it to any operation is a contract violation.
pub const SIZE_SENTINEL: usize = usize::MAX;

const _: () = assert!(DEFAULT_CAPACITY >= 32, "default capacity must be at least 32");
const _: () = assert!(
    DEFAULT_CAPACITY < SIZE_SENTINEL,
    "default capacity must be below the sentinel size"
);
const _: () = assert!(LOAD_FACTOR_DENOMINATOR > 0, "load factor denominator must be non-zero");
const _: () = assert!(
    LOAD_FACTOR_NUMERATOR > LOAD_FACTOR_DENOMINATOR,
    "load factor must be greater than one"
);
