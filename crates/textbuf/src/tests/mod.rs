mod arbitrary;
mod property_model;

/// Number of quickcheck cases per property.
pub(crate) fn test_count() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
