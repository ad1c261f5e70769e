use thiserror::Error;

/// Why an operation on a [`Text`](crate::Text) was rejected.
///
/// Every variant except [`TextError::Allocation`] is a contract violation: the
/// caller passed arguments the operation documents as illegal. The panicking
/// form of each operation turns these into a panic; the `try_` forms return
/// them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// A byte index was not below the text's length.
    #[error("index {index} out of range for text of length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the text at the time of the call.
        len: usize,
    },
    /// A range was reversed or reached past the end of the text.
    #[error("invalid range {start}..{end} for text of length {len}")]
    InvalidRange {
        /// Resolved start of the range.
        start: usize,
        /// Resolved end of the range.
        end: usize,
        /// Length of the text at the time of the call.
        len: usize,
    },
    /// A requested length does not fit in the reserved capacity.
    #[error("length {len} exceeds capacity {capacity}")]
    LengthExceedsCapacity {
        /// The requested length.
        len: usize,
        /// Capacity of the text at the time of the call.
        capacity: usize,
    },
    /// A size, capacity or index argument equalled
    /// [`SIZE_SENTINEL`](crate::config::SIZE_SENTINEL).
    #[error("size argument is the reserved sentinel value")]
    SentinelSize,
    /// Appending zero bytes.
    #[error("cannot append an empty byte sequence")]
    EmptyAppend,
    /// The length after the operation would not be representable.
    #[error("resulting length overflows usize")]
    LengthOverflow,
    /// Removing a byte from an empty text.
    #[error("text is empty")]
    Empty,
    /// A formatting trait implementation returned an error, or rendered a
    /// different number of bytes when asked a second time.
    #[error("formatting failed")]
    Format,
    /// The allocator could not provide storage for the requested capacity.
    #[error("failed to allocate storage for capacity {capacity}")]
    Allocation {
        /// The capacity that could not be allocated.
        capacity: usize,
    },
}

/// Converts a rejected operation into the fatal path.
pub(crate) trait OrFatal<T> {
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T, TextError> {
    #[inline]
    #[track_caller]
    fn or_fatal(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => fatal(&err),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn fatal(err: &TextError) -> ! {
    log::error!("text contract violation: {err}");
    panic!("{err}")
}
