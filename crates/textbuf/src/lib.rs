//! A growable, binary-safe text buffer.
//!
//! [`Text`] is an explicitly sized byte buffer: content may hold zero bytes
//! anywhere, a zero terminator always follows the content, and capacity grows
//! geometrically so appends cost amortized O(1) per byte. On top of the raw
//! edits (overwrite, append, insert, erase) it offers `format_args!`-based
//! construction, JSON-style quoting and ASCII case folding.
//!
//! ```rust
//! use textbuf::{Text, text};
//!
//! let name = text!("{}-{}", "lorem", 42);
//! let name = name.insert_literal(0, "ipsum ").quote();
//! assert_eq!(name.as_bytes(), br#""ipsum lorem-42""#);
//! ```
//!
//! Calling an operation with arguments it documents as illegal (an index past
//! the end, a reversed range, the [`config::SIZE_SENTINEL`] size) panics. Each
//! such operation also has a `try_` form that reports a [`TextError`] instead.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
mod error;
mod escape;
mod format;
mod growth;
#[cfg(feature = "serde")]
mod serde;
mod text;

#[cfg(test)]
mod tests;

pub use error::TextError;
pub use escape::Quoted;
pub use text::Text;

/// Builds a [`Text`] from a format string, like `format!` builds a `String`.
///
/// ```rust
/// use textbuf::text;
///
/// let t = text!("{}:{:02}", "lorem", 7);
/// assert_eq!(t.as_bytes(), b"lorem:07");
/// ```
#[macro_export]
macro_rules! text {
    ( $( $arg:tt )* ) => {
        $crate::Text::from_format(::core::format_args!($($arg)*))
    };
}
