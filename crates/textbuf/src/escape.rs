//! JSON-style quoting of raw bytes.
//!
//! Quoting works byte by byte and knows nothing about UTF-8: every byte
//! outside printable ASCII becomes a `\u00XX` escape, so the quoted form is
//! always plain ASCII.

use alloc::string::String;
use core::fmt;

use crate::{Text, error::OrFatal};

/// Two-character escape for `byte`, if it has one.
#[inline]
fn short_escape(byte: u8) -> Option<&'static str> {
    Some(match byte {
        b'"' => "\\\"",
        b'\\' => "\\\\",
        b'/' => "\\/",
        0x08 => "\\b",
        0x0C => "\\f",
        b'\n' => "\\n",
        b'\r' => "\\r",
        b'\t' => "\\t",
        _ => return None,
    })
}

#[inline]
fn passes_through(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E) && short_escape(byte).is_none()
}

/// Writes `src` escaped, without the surrounding quotes.
pub(crate) fn write_escaped_bytes<W: fmt::Write>(src: &[u8], f: &mut W) -> fmt::Result {
    let mut rest = src;
    while !rest.is_empty() {
        // Copy the longest run of bytes that need no escaping in one go.
        let run = rest.iter().position(|&b| !passes_through(b)).unwrap_or(rest.len());
        if run > 0 {
            let (plain, tail) = rest.split_at(run);
            f.write_str(core::str::from_utf8(plain).map_err(|_| fmt::Error)?)?;
            rest = tail;
            continue;
        }

        let byte = rest[0];
        match short_escape(byte) {
            Some(escape) => f.write_str(escape)?,
            None => write!(f, "\\u{byte:04X}")?,
        }
        rest = &rest[1..];
    }
    Ok(())
}

/// Display adapter rendering bytes as a quoted, escaped JSON-style string.
///
/// Width, fill and alignment apply to the whole quoted form.
///
/// ```rust
/// use textbuf::Quoted;
///
/// assert_eq!(Quoted(b"a\"b\0").to_string(), r#""a\"b\u0000""#);
/// assert_eq!(format!("{:>5}", Quoted(b"a")), r#"  "a""#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a>(pub &'a [u8]);

impl Quoted<'_> {
    fn write_to<W: fmt::Write>(&self, f: &mut W) -> fmt::Result {
        f.write_str("\"")?;
        write_escaped_bytes(self.0, f)?;
        f.write_str("\"")
    }
}

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.width().is_none() && f.precision().is_none() {
            return self.write_to(f);
        }
        let mut rendered = String::new();
        self.write_to(&mut rendered)?;
        f.pad(&rendered)
    }
}

impl Text {
    /// Creates a text holding the quoted, escaped form of `data`.
    ///
    /// The output is wrapped in `"`; `"`, `\`, `/`, backspace, form feed,
    /// newline, carriage return and tab get their two-character escapes; any
    /// other byte outside `0x20..=0x7E` becomes `\u00XX`.
    ///
    /// ```rust
    /// use textbuf::Text;
    ///
    /// let text = Text::quoted(b"lo\trem\0");
    /// assert_eq!(text.as_bytes(), br#""lo\trem\u0000""#);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn quoted(data: &[u8]) -> Self {
        Self::try_from_format(format_args!("{}", Quoted(data))).or_fatal()
    }

    /// Replaces the content with its quoted form (see [`Text::quoted`]).
    #[must_use]
    #[track_caller]
    pub fn quote(self) -> Self {
        Self::quoted(self.as_bytes())
    }
}
