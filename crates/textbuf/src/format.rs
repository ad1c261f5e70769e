//! Formatted construction and editing.
//!
//! Every formatted operation renders its arguments twice: first into a
//! counter to learn the rendered size, then straight into the bytes reserved
//! for it inside the text. No intermediate `String` is allocated.

use core::fmt::{self, Write};

use crate::{
    Text,
    error::{OrFatal, TextError},
};

/// Counts rendered bytes without storing them.
struct LengthCounter(usize);

impl Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 = self.0.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

/// Writes rendered bytes into a fixed slice, failing on overrun.
struct SliceWriter<'a> {
    dst: &'a mut [u8],
    written: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self
            .written
            .checked_add(s.len())
            .filter(|&end| end <= self.dst.len())
            .ok_or(fmt::Error)?;
        self.dst[self.written..end].copy_from_slice(s.as_bytes());
        self.written = end;
        Ok(())
    }
}

fn measure(args: fmt::Arguments<'_>) -> Result<usize, TextError> {
    if let Some(s) = args.as_str() {
        return Ok(s.len());
    }
    let mut counter = LengthCounter(0);
    counter.write_fmt(args).map_err(|_| TextError::Format)?;
    Ok(counter.0)
}

/// Renders `args` into `dst`, which must be exactly the measured size.
fn render_into(dst: &mut [u8], args: fmt::Arguments<'_>) -> Result<(), TextError> {
    let mut writer = SliceWriter { dst, written: 0 };
    writer.write_fmt(args).map_err(|_| TextError::Format)?;
    if writer.written == writer.dst.len() {
        Ok(())
    } else {
        Err(TextError::Format)
    }
}

impl Text {
    /// Opens `size` bytes at `index` and renders `args` into them.
    fn try_render_at(
        self,
        index: usize,
        size: usize,
        args: fmt::Arguments<'_>,
    ) -> Result<Self, TextError> {
        let mut text = self.open_gap(index, size)?;
        render_into(&mut text.content_mut()[index..index + size], args)?;
        Ok(text)
    }

    /// Creates a text holding exactly the rendering of `args`.
    ///
    /// The [`text!`](crate::text) macro is shorthand for this.
    ///
    /// ```rust
    /// use textbuf::Text;
    ///
    /// let text = Text::from_format(format_args!("{}-{:03}", "id", 7));
    /// assert_eq!(text.as_bytes(), b"id-007");
    /// ```
    ///
    /// # Panics
    ///
    /// If a formatting implementation fails, or renders a different number of
    /// bytes on the second pass.
    #[must_use]
    #[track_caller]
    pub fn from_format(args: fmt::Arguments<'_>) -> Self {
        Self::try_from_format(args).or_fatal()
    }

    /// Fallible form of [`Text::from_format`].
    ///
    /// # Errors
    ///
    /// [`TextError::Format`] or [`TextError::Allocation`].
    pub fn try_from_format(args: fmt::Arguments<'_>) -> Result<Self, TextError> {
        let size = measure(args)?;
        Self::try_with_capacity(size)?.try_render_at(0, size, args)
    }

    /// Appends the rendering of `args`.
    ///
    /// # Panics
    ///
    /// If the rendering is empty, or if a formatting implementation fails.
    #[must_use]
    #[track_caller]
    pub fn append_format(self, args: fmt::Arguments<'_>) -> Self {
        self.try_append_format(args).or_fatal()
    }

    /// Fallible form of [`Text::append_format`].
    ///
    /// # Errors
    ///
    /// [`TextError::EmptyAppend`], [`TextError::Format`],
    /// [`TextError::LengthOverflow`] or [`TextError::Allocation`].
    pub fn try_append_format(self, args: fmt::Arguments<'_>) -> Result<Self, TextError> {
        let size = measure(args)?;
        if size == 0 {
            return Err(TextError::EmptyAppend);
        }
        let index = self.len();
        self.try_render_at(index, size, args)
    }

    /// Inserts the rendering of `args` at byte offset `index`.
    #[must_use]
    #[track_caller]
    pub fn insert_format(self, index: usize, args: fmt::Arguments<'_>) -> Self {
        self.try_insert_format(index, args).or_fatal()
    }

    /// Fallible form of [`Text::insert_format`].
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfRange`], [`TextError::Format`],
    /// [`TextError::LengthOverflow`] or [`TextError::Allocation`].
    pub fn try_insert_format(
        self,
        index: usize,
        args: fmt::Arguments<'_>,
    ) -> Result<Self, TextError> {
        self.check_insert_index(index)?;
        let size = measure(args)?;
        if size == 0 {
            return Ok(self);
        }
        self.try_render_at(index, size, args)
    }

    /// Replaces the content with the rendering of `args`.
    #[must_use]
    #[track_caller]
    pub fn overwrite_with_format(self, args: fmt::Arguments<'_>) -> Self {
        self.try_overwrite_with_format(args).or_fatal()
    }

    /// Fallible form of [`Text::overwrite_with_format`].
    ///
    /// # Errors
    ///
    /// [`TextError::Format`] or [`TextError::Allocation`].
    pub fn try_overwrite_with_format(mut self, args: fmt::Arguments<'_>) -> Result<Self, TextError> {
        let size = measure(args)?;
        self.clear();
        self.try_render_at(0, size, args)
    }
}
