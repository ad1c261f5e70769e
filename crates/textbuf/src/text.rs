//! The growable byte buffer.
//!
//! A [`Text`] owns `capacity + 1` bytes of zero-initialised storage. The first
//! `len` bytes are the content, the byte at `len` is always zero, and
//! everything between is reserved space. Content is arbitrary bytes: interior
//! zeros are legal and carry no meaning.
//!
//! Operations that may move the storage take the buffer by value and hand back
//! the (possibly relocated) buffer, so a stale value can never be observed:
//!
//! ```rust
//! use textbuf::Text;
//!
//! let text = Text::with_capacity(0);
//! let text = text.append_literal("lorem");
//! let mut text = text.insert_literal(0, "ipsum ");
//! assert_eq!(text.as_bytes(), b"ipsum lorem");
//!
//! text.erase_range(0..6);
//! assert_eq!(text.as_bytes(), b"lorem");
//! ```
//!
//! Operations that never reallocate (`clear`, `put`, `pop`, `erase_range`,
//! `set_length`, `lower`, `upper`) work in place through `&mut self`.

use alloc::vec::Vec;
use core::{
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{Bound, RangeBounds},
};

use bstr::{BStr, ByteSlice};

use crate::{
    config::{DEFAULT_CAPACITY, SIZE_SENTINEL},
    error::{OrFatal, TextError},
    growth::calculate_new_capacity,
};

/// A growable, binary-safe byte buffer with amortized capacity growth.
///
/// See the [module documentation](self) for the ownership convention.
pub struct Text {
    /// Exactly `capacity + 1` bytes; `storage[len] == 0`.
    storage: Vec<u8>,
    len: usize,
}

fn allocate(capacity: usize) -> Result<Vec<u8>, TextError> {
    let size = capacity
        .checked_add(1)
        .ok_or(TextError::Allocation { capacity })?;
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(size)
        .map_err(|_| TextError::Allocation { capacity })?;
    storage.resize(size, 0);
    Ok(storage)
}

#[inline]
fn check_size(size: usize) -> Result<usize, TextError> {
    if size == SIZE_SENTINEL {
        Err(TextError::SentinelSize)
    } else {
        Ok(size)
    }
}

impl Text {
    // ------------------------------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------------------------------

    /// Creates an empty text with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty text with capacity `max(capacity, DEFAULT_CAPACITY)`.
    ///
    /// # Panics
    ///
    /// If `capacity` is [`SIZE_SENTINEL`] or the storage cannot be allocated.
    #[must_use]
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).or_fatal()
    }

    /// Fallible form of [`Text::with_capacity`].
    ///
    /// # Errors
    ///
    /// [`TextError::SentinelSize`] or [`TextError::Allocation`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TextError> {
        let capacity = check_size(capacity)?.max(DEFAULT_CAPACITY);
        Ok(Self {
            storage: allocate(capacity)?,
            len: 0,
        })
    }

    /// Creates a text holding a verbatim copy of `data`, interior zeros
    /// included. The capacity is `max(data.len(), DEFAULT_CAPACITY)`.
    ///
    /// # Panics
    ///
    /// If the storage cannot be allocated.
    #[must_use]
    #[track_caller]
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::try_from_bytes(data).or_fatal()
    }

    /// Fallible form of [`Text::from_bytes`].
    ///
    /// # Errors
    ///
    /// [`TextError::SentinelSize`] or [`TextError::Allocation`].
    pub fn try_from_bytes(data: &[u8]) -> Result<Self, TextError> {
        let mut text = Self::try_with_capacity(data.len())?;
        text.storage[..data.len()].copy_from_slice(data);
        text.terminate(data.len());
        Ok(text)
    }

    /// Creates a text from a literal, stopping at the literal's first zero
    /// byte the way a C string literal ends at its terminator.
    ///
    /// Use [`Text::from_bytes`] (or `From<&str>`) to keep interior zeros.
    ///
    /// ```rust
    /// use textbuf::Text;
    ///
    /// assert_eq!(Text::from_literal("sit,\0amet").as_bytes(), b"sit,");
    /// ```
    #[must_use]
    #[track_caller]
    pub fn from_literal(literal: &str) -> Self {
        Self::from_bytes(literal_bytes(literal))
    }

    /// Returns an independent copy with the same content and capacity.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Releases the text and its storage. Equivalent to dropping it.
    pub fn release(self) {
        drop(self);
    }

    // ------------------------------------------------------------------------------------------------
    // Capacity management
    // ------------------------------------------------------------------------------------------------

    /// Moves the content into storage for exactly `capacity` bytes.
    fn reallocate(&mut self, capacity: usize) -> Result<(), TextError> {
        debug_assert!(self.len <= capacity);
        let previous = self.capacity();
        let size = capacity
            .checked_add(1)
            .ok_or(TextError::Allocation { capacity })?;

        if size > self.storage.len() {
            self.storage
                .try_reserve_exact(size - self.storage.len())
                .map_err(|_| TextError::Allocation { capacity })?;
            self.storage.resize(size, 0);
        } else {
            self.storage.truncate(size);
            self.storage.shrink_to_fit();
        }
        self.storage[capacity] = 0;

        log::trace!("text storage reallocated: capacity {previous} -> {capacity}");
        Ok(())
    }

    /// Makes room for at least `capacity` bytes of content.
    ///
    /// Nothing happens when the text is already large enough. Otherwise the
    /// capacity grows geometrically by the load factor, rounded to even
    /// values, and the storage is reallocated once.
    ///
    /// # Panics
    ///
    /// If `capacity` is [`SIZE_SENTINEL`] or the storage cannot be allocated.
    #[must_use]
    #[track_caller]
    pub fn expand_to_fit(self, capacity: usize) -> Self {
        self.try_expand_to_fit(capacity).or_fatal()
    }

    /// Fallible form of [`Text::expand_to_fit`]. The text is dropped on error.
    ///
    /// # Errors
    ///
    /// [`TextError::SentinelSize`] or [`TextError::Allocation`].
    pub fn try_expand_to_fit(mut self, capacity: usize) -> Result<Self, TextError> {
        let capacity = check_size(capacity)?;
        if capacity > self.capacity() {
            let grown = calculate_new_capacity(self.capacity(), capacity)?;
            self.reallocate(grown)?;
        }
        Ok(self)
    }

    /// Releases reserved space so that the capacity equals the length.
    ///
    /// The resulting capacity may be below [`DEFAULT_CAPACITY`] and may be
    /// odd.
    #[must_use]
    #[track_caller]
    pub fn shrink_to_fit(mut self) -> Self {
        if self.len < self.capacity() {
            self.reallocate(self.len).or_fatal();
        }
        self
    }

    // ------------------------------------------------------------------------------------------------
    // Content mutation
    // ------------------------------------------------------------------------------------------------

    /// Grows the content by `size` bytes at `index`, shifting the suffix
    /// right. The opened gap holds stale bytes the caller must overwrite.
    pub(crate) fn open_gap(self, index: usize, size: usize) -> Result<Self, TextError> {
        debug_assert!(index <= self.len);
        let len = self
            .len
            .checked_add(size)
            .ok_or(TextError::LengthOverflow)?;
        let mut text = self.try_expand_to_fit(len)?;
        text.storage.copy_within(index..text.len, index + size);
        text.terminate(len);
        Ok(text)
    }

    pub(crate) fn check_insert_index(&self, index: usize) -> Result<(), TextError> {
        if index > self.len {
            Err(TextError::OutOfRange {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// The content, writable.
    pub(crate) fn content_mut(&mut self) -> &mut [u8] {
        &mut self.storage[..self.len]
    }

    #[inline]
    fn terminate(&mut self, len: usize) {
        self.len = len;
        self.storage[len] = 0;
    }

    /// Replaces the whole content with `data`, growing first if needed.
    ///
    /// # Panics
    ///
    /// If the storage cannot be allocated.
    #[must_use]
    #[track_caller]
    pub fn overwrite_with_bytes(self, data: &[u8]) -> Self {
        self.try_overwrite_with_bytes(data).or_fatal()
    }

    /// Fallible form of [`Text::overwrite_with_bytes`].
    ///
    /// # Errors
    ///
    /// [`TextError::SentinelSize`] or [`TextError::Allocation`].
    pub fn try_overwrite_with_bytes(self, data: &[u8]) -> Result<Self, TextError> {
        let size = check_size(data.len())?;
        let mut text = self.try_expand_to_fit(size)?;
        text.storage[..size].copy_from_slice(data);
        text.terminate(size);
        Ok(text)
    }

    /// Replaces the content with `literal` up to its first zero byte.
    #[must_use]
    #[track_caller]
    pub fn overwrite_with_literal(self, literal: &str) -> Self {
        self.overwrite_with_bytes(literal_bytes(literal))
    }

    /// Replaces the content with a copy of `other`'s content.
    #[must_use]
    #[track_caller]
    pub fn overwrite(self, other: &Text) -> Self {
        self.overwrite_with_bytes(other.as_bytes())
    }

    /// Appends `data` after the current content.
    ///
    /// # Panics
    ///
    /// If `data` is empty, if the resulting length overflows, or if the
    /// storage cannot be allocated.
    #[must_use]
    #[track_caller]
    pub fn append_bytes(self, data: &[u8]) -> Self {
        self.try_append_bytes(data).or_fatal()
    }

    /// Fallible form of [`Text::append_bytes`].
    ///
    /// # Errors
    ///
    /// [`TextError::EmptyAppend`], [`TextError::SentinelSize`],
    /// [`TextError::LengthOverflow`] or [`TextError::Allocation`].
    pub fn try_append_bytes(self, data: &[u8]) -> Result<Self, TextError> {
        if data.is_empty() {
            return Err(TextError::EmptyAppend);
        }
        let size = check_size(data.len())?;
        let index = self.len;
        let mut text = self.open_gap(index, size)?;
        text.storage[index..index + size].copy_from_slice(data);
        Ok(text)
    }

    /// Appends `literal` up to its first zero byte.
    ///
    /// # Panics
    ///
    /// If that prefix is empty.
    #[must_use]
    #[track_caller]
    pub fn append_literal(self, literal: &str) -> Self {
        self.append_bytes(literal_bytes(literal))
    }

    /// Appends a copy of `other`'s content.
    ///
    /// # Panics
    ///
    /// If `other` is empty.
    #[must_use]
    #[track_caller]
    pub fn append(self, other: &Text) -> Self {
        self.append_bytes(other.as_bytes())
    }

    /// Inserts `data` at byte offset `index`.
    ///
    /// `0` prepends, `len()` appends, anything between splices. Inserting an
    /// empty slice leaves the text untouched.
    ///
    /// # Panics
    ///
    /// If `index > len()`, or if the storage cannot be allocated.
    #[must_use]
    #[track_caller]
    pub fn insert_bytes(self, index: usize, data: &[u8]) -> Self {
        self.try_insert_bytes(index, data).or_fatal()
    }

    /// Fallible form of [`Text::insert_bytes`].
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfRange`], [`TextError::SentinelSize`],
    /// [`TextError::LengthOverflow`] or [`TextError::Allocation`].
    pub fn try_insert_bytes(self, index: usize, data: &[u8]) -> Result<Self, TextError> {
        self.check_insert_index(index)?;
        let size = check_size(data.len())?;
        if size == 0 {
            return Ok(self);
        }
        let mut text = self.open_gap(index, size)?;
        text.storage[index..index + size].copy_from_slice(data);
        Ok(text)
    }

    /// Inserts `literal`, up to its first zero byte, at `index`.
    #[must_use]
    #[track_caller]
    pub fn insert_literal(self, index: usize, literal: &str) -> Self {
        self.insert_bytes(index, literal_bytes(literal))
    }

    /// Inserts a copy of `other`'s content at `index`.
    #[must_use]
    #[track_caller]
    pub fn insert(self, index: usize, other: &Text) -> Self {
        self.insert_bytes(index, other.as_bytes())
    }

    /// Appends a single byte.
    #[must_use]
    #[track_caller]
    pub fn push(self, byte: u8) -> Self {
        self.try_push(byte).or_fatal()
    }

    /// Fallible form of [`Text::push`].
    ///
    /// # Errors
    ///
    /// [`TextError::LengthOverflow`] or [`TextError::Allocation`].
    pub fn try_push(self, byte: u8) -> Result<Self, TextError> {
        self.try_append_bytes(&[byte])
    }

    /// Removes and returns the last byte.
    ///
    /// # Panics
    ///
    /// If the text is empty.
    #[track_caller]
    pub fn pop(&mut self) -> u8 {
        self.try_pop().or_fatal()
    }

    /// Fallible form of [`Text::pop`].
    ///
    /// # Errors
    ///
    /// [`TextError::Empty`].
    pub fn try_pop(&mut self) -> Result<u8, TextError> {
        let len = self.len.checked_sub(1).ok_or(TextError::Empty)?;
        let byte = self.storage[len];
        self.terminate(len);
        Ok(byte)
    }

    /// Removes the bytes in `range`, closing the gap. Capacity is unchanged.
    ///
    /// ```rust
    /// use textbuf::Text;
    ///
    /// let mut text = Text::from_literal("lorem ipsum");
    /// text.erase_range(5..);
    /// assert_eq!(text.as_bytes(), b"lorem");
    /// ```
    ///
    /// # Panics
    ///
    /// If the range is reversed or ends past `len()`.
    #[track_caller]
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) {
        self.try_erase_range(range).or_fatal();
    }

    /// Fallible form of [`Text::erase_range`]. The text is untouched on error.
    ///
    /// # Errors
    ///
    /// [`TextError::InvalidRange`]. Bounds at `usize::MAX` resolve to a
    /// saturated `usize::MAX` and are reported the same way.
    pub fn try_erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), TextError> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        if start > end || end > self.len {
            return Err(TextError::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        if start == end {
            return Ok(());
        }

        self.storage.copy_within(end..self.len, start);
        self.terminate(self.len - (end - start));
        Ok(())
    }

    /// Empties the text. Capacity and storage are kept.
    pub fn clear(&mut self) {
        self.terminate(0);
    }

    /// Declares the first `len` bytes of storage to be the content.
    ///
    /// Used after writing into [`Text::spare_capacity_mut`].
    ///
    /// # Panics
    ///
    /// If `len > capacity()`.
    #[track_caller]
    pub fn set_length(&mut self, len: usize) {
        self.try_set_length(len).or_fatal();
    }

    /// Fallible form of [`Text::set_length`].
    ///
    /// # Errors
    ///
    /// [`TextError::LengthExceedsCapacity`].
    pub fn try_set_length(&mut self, len: usize) -> Result<(), TextError> {
        if len > self.capacity() {
            return Err(TextError::LengthExceedsCapacity {
                len,
                capacity: self.capacity(),
            });
        }
        self.terminate(len);
        Ok(())
    }

    /// Folds ASCII letters to lowercase in place. Other bytes are untouched.
    pub fn lower(&mut self) {
        self.content_mut().make_ascii_lowercase();
    }

    /// Folds ASCII letters to uppercase in place. Other bytes are untouched.
    pub fn upper(&mut self) {
        self.content_mut().make_ascii_uppercase();
    }

    // ------------------------------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------------------------------

    /// Returns the byte at `index`.
    ///
    /// # Panics
    ///
    /// If `index >= len()`, whatever the capacity.
    #[must_use]
    #[track_caller]
    pub fn get(&self, index: usize) -> u8 {
        self.try_get(index).or_fatal()
    }

    /// Fallible form of [`Text::get`].
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfRange`].
    pub fn try_get(&self, index: usize) -> Result<u8, TextError> {
        self.as_bytes()
            .get(index)
            .copied()
            .ok_or(TextError::OutOfRange {
                index,
                len: self.len,
            })
    }

    /// Replaces the byte at `index` and returns the previous one.
    ///
    /// # Panics
    ///
    /// If `index >= len()`.
    #[track_caller]
    pub fn put(&mut self, index: usize, byte: u8) -> u8 {
        self.try_put(index, byte).or_fatal()
    }

    /// Fallible form of [`Text::put`].
    ///
    /// # Errors
    ///
    /// [`TextError::OutOfRange`].
    pub fn try_put(&mut self, index: usize, byte: u8) -> Result<u8, TextError> {
        let len = self.len;
        self.content_mut()
            .get_mut(index)
            .map(|slot| mem::replace(slot, byte))
            .ok_or(TextError::OutOfRange { index, len })
    }

    /// Number of content bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of bytes the text can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len() - 1
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte-wise equality of the contents. Capacity is ignored.
    #[must_use]
    pub fn equals(&self, other: &Text) -> bool {
        self == other
    }

    /// The content.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// The content followed by its zero terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage[..=self.len]
    }

    /// The content as a byte string.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }

    /// The reserved bytes between the content and the capacity.
    ///
    /// Bytes written here become content through [`Text::set_length`].
    pub fn spare_capacity_mut(&mut self) -> &mut [u8] {
        let capacity = self.capacity();
        &mut self.storage[self.len..capacity]
    }

    /// Consumes the text, returning its content.
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.storage.truncate(self.len);
        self.storage
    }
}

fn literal_bytes(literal: &str) -> &[u8] {
    let bytes = literal.as_bytes();
    match bytes.find_byte(0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Text {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            len: self.len,
        }
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl AsRef<[u8]> for Text {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&[u8]> for Text {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data)
    }
}

/// Keeps every byte of `s`, interior zeros included.
impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("content", &self.as_bstr())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Renders the content as UTF-8, substituting invalid sequences.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}
