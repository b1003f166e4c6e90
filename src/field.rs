//! Raw column values as delivered by the wire layer.

use crate::error::{Error, Result};

/// Borrowed view of one column value in text format.
///
/// `None` is SQL NULL. A non-null field never extends past the buffer it was
/// built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawField<'a>(Option<&'a [u8]>);

impl<'a> RawField<'a> {
    /// SQL NULL.
    pub const fn null() -> Self {
        Self(None)
    }

    /// A non-null value spanning all of `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self(Some(bytes))
    }

    /// Build a field from a buffer and a declared length.
    ///
    /// `buf == None` is NULL whatever the length. Bytes after `len` are never
    /// visible through the field, so the buffer need not be terminated at `len`.
    pub fn from_parts(buf: Option<&'a [u8]>, len: usize) -> Result<Self> {
        match buf {
            None => Ok(Self(None)),
            Some(buf) => buf.get(..len).map(|s| Self(Some(s))).ok_or_else(|| {
                Error::InvalidUsage(format!(
                    "field length {} exceeds buffer of {} bytes",
                    len,
                    buf.len()
                ))
            }),
        }
    }

    /// Returns true for SQL NULL.
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// The value bytes, or `None` for NULL.
    pub const fn bytes(&self) -> Option<&'a [u8]> {
        self.0
    }

    /// Length in bytes (0 for NULL).
    pub fn len(&self) -> usize {
        self.0.map_or(0, <[u8]>::len)
    }

    /// Returns true for NULL and for empty non-null values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<Option<&'a [u8]>> for RawField<'a> {
    fn from(value: Option<&'a [u8]>) -> Self {
        Self(value)
    }
}

impl<'a> From<&'a [u8]> for RawField<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self(Some(value))
    }
}

impl<'a> From<&'a str> for RawField<'a> {
    fn from(value: &'a str) -> Self {
        Self(Some(value.as_bytes()))
    }
}
