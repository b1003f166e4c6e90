//! Per-connection conversion context.
//!
//! The connection owns a [`CastContext`] and lends it to every cast. Casts only
//! read it; text converters use it to decode bytes and to decide what to do
//! with bytes that are not valid in the client encoding.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Client encoding reported by the server (`client_encoding` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// 7-bit ASCII; bytes above 0x7F are rejected
    SqlAscii,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl ClientEncoding {
    /// Server-side name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            ClientEncoding::Utf8 => "UTF8",
            ClientEncoding::SqlAscii => "SQL_ASCII",
            ClientEncoding::Latin1 => "LATIN1",
        }
    }
}

impl fmt::Display for ClientEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClientEncoding {
    type Err = Error;

    /// Parse a server encoding name. Case and `-`/`_` separators are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "UTF8" | "UNICODE" => Ok(ClientEncoding::Utf8),
            "SQLASCII" | "ASCII" => Ok(ClientEncoding::SqlAscii),
            "LATIN1" | "ISO88591" => Ok(ClientEncoding::Latin1),
            _ => Err(Error::Unsupported(format!("client encoding {:?}", s))),
        }
    }
}

/// What a text cast does with bytes that are invalid in the client encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeErrors {
    /// Fail the cast with [`Error::Decoding`]
    #[default]
    Strict,
    /// Substitute U+FFFD and log a warning
    Replace,
}

impl FromStr for DecodeErrors {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(DecodeErrors::Strict),
            "replace" => Ok(DecodeErrors::Replace),
            _ => Err(Error::InvalidUsage(format!(
                "invalid decode_errors: {} (expected strict or replace)",
                s
            ))),
        }
    }
}

/// Read-only state a connection hands to every cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastContext {
    encoding: ClientEncoding,
    errors: DecodeErrors,
}

impl CastContext {
    /// Context for a connection using `encoding`, failing on invalid bytes.
    pub const fn new(encoding: ClientEncoding) -> Self {
        Self {
            encoding,
            errors: DecodeErrors::Strict,
        }
    }

    /// Replace the decode-error policy.
    pub const fn with_decode_errors(mut self, errors: DecodeErrors) -> Self {
        self.errors = errors;
        self
    }

    /// Active client encoding.
    pub const fn encoding(&self) -> ClientEncoding {
        self.encoding
    }

    /// Active decode-error policy.
    pub const fn decode_errors(&self) -> DecodeErrors {
        self.errors
    }

    /// Decode `bytes` in the client encoding.
    ///
    /// Borrows when the bytes are already valid UTF-8 text.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        match self.encoding {
            ClientEncoding::Utf8 => match simdutf8::compat::from_utf8(bytes) {
                Ok(s) => Ok(Cow::Borrowed(s)),
                Err(e) => self.report(format!(
                    "invalid byte sequence at offset {}",
                    e.valid_up_to()
                ))
                .map(|()| String::from_utf8_lossy(bytes)),
            },
            ClientEncoding::SqlAscii => match bytes.iter().position(|b| !b.is_ascii()) {
                // ASCII is a subset of UTF-8
                None => simdutf8::basic::from_utf8(bytes)
                    .map(Cow::Borrowed)
                    .map_err(|_| self.failure("invalid ASCII".into())),
                Some(pos) => self
                    .report(format!(
                        "byte 0x{:02x} at offset {} is not ASCII",
                        bytes[pos], pos
                    ))
                    .map(|()| {
                        Cow::Owned(
                            bytes
                                .iter()
                                .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
                                .collect(),
                        )
                    }),
            },
            ClientEncoding::Latin1 => {
                if bytes.is_ascii() {
                    simdutf8::basic::from_utf8(bytes)
                        .map(Cow::Borrowed)
                        .map_err(|_| self.failure("invalid ASCII".into()))
                } else {
                    Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
                }
            }
        }
    }

    /// Apply the decode-error policy. `Ok(())` means continue with replacement.
    fn report(&self, message: String) -> Result<()> {
        match self.errors {
            DecodeErrors::Strict => Err(self.failure(message)),
            DecodeErrors::Replace => {
                tracing::warn!(encoding = %self.encoding, "{}; replacing", message);
                Ok(())
            }
        }
    }

    fn failure(&self, message: String) -> Error {
        Error::Decoding {
            encoding: self.encoding,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_names() {
        assert_eq!("UTF8".parse::<ClientEncoding>().unwrap(), ClientEncoding::Utf8);
        assert_eq!("unicode".parse::<ClientEncoding>().unwrap(), ClientEncoding::Utf8);
        assert_eq!(
            "SQL_ASCII".parse::<ClientEncoding>().unwrap(),
            ClientEncoding::SqlAscii
        );
        assert_eq!(
            "iso-8859-1".parse::<ClientEncoding>().unwrap(),
            ClientEncoding::Latin1
        );
        assert!("EUC_JP".parse::<ClientEncoding>().is_err());
    }

    #[test]
    fn test_utf8_borrows() {
        let ctx = CastContext::default();
        let s = ctx.decode("héllo".as_bytes()).unwrap();
        assert!(matches!(s, Cow::Borrowed("héllo")));
    }

    #[test]
    fn test_utf8_strict() {
        let ctx = CastContext::default();
        let err = ctx.decode(b"ab\xffcd").unwrap_err();
        assert!(matches!(
            err,
            Error::Decoding {
                encoding: ClientEncoding::Utf8,
                ..
            }
        ));
    }

    #[test]
    fn test_utf8_replace() {
        let ctx = CastContext::default().with_decode_errors(DecodeErrors::Replace);
        assert_eq!(ctx.decode(b"ab\xffcd").unwrap(), "ab\u{FFFD}cd");
    }

    #[test]
    fn test_ascii() {
        let ctx = CastContext::new(ClientEncoding::SqlAscii);
        assert_eq!(ctx.decode(b"plain").unwrap(), "plain");
        assert!(ctx.decode(b"caf\xe9").is_err());
        let lossy = ctx.with_decode_errors(DecodeErrors::Replace);
        assert_eq!(lossy.decode(b"caf\xe9").unwrap(), "caf\u{FFFD}");
    }

    #[test]
    fn test_latin1() {
        let ctx = CastContext::new(ClientEncoding::Latin1);
        assert_eq!(ctx.decode(b"caf\xe9").unwrap(), "caf\u{e9}");
    }
}
