//! Cast table options.

use url::Url;

use crate::context::{CastContext, ClientEncoding, DecodeErrors};
use crate::error::Error;

/// Representation produced for DATE, TIME, TIMESTAMP and INTERVAL columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemporalBackend {
    /// Crate-native [`DateTime`](crate::DateTime), [`TimeOfDay`](crate::TimeOfDay)
    /// and [`Interval`](crate::Interval)
    #[default]
    Native,
    /// `chrono` types
    #[cfg(feature = "with-chrono")]
    Chrono,
    /// `time` crate types
    #[cfg(feature = "with-time")]
    Time,
}

impl TemporalBackend {
    pub fn name(self) -> &'static str {
        match self {
            TemporalBackend::Native => "native",
            #[cfg(feature = "with-chrono")]
            TemporalBackend::Chrono => "chrono",
            #[cfg(feature = "with-time")]
            TemporalBackend::Time => "time",
        }
    }
}

/// What STRING columns (text, varchar, bpchar, name, char) cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextModel {
    /// Decoded text
    #[default]
    Text,
    /// Raw bytes
    Bytes,
}

/// How NUMERIC columns are cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalMode {
    /// Fixed-point when `with-rust-decimal` is compiled in, float otherwise
    #[default]
    Auto,
    /// Always float
    Float,
}

/// Options fixed when a [`CastTable`](crate::CastTable) is built.
#[derive(Debug, Clone, Default)]
pub struct CastOpts {
    /// Backend for the DATE, DATETIME, TIME and INTERVAL casts.
    ///
    /// Default: `TemporalBackend::Native`
    pub temporal_backend: TemporalBackend,

    /// Whether STRING casts to text or to bytes.
    ///
    /// Default: `TextModel::Text`
    pub text_model: TextModel,

    /// NUMERIC handling.
    ///
    /// Default: `DecimalMode::Auto`
    pub decimal: DecimalMode,

    /// Client encoding for [`CastOpts::context`].
    ///
    /// Default: `ClientEncoding::Utf8`
    pub client_encoding: ClientEncoding,

    /// Decode-error policy for [`CastOpts::context`].
    ///
    /// Default: `DecodeErrors::Strict`
    pub decode_errors: DecodeErrors,
}

impl CastOpts {
    /// Conversion context for these options.
    pub fn context(&self) -> CastContext {
        CastContext::new(self.client_encoding).with_decode_errors(self.decode_errors)
    }
}

impl TryFrom<&Url> for CastOpts {
    type Error = Error;

    /// Read cast options from the query string of a connection URL.
    ///
    /// Supported query parameters:
    /// - `temporal_backend`: native, chrono, time
    /// - `text_model`: text, bytes
    /// - `decimal`: auto, float
    /// - `client_encoding`: UTF8, SQL_ASCII, LATIN1
    /// - `decode_errors`: strict, replace
    ///
    /// Other parameters belong to the connection and are ignored.
    fn try_from(url: &Url) -> Result<Self, Self::Error> {
        if !["postgres", "pg"].contains(&url.scheme()) {
            return Err(Error::InvalidUsage(format!(
                "Invalid scheme: expected 'postgres://' or 'pg://', got '{}://'",
                url.scheme()
            )));
        }

        let mut opts = CastOpts::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "temporal_backend" => {
                    opts.temporal_backend = parse_backend(value.as_ref())?;
                }
                "text_model" => {
                    opts.text_model = match value.as_ref() {
                        "text" => TextModel::Text,
                        "bytes" => TextModel::Bytes,
                        _ => {
                            return Err(Error::InvalidUsage(format!(
                                "Invalid text_model: expected one of ['text', 'bytes'], got {}",
                                value
                            )));
                        }
                    };
                }
                "decimal" => {
                    opts.decimal = match value.as_ref() {
                        "auto" => DecimalMode::Auto,
                        "float" => DecimalMode::Float,
                        _ => {
                            return Err(Error::InvalidUsage(format!(
                                "Invalid decimal: expected one of ['auto', 'float'], got {}",
                                value
                            )));
                        }
                    };
                }
                "client_encoding" => {
                    opts.client_encoding = value.parse()?;
                }
                "decode_errors" => {
                    opts.decode_errors = value.parse()?;
                }
                _ => {}
            }
        }

        Ok(opts)
    }
}

impl TryFrom<&str> for CastOpts {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(s).map_err(|e| Error::InvalidUsage(format!("Invalid URL: {}", e)))?;
        Self::try_from(&url)
    }
}

fn parse_backend(value: &str) -> Result<TemporalBackend, Error> {
    match value {
        "native" => Ok(TemporalBackend::Native),
        #[cfg(feature = "with-chrono")]
        "chrono" => Ok(TemporalBackend::Chrono),
        #[cfg(not(feature = "with-chrono"))]
        "chrono" => Err(Error::Unsupported(
            "temporal_backend=chrono requires the with-chrono feature".into(),
        )),
        #[cfg(feature = "with-time")]
        "time" => Ok(TemporalBackend::Time),
        #[cfg(not(feature = "with-time"))]
        "time" => Err(Error::Unsupported(
            "temporal_backend=time requires the with-time feature".into(),
        )),
        _ => Err(Error::InvalidUsage(format!(
            "Invalid temporal_backend: expected one of ['native', 'chrono', 'time'], got {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = CastOpts::try_from("postgres://localhost/db").unwrap();
        assert_eq!(opts.temporal_backend, TemporalBackend::Native);
        assert_eq!(opts.text_model, TextModel::Text);
        assert_eq!(opts.decimal, DecimalMode::Auto);
        assert_eq!(opts.context(), CastContext::default());
    }

    #[test]
    fn test_query_params() {
        let opts = CastOpts::try_from(
            "postgres://u@localhost/db?sslmode=disable&text_model=bytes&decimal=float\
             &client_encoding=LATIN1&decode_errors=replace",
        )
        .unwrap();
        assert_eq!(opts.text_model, TextModel::Bytes);
        assert_eq!(opts.decimal, DecimalMode::Float);
        let ctx = opts.context();
        assert_eq!(ctx.encoding(), ClientEncoding::Latin1);
        assert_eq!(ctx.decode_errors(), DecodeErrors::Replace);
    }

    #[test]
    fn test_invalid_values() {
        assert!(CastOpts::try_from("postgres://localhost?text_model=blob").is_err());
        assert!(CastOpts::try_from("postgres://localhost?temporal_backend=mx").is_err());
        assert!(CastOpts::try_from("postgres://localhost?client_encoding=KOI8").is_err());
        assert!(CastOpts::try_from("mysql://localhost").is_err());
    }

    #[cfg(not(feature = "with-chrono"))]
    #[test]
    fn test_backend_not_compiled() {
        let err = CastOpts::try_from("postgres://localhost?temporal_backend=chrono").unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[cfg(feature = "with-chrono")]
    #[test]
    fn test_chrono_backend() {
        let opts = CastOpts::try_from("postgres://localhost?temporal_backend=chrono").unwrap();
        assert_eq!(opts.temporal_backend, TemporalBackend::Chrono);
    }
}
