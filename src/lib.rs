//! Typecasting of PostgreSQL text-format column values.
//!
//! # Features
//!
//! - **One call shape**: every cast implements [`Cast`], so a value can be cast
//!   knowing only its type OID
//! - **Dispatch table**: [`CastTable`] maps OIDs to casts, built once from [`CastOpts`]
//! - **Hand-rolled temporal parsers**: dates, times and intervals are parsed in a
//!   single pass with no parsing library
//! - **Pluggable temporal types**: native types, `chrono` (`with-chrono`) or `time` (`with-time`)
//! - **Fixed-point NUMERIC** with `rust_decimal` (`with-rust-decimal`), float otherwise
//!
//! # Example
//!
//! ```
//! use zero_postgres_cast::{oid, CastOpts, CastTable, RawField, Value};
//!
//! fn main() -> zero_postgres_cast::Result<()> {
//!     let opts = CastOpts::try_from("postgres://localhost/mydb?client_encoding=UTF8")?;
//!     let table = CastTable::new(&opts);
//!     let ctx = opts.context();
//!
//!     let value = table.cast(oid::INT4, RawField::new(b"42"), &ctx)?;
//!     assert_eq!(value, Value::Integer(42));
//!
//!     let interval = table.cast(oid::INTERVAL, RawField::new(b"1 day 01:00:00"), &ctx)?;
//!     assert_eq!(interval.as_interval().map(|i| i.days), Some(1));
//!     Ok(())
//! }
//! ```

pub mod cast;
pub mod context;
pub mod error;
pub mod field;
pub mod oid;
pub mod opts;
pub mod table;
pub mod temporal;
pub mod value;

pub use cast::{Cast, DecimalSupport};
pub use context::{CastContext, ClientEncoding, DecodeErrors};
pub use error::{Error, Result};
pub use field::RawField;
pub use oid::Oid;
pub use opts::{CastOpts, DecimalMode, TemporalBackend, TextModel};
pub use table::{CastRef, CastTable, CastTableBuilder};
pub use value::{Date, DateTime, Interval, TimeOfDay, Value};

#[cfg(feature = "with-chrono")]
pub use temporal::ChronoValue;
#[cfg(feature = "with-time")]
pub use temporal::TimeValue;
