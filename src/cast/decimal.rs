//! NUMERIC cast.
//!
//! NUMERIC becomes a `rust_decimal::Decimal` when the `with-rust-decimal`
//! feature is compiled in and the table options allow it. Otherwise it falls
//! back to `f64`. The choice is made once, when the cast table is built.
//!
//! A literal `Decimal` cannot hold exactly (`NaN`, `Infinity`, more than 28
//! significant digits) is cast to `f64` as well, never rounded to fit.

use crate::context::CastContext;
use crate::error::Result;
use crate::opts::DecimalMode;
use crate::value::Value;

use super::{Cast, FloatCast};

/// Whether fixed-point NUMERIC values are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalSupport {
    /// Cast NUMERIC to [`Value::Decimal`]
    #[cfg(feature = "with-rust-decimal")]
    FixedPoint,
    /// Cast NUMERIC to [`Value::Float`]
    Float,
}

impl DecimalSupport {
    /// Resolve the capability for the given mode.
    pub fn detect(mode: DecimalMode) -> Self {
        match mode {
            #[cfg(feature = "with-rust-decimal")]
            DecimalMode::Auto => DecimalSupport::FixedPoint,
            #[cfg(not(feature = "with-rust-decimal"))]
            DecimalMode::Auto => DecimalSupport::Float,
            DecimalMode::Float => DecimalSupport::Float,
        }
    }
}

/// NUMERIC, as fixed-point or float depending on [`DecimalSupport`].
#[derive(Debug, Clone, Copy)]
pub struct DecimalCast {
    support: DecimalSupport,
}

impl DecimalCast {
    pub const fn new(support: DecimalSupport) -> Self {
        Self { support }
    }

    pub const fn support(&self) -> DecimalSupport {
        self.support
    }
}

impl Cast for DecimalCast {
    fn name(&self) -> &'static str {
        "DECIMAL"
    }

    fn cast_text(&self, bytes: &[u8], ctx: &CastContext) -> Result<Value> {
        match self.support {
            #[cfg(feature = "with-rust-decimal")]
            DecimalSupport::FixedPoint => parse_decimal(bytes, ctx),
            DecimalSupport::Float => FloatCast.cast_text(bytes, ctx),
        }
    }
}

#[cfg(feature = "with-rust-decimal")]
fn parse_decimal(bytes: &[u8], ctx: &CastContext) -> Result<Value> {
    use rust_decimal::Decimal;

    let s = super::number_str("decimal", bytes)?;

    let exact = if s.contains(['e', 'E']) {
        Decimal::from_scientific(s)
    } else {
        Decimal::from_str_exact(s)
    };
    match exact {
        Ok(d) => Ok(Value::Decimal(d)),
        Err(e) => {
            tracing::trace!(error = %e, "numeric literal does not fit Decimal, casting to float");
            FloatCast.cast_text(bytes, ctx)
        }
    }
}
