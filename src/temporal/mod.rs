//! DATE, TIMESTAMP, TIME and INTERVAL casts.
//!
//! Parsing is the same for every backend: a `sscanf`-style scanner for dates
//! and times, and [`IntervalScanner`] for intervals. The configured
//! [`TemporalBackend`] only decides which types the parsed fields end up in.

mod interval;
mod scan;

#[cfg(feature = "with-chrono")]
mod chrono;
#[cfg(feature = "with-time")]
mod time;

pub use interval::{IntervalField, IntervalScanner, parse_interval};

#[cfg(feature = "with-chrono")]
pub use self::chrono::ChronoValue;
#[cfg(feature = "with-time")]
pub use self::time::TimeValue;

use crate::cast::Cast;
use crate::context::CastContext;
use crate::error::{Error, Result};
use crate::opts::TemporalBackend;
use crate::value::{Date, DateTime, TimeOfDay, Value};

/// Parse `Y-M-D` or `Y-M-D H:M:S[.frac]`.
///
/// `infinity` and `-infinity` (any case) give [`DateTime::MAX`] and
/// [`DateTime::MIN`]. Text after the seconds, such as a zone offset, is ignored.
pub fn parse_date_time(bytes: &[u8]) -> Result<DateTime> {
    if bytes.eq_ignore_ascii_case(b"infinity") {
        return Ok(DateTime::MAX);
    }
    if bytes.eq_ignore_ascii_case(b"-infinity") {
        return Ok(DateTime::MIN);
    }

    let scanned = scan::scan(bytes, scan::DATE_TIME);
    let time = match scanned.count() {
        3 => None,
        6 => Some(TimeOfDay::new(
            scanned.int(3),
            scanned.int(4),
            scanned.float(5),
        )?),
        n => {
            return Err(Error::DateParse(format!(
                "unable to parse date {:?}: {} components",
                String::from_utf8_lossy(bytes),
                n
            )));
        }
    };
    let date = Date::new(scanned.int(0), scanned.int(1), scanned.int(2))?;
    Ok(DateTime { date, time })
}

/// Parse `H:M:S[.frac]`.
pub fn parse_time(bytes: &[u8]) -> Result<TimeOfDay> {
    let scanned = scan::scan(bytes, scan::TIME);
    if scanned.count() != 3 {
        return Err(Error::DateParse(format!(
            "unable to parse time {:?}: {} components",
            String::from_utf8_lossy(bytes),
            scanned.count()
        )));
    }
    TimeOfDay::new(scanned.int(0), scanned.int(1), scanned.float(2))
}

/// DATE, TIMESTAMP and TIMESTAMPTZ.
#[derive(Debug, Clone, Copy)]
pub struct DateCast {
    backend: TemporalBackend,
}

impl DateCast {
    pub const fn new(backend: TemporalBackend) -> Self {
        Self { backend }
    }
}

impl Cast for DateCast {
    fn name(&self) -> &'static str {
        "DATE"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        let parsed = parse_date_time(bytes)?;
        match self.backend {
            TemporalBackend::Native => Ok(Value::DateTime(parsed)),
            #[cfg(feature = "with-chrono")]
            TemporalBackend::Chrono => self::chrono::date_time_value(parsed),
            #[cfg(feature = "with-time")]
            TemporalBackend::Time => self::time::date_time_value(parsed),
        }
    }
}

/// TIME and TIMETZ.
#[derive(Debug, Clone, Copy)]
pub struct TimeCast {
    backend: TemporalBackend,
}

impl TimeCast {
    pub const fn new(backend: TemporalBackend) -> Self {
        Self { backend }
    }
}

impl Cast for TimeCast {
    fn name(&self) -> &'static str {
        "TIME"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        let parsed = parse_time(bytes)?;
        match self.backend {
            TemporalBackend::Native => Ok(Value::TimeOfDay(parsed)),
            #[cfg(feature = "with-chrono")]
            TemporalBackend::Chrono => self::chrono::time_value(parsed),
            #[cfg(feature = "with-time")]
            TemporalBackend::Time => self::time::time_value(parsed),
        }
    }
}

/// INTERVAL.
#[derive(Debug, Clone, Copy)]
pub struct IntervalCast {
    backend: TemporalBackend,
}

impl IntervalCast {
    pub const fn new(backend: TemporalBackend) -> Self {
        Self { backend }
    }
}

impl Cast for IntervalCast {
    fn name(&self) -> &'static str {
        "INTERVAL"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        let parsed = parse_interval(bytes);
        match self.backend {
            TemporalBackend::Native => Ok(Value::Interval(parsed)),
            #[cfg(feature = "with-chrono")]
            TemporalBackend::Chrono => self::chrono::interval_value(parsed),
            #[cfg(feature = "with-time")]
            TemporalBackend::Time => self::time::interval_value(parsed),
        }
    }
}

/// Whole seconds and nanoseconds of a non-negative seconds value.
#[cfg(any(feature = "with-chrono", feature = "with-time"))]
fn split_seconds(second: f64) -> (u32, u32) {
    let whole = second.trunc();
    let nanos = ((second - whole) * 1e9).round() as u32;
    (whole as u32, nanos.min(999_999_999))
}

/// Seconds as whole microseconds, if they fit in `i64`.
#[cfg(any(feature = "with-chrono", feature = "with-time"))]
fn seconds_to_micros(seconds: f64) -> Option<i64> {
    let micros = (seconds * 1e6).round();
    (micros.is_finite() && micros.abs() < 9.2e18).then_some(micros as i64)
}

#[cfg(any(feature = "with-chrono", feature = "with-time"))]
fn unrepresentable(what: &str, value: impl core::fmt::Debug) -> Error {
    Error::Parse(format!("{} not representable: {:?}", what, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::RawField;

    #[test]
    fn test_date_only() {
        let dt = parse_date_time(b"2024-01-02").unwrap();
        assert!(dt.is_date_only());
        assert_eq!(dt.date, Date::new(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_timestamp() {
        let dt = parse_date_time(b"2024-01-02 03:04:05").unwrap();
        let time = dt.time.unwrap();
        assert_eq!((time.hour, time.minute, time.second), (3, 4, 5.0));
    }

    #[test]
    fn test_timestamptz_suffix_ignored() {
        let dt = parse_date_time(b"2024-01-02 03:04:05.123456+02").unwrap();
        let second = dt.time.unwrap().second;
        assert!((second - 5.123456).abs() < 1e-9);
    }

    #[test]
    fn test_component_count() {
        for input in [&b"2024-01-02 03"[..], b"2024-01-02 03:04", b"2024", b"", b"today"] {
            assert!(
                matches!(parse_date_time(input), Err(Error::DateParse(_))),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_calendar_range() {
        assert!(matches!(parse_date_time(b"2024-02-30"), Err(Error::DateParse(_))));
        assert!(matches!(
            parse_date_time(b"2024-01-01 10:61:00"),
            Err(Error::DateParse(_))
        ));
    }

    #[test]
    fn test_infinity() {
        assert_eq!(parse_date_time(b"infinity").unwrap(), DateTime::MAX);
        assert_eq!(parse_date_time(b"-infinity").unwrap(), DateTime::MIN);
        assert_eq!(parse_date_time(b"Infinity").unwrap(), DateTime::MAX);
        assert_eq!(parse_date_time(b"-INFINITY").unwrap(), DateTime::MIN);
    }

    #[test]
    fn test_time() {
        let t = parse_time(b"10:30:45.5").unwrap();
        assert_eq!((t.hour, t.minute, t.second), (10, 30, 45.5));
        assert!(parse_time(b"10:30:45+05:30").is_ok());
        assert!(matches!(parse_time(b"10:30"), Err(Error::DateParse(_))));
        assert!(matches!(parse_time(b"25:00:00"), Err(Error::DateParse(_))));
    }

    #[test]
    fn test_native_casts() {
        let ctx = CastContext::default();
        let native = TemporalBackend::Native;
        assert!(matches!(
            DateCast::new(native).cast_text(b"2024-01-02", &ctx).unwrap(),
            Value::DateTime(_)
        ));
        assert!(matches!(
            TimeCast::new(native).cast_text(b"01:02:03", &ctx).unwrap(),
            Value::TimeOfDay(_)
        ));
        assert_eq!(
            IntervalCast::new(native).cast_text(b"3 days", &ctx).unwrap(),
            Value::Interval(crate::value::Interval::new(3, 0.0))
        );
    }

    #[test]
    fn test_null() {
        let ctx = CastContext::default();
        let native = TemporalBackend::Native;
        assert_eq!(DateCast::new(native).cast(RawField::null(), &ctx).unwrap(), Value::Null);
        assert_eq!(TimeCast::new(native).cast(RawField::null(), &ctx).unwrap(), Value::Null);
        assert_eq!(
            IntervalCast::new(native).cast(RawField::null(), &ctx).unwrap(),
            Value::Null
        );
    }

    #[cfg(any(feature = "with-chrono", feature = "with-time"))]
    #[test]
    fn test_split_seconds() {
        assert_eq!(split_seconds(5.25), (5, 250_000_000));
        assert_eq!(split_seconds(0.0), (0, 0));
        assert_eq!(seconds_to_micros(-1.5), Some(-1_500_000));
        assert_eq!(seconds_to_micros(f64::INFINITY), None);
    }
}
