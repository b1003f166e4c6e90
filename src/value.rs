//! Typed values produced by casts.

use crate::error::{Error, Result};

#[cfg(feature = "with-chrono")]
use crate::temporal::ChronoValue;
#[cfg(feature = "with-time")]
use crate::temporal::TimeValue;

/// Result of casting one column value.
///
/// Every cast builds a fresh value; nothing is shared with the input buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// INT2, INT4 and OID columns
    Integer(i64),
    /// INT8 columns
    WideInteger(i128),
    /// FLOAT4 and FLOAT8, and NUMERIC without fixed-point support or too wide for it
    Float(f64),
    /// NUMERIC as a fixed-point decimal
    #[cfg(feature = "with-rust-decimal")]
    Decimal(rust_decimal::Decimal),
    /// Verbatim bytes
    Bytes(Vec<u8>),
    /// Text decoded in the client encoding
    Text(String),
    /// BOOL
    Boolean(bool),
    /// DATE, TIMESTAMP and TIMESTAMPTZ (native backend)
    DateTime(DateTime),
    /// TIME and TIMETZ (native backend)
    TimeOfDay(TimeOfDay),
    /// INTERVAL (native backend)
    Interval(Interval),
    /// Temporal value from the chrono backend
    #[cfg(feature = "with-chrono")]
    Chrono(ChronoValue),
    /// Temporal value from the time backend
    #[cfg(feature = "with-time")]
    Time(TimeValue),
}

impl Value {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::WideInteger(_) => "wide integer",
            Value::Float(_) => "float",
            #[cfg(feature = "with-rust-decimal")]
            Value::Decimal(_) => "decimal",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
            Value::DateTime(_) => "datetime",
            Value::TimeOfDay(_) => "time",
            Value::Interval(_) => "interval",
            #[cfg(feature = "with-chrono")]
            Value::Chrono(_) => "chrono",
            #[cfg(feature = "with-time")]
            Value::Time(_) => "time crate",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer value, if it fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::WideInteger(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Integer(v) => Some(i128::from(*v)),
            Value::WideInteger(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[cfg(feature = "with-rust-decimal")]
    pub fn as_decimal(&self) -> Option<rust_decimal::Decimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Value::DateTime(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time_of_day(&self) -> Option<&TimeOfDay> {
        match self {
            Value::TimeOfDay(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_interval(&self) -> Option<&Interval> {
        match self {
            Value::Interval(v) => Some(v),
            _ => None,
        }
    }
}

/// Calendar date with a wide year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// Stand-in for `infinity`.
    pub const MAX: Date = Date {
        year: 999_999,
        month: 12,
        day: 31,
    };

    /// Stand-in for `-infinity`.
    pub const MIN: Date = Date {
        year: -999_998,
        month: 1,
        day: 1,
    };

    /// Build a date, checking the month and the day of month.
    pub fn new(year: i32, month: i32, day: i32) -> Result<Self> {
        let month = u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| Error::DateParse(format!("month out of range: {}", month)))?;
        let day = u8::try_from(day)
            .ok()
            .filter(|d| *d >= 1 && *d <= days_in_month(year, month))
            .ok_or_else(|| Error::DateParse(format!("day out of range: {}", day)))?;
        Ok(Self { year, month, day })
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Wall-clock time. Seconds carry the fractional part.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hour: 0,
        minute: 0,
        second: 0.0,
    };

    /// Build a time of day. Hour 24 is accepted, as the server emits `24:00:00`.
    pub fn new(hour: i32, minute: i32, second: f64) -> Result<Self> {
        let hour = u8::try_from(hour)
            .ok()
            .filter(|h| *h <= 24)
            .ok_or_else(|| Error::DateParse(format!("hour out of range: {}", hour)))?;
        let minute = u8::try_from(minute)
            .ok()
            .filter(|m| *m <= 59)
            .ok_or_else(|| Error::DateParse(format!("minute out of range: {}", minute)))?;
        if !(0.0..61.0).contains(&second) {
            return Err(Error::DateParse(format!("second out of range: {}", second)));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Seconds since midnight.
    pub fn seconds_from_midnight(&self) -> f64 {
        f64::from(self.hour) * 3600.0 + f64::from(self.minute) * 60.0 + self.second
    }
}

/// Date with an optional time part.
///
/// `time` is `None` when the literal carried only a date.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DateTime {
    pub date: Date,
    pub time: Option<TimeOfDay>,
}

impl DateTime {
    pub const MAX: DateTime = DateTime {
        date: Date::MAX,
        time: None,
    };

    pub const MIN: DateTime = DateTime {
        date: Date::MIN,
        time: None,
    };

    pub fn is_date_only(&self) -> bool {
        self.time.is_none()
    }

    /// Time part, or midnight for a date-only value.
    pub fn time_or_midnight(&self) -> TimeOfDay {
        self.time.unwrap_or(TimeOfDay::MIDNIGHT)
    }
}

/// Duration as a flat day count plus signed seconds.
///
/// Years and months are folded into days at 365 and 30 days each.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Interval {
    pub days: i64,
    pub seconds: f64,
}

impl Interval {
    pub const fn new(days: i64, seconds: f64) -> Self {
        Self { days, seconds }
    }

    /// Whole interval in seconds.
    pub fn total_seconds(&self) -> f64 {
        self.days as f64 * 86_400.0 + self.seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_validation() {
        assert!(Date::new(2024, 2, 29).is_ok());
        assert!(Date::new(2023, 2, 29).is_err());
        assert!(Date::new(1900, 2, 29).is_err());
        assert!(Date::new(2000, 2, 29).is_ok());
        assert!(Date::new(2024, 13, 1).is_err());
        assert!(Date::new(2024, 4, 31).is_err());
        assert!(Date::new(2024, 1, 0).is_err());
    }

    #[test]
    fn test_time_validation() {
        assert!(TimeOfDay::new(24, 0, 0.0).is_ok());
        assert!(TimeOfDay::new(25, 0, 0.0).is_err());
        assert!(TimeOfDay::new(10, 60, 0.0).is_err());
        assert!(TimeOfDay::new(10, 0, 60.5).is_ok());
        assert!(TimeOfDay::new(10, 0, -1.0).is_err());
    }

    #[test]
    fn test_sentinel_order() {
        assert!(Date::MIN < Date::new(1, 1, 1).unwrap());
        assert!(Date::MAX > Date::new(9999, 12, 31).unwrap());
    }

    #[test]
    fn test_time_helpers() {
        let t = TimeOfDay::new(1, 2, 3.5).unwrap();
        assert_eq!(t.seconds_from_midnight(), 3723.5);

        let date = Date::new(2024, 1, 2).unwrap();
        let date_only = DateTime { date, time: None };
        assert_eq!(date_only.time_or_midnight(), TimeOfDay::MIDNIGHT);
        let with_time = DateTime {
            date,
            time: Some(t),
        };
        assert_eq!(with_time.time_or_midnight(), t);
    }

    #[test]
    fn test_interval_total_seconds() {
        assert_eq!(Interval::new(1, 30.0).total_seconds(), 86_430.0);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::WideInteger(7).as_i64(), Some(7));
        assert_eq!(Value::WideInteger(i128::MAX).as_i64(), None);
        assert_eq!(Value::Integer(-3).as_i128(), Some(-3));
        assert_eq!(Value::Text("x".into()).as_str(), Some("x"));
        assert!(Value::Null.is_null());
        assert_eq!(Value::Boolean(true).kind(), "boolean");
    }
}
