//! Time crate backend (Date, PrimitiveDateTime, Time, Duration).

use time::{Duration, Month, PrimitiveDateTime};

use crate::error::Result;
use crate::value::{DateTime, Interval, TimeOfDay, Value};

use super::{seconds_to_micros, split_seconds, unrepresentable};

/// Temporal value in `time` crate types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeValue {
    /// DATE, or a timestamp literal without a time part
    Date(time::Date),
    DateTime(PrimitiveDateTime),
    Time(time::Time),
    /// INTERVAL with years and months folded into days
    Interval(Duration),
}

/// `infinity` and `-infinity` saturate to `Date::MAX` and `Date::MIN`.
pub(super) fn date_time_value(dt: DateTime) -> Result<Value> {
    if dt == DateTime::MAX {
        return Ok(Value::Time(TimeValue::Date(time::Date::MAX)));
    }
    if dt == DateTime::MIN {
        return Ok(Value::Time(TimeValue::Date(time::Date::MIN)));
    }

    let date = Month::try_from(dt.date.month)
        .and_then(|month| time::Date::from_calendar_date(dt.date.year, month, dt.date.day))
        .map_err(|_| unrepresentable("date", dt.date))?;

    Ok(Value::Time(match dt.time {
        None => TimeValue::Date(date),
        Some(t) => TimeValue::DateTime(PrimitiveDateTime::new(date, wall_time(t)?)),
    }))
}

pub(super) fn time_value(t: TimeOfDay) -> Result<Value> {
    wall_time(t).map(|t| Value::Time(TimeValue::Time(t)))
}

pub(super) fn interval_value(interval: Interval) -> Result<Value> {
    let days = interval.days.checked_mul(86_400).map(Duration::seconds);
    let micros = seconds_to_micros(interval.seconds).map(Duration::microseconds);
    days.zip(micros)
        .and_then(|(days, micros)| days.checked_add(micros))
        .map(|duration| Value::Time(TimeValue::Interval(duration)))
        .ok_or_else(|| unrepresentable("interval", interval))
}

fn wall_time(t: TimeOfDay) -> Result<time::Time> {
    let (secs, nanos) = split_seconds(t.second);
    u8::try_from(secs)
        .ok()
        .and_then(|secs| time::Time::from_hms_nano(t.hour, t.minute, secs, nanos).ok())
        .ok_or_else(|| unrepresentable("time", t))
}
