//! Chrono backend (NaiveDate, NaiveDateTime, NaiveTime, TimeDelta).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::Result;
use crate::value::{DateTime, Interval, TimeOfDay, Value};

use super::{seconds_to_micros, split_seconds, unrepresentable};

/// Temporal value in chrono types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChronoValue {
    /// DATE, or a timestamp literal without a time part
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    /// INTERVAL with years and months folded into days
    Interval(TimeDelta),
}

/// `infinity` and `-infinity` saturate to `NaiveDate::MAX` and `NaiveDate::MIN`.
pub(super) fn date_time_value(dt: DateTime) -> Result<Value> {
    if dt == DateTime::MAX {
        return Ok(Value::Chrono(ChronoValue::Date(NaiveDate::MAX)));
    }
    if dt == DateTime::MIN {
        return Ok(Value::Chrono(ChronoValue::Date(NaiveDate::MIN)));
    }

    let date = NaiveDate::from_ymd_opt(
        dt.date.year,
        u32::from(dt.date.month),
        u32::from(dt.date.day),
    )
    .ok_or_else(|| unrepresentable("date", dt.date))?;

    Ok(Value::Chrono(match dt.time {
        None => ChronoValue::Date(date),
        Some(time) => ChronoValue::DateTime(date.and_time(naive_time(time)?)),
    }))
}

pub(super) fn time_value(time: TimeOfDay) -> Result<Value> {
    naive_time(time).map(|t| Value::Chrono(ChronoValue::Time(t)))
}

pub(super) fn interval_value(interval: Interval) -> Result<Value> {
    let days = TimeDelta::try_days(interval.days);
    let micros = seconds_to_micros(interval.seconds).map(TimeDelta::microseconds);
    days.zip(micros)
        .and_then(|(days, micros)| days.checked_add(&micros))
        .map(|delta| Value::Chrono(ChronoValue::Interval(delta)))
        .ok_or_else(|| unrepresentable("interval", interval))
}

fn naive_time(time: TimeOfDay) -> Result<NaiveTime> {
    let (secs, nanos) = split_seconds(time.second);
    NaiveTime::from_hms_nano_opt(u32::from(time.hour), u32::from(time.minute), secs, nanos)
        .ok_or_else(|| unrepresentable("time", time))
}
