//! INTERVAL text parser.
//!
//! The server prints intervals as optional calendar fields followed by an
//! optional clock field, each of which may be missing:
//!
//! ```text
//! 1 year 2 mons 3 days 04:05:06.789
//! -1 days +02:03:00
//! -04:05:06
//! ```
//!
//! [`IntervalScanner`] reads that in one forward pass, one byte at a time.
//! A digit feeds the running value; a unit letter or a clock separator
//! commits it to the field it marks. The field cursor only moves forward, so
//! a marker for a field already passed is ignored. Anything else, including
//! malformed input, is skipped.

use tracing::trace;

use crate::value::Interval;

/// Field the next committed value goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntervalField {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
    /// Digits after the seconds' decimal point
    Fraction,
}

/// Single-pass interval parser state.
#[derive(Debug, Clone)]
pub struct IntervalScanner {
    years: i64,
    months: i64,
    days: i64,
    hours: f64,
    minutes: f64,
    seconds: f64,
    fraction: f64,
    value: f64,
    sign: f64,
    denominator: f64,
    field: IntervalField,
    skip_word: bool,
}

impl Default for IntervalScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalScanner {
    pub const fn new() -> Self {
        Self {
            years: 0,
            months: 0,
            days: 0,
            hours: 0.0,
            minutes: 0.0,
            seconds: 0.0,
            fraction: 0.0,
            value: 0.0,
            sign: 1.0,
            denominator: 1.0,
            field: IntervalField::Years,
            skip_word: false,
        }
    }

    /// Field the cursor is on.
    pub fn field(&self) -> IntervalField {
        self.field
    }

    /// Feed one input byte.
    pub fn step(&mut self, b: u8) {
        // rest of a unit word such as "years" or "mons"
        if self.skip_word {
            if b == b' ' {
                self.skip_word = false;
            }
            return;
        }

        match b {
            b'-' => self.sign = -1.0,
            b'0'..=b'9' => {
                self.value = self.value * 10.0 + f64::from(b - b'0');
                if self.field == IntervalField::Fraction {
                    self.denominator *= 10.0;
                }
            }
            b'y' if self.field == IntervalField::Years => {
                self.years = self.take_signed();
                trace!(years = self.years, "interval field");
                self.advance_past_unit(IntervalField::Months);
            }
            b'm' if self.field <= IntervalField::Months => {
                self.months = self.take_signed();
                trace!(months = self.months, "interval field");
                self.advance_past_unit(IntervalField::Days);
            }
            b'd' if self.field <= IntervalField::Days => {
                self.days = self.take_signed();
                trace!(days = self.days, "interval field");
                self.advance_past_unit(IntervalField::Hours);
            }
            b':' if self.field <= IntervalField::Hours => {
                self.hours = self.take_unsigned();
                self.field = IntervalField::Minutes;
            }
            b':' if self.field == IntervalField::Minutes => {
                self.minutes = self.take_unsigned();
                self.field = IntervalField::Seconds;
            }
            b'.' if self.field == IntervalField::Seconds => {
                self.seconds = self.take_unsigned();
                self.field = IntervalField::Fraction;
            }
            _ => {}
        }
    }

    /// Flush the open clock field and compose the interval.
    ///
    /// Years count as 365 days and months as 30 days. A minus sign seen in
    /// the clock part negates the whole clock value.
    pub fn finish(mut self) -> Interval {
        match self.field {
            IntervalField::Minutes => self.minutes = self.value,
            IntervalField::Seconds => self.seconds = self.value,
            IntervalField::Fraction => self.fraction = self.value / self.denominator,
            _ => {}
        }

        let clock = self.fraction + self.seconds + self.minutes * 60.0 + self.hours * 3600.0;
        let seconds = if self.sign < 0.0 { -clock } else { clock };
        let days = self
            .days
            .saturating_add(self.years.saturating_mul(365))
            .saturating_add(self.months.saturating_mul(30));

        trace!(days, seconds, "interval parsed");
        Interval::new(days, seconds)
    }

    fn take_signed(&mut self) -> i64 {
        let v = (self.value * self.sign) as i64;
        self.value = 0.0;
        self.sign = 1.0;
        v
    }

    fn take_unsigned(&mut self) -> f64 {
        let v = self.value;
        self.value = 0.0;
        v
    }

    fn advance_past_unit(&mut self, next: IntervalField) {
        self.field = next;
        self.skip_word = true;
    }
}

/// Parse an interval literal. Never fails; unrecognized input is skipped.
pub fn parse_interval(bytes: &[u8]) -> Interval {
    let mut scanner = IntervalScanner::new();
    for &b in bytes {
        scanner.step(b);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_interval(input: &str, days: i64, seconds: f64) {
        let parsed = parse_interval(input.as_bytes());
        assert_eq!(parsed.days, days, "days of {:?}", input);
        assert!(
            (parsed.seconds - seconds).abs() < 1e-9,
            "seconds of {:?}: {} != {}",
            input,
            parsed.seconds,
            seconds
        );
    }

    #[test]
    fn test_full_interval() {
        assert_interval("1 year 2 mons 3 days 04:05:06.789", 428, 14706.789);
    }

    #[test]
    fn test_negative_clock() {
        assert_interval("-04:05:06", 0, -14706.0);
    }

    #[test]
    fn test_mixed_signs() {
        assert_interval("-1 days +02:03:00", -1, 7380.0);
        assert_interval("-1 years -2 mons", -365 - 60, 0.0);
    }

    #[test]
    fn test_calendar_only() {
        assert_interval("3 days", 3, 0.0);
        assert_interval("1 mon", 30, 0.0);
        assert_interval("2 years", 730, 0.0);
        assert_interval("1 year 1 day", 366, 0.0);
    }

    #[test]
    fn test_clock_only() {
        assert_interval("00:00:00", 0, 0.0);
        assert_interval("12:30", 0, 45000.0);
        assert_interval("00:00:01.5", 0, 1.5);
        assert_interval("00:00:00.000001", 0, 0.000001);
    }

    #[test]
    fn test_fraction_precision() {
        // digit count sets the scale
        assert_interval("00:00:00.05", 0, 0.05);
        assert_interval("00:00:00.5", 0, 0.5);
        assert_interval("00:00:00.500", 0, 0.5);
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_interval("", 0, 0.0);
        assert_interval("garbage", 0, 0.0);
        // a bare number without a marker is dropped
        assert_interval("5", 0, 0.0);
    }

    #[test]
    fn test_markers_do_not_go_back() {
        // 'y' after days is ignored
        assert_interval("3 days 4 y", 3, 0.0);
        // a third ':' is ignored, so the digits run on into the seconds
        assert_interval("01:02:03:04", 0, 3600.0 + 120.0 + 304.0);
    }

    #[test]
    fn test_field_cursor() {
        let mut scanner = IntervalScanner::new();
        assert_eq!(scanner.field(), IntervalField::Years);
        for &b in b"2 mons " {
            scanner.step(b);
        }
        assert_eq!(scanner.field(), IntervalField::Days);
        for &b in b"01:02:03." {
            scanner.step(b);
        }
        assert_eq!(scanner.field(), IntervalField::Fraction);
    }
}
