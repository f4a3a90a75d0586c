//! CF time coordinates: calendars, `<unit> since <reference>` units and
//! decoding of numeric offsets into calendar datetimes.
//!
//! Gregorian calendars go through chrono. The fixed-length calendars
//! (`noleap`, `all_leap`, `360_day`) cannot be represented by chrono types, so
//! [`CfDatetime`] stores broken-down fields and the arithmetic is done on day
//! counts.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CfError, CfResult};

const SECONDS_PER_DAY: i64 = 86_400;

const CUMULATIVE_DAYS_365: [u32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const CUMULATIVE_DAYS_366: [u32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

/// CF calendar attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Calendar {
    /// `standard` / `gregorian`. Treated as proleptic Gregorian; the Julian
    /// segment before 1582-10-15 is not modeled.
    Standard,
    ProlepticGregorian,
    NoLeap,
    AllLeap,
    Day360,
}

impl Calendar {
    /// Parse a CF `calendar` attribute (case-insensitive).
    pub fn parse(s: &str) -> CfResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "gregorian" => Ok(Calendar::Standard),
            "proleptic_gregorian" => Ok(Calendar::ProlepticGregorian),
            "noleap" | "365_day" => Ok(Calendar::NoLeap),
            "all_leap" | "366_day" => Ok(Calendar::AllLeap),
            "360_day" => Ok(Calendar::Day360),
            other => Err(CfError::UnsupportedCalendar(other.to_string())),
        }
    }

    /// Canonical CF name.
    pub fn name(&self) -> &'static str {
        match self {
            Calendar::Standard => "standard",
            Calendar::ProlepticGregorian => "proleptic_gregorian",
            Calendar::NoLeap => "noleap",
            Calendar::AllLeap => "all_leap",
            Calendar::Day360 => "360_day",
        }
    }

    fn is_gregorian(&self) -> bool {
        matches!(self, Calendar::Standard | Calendar::ProlepticGregorian)
    }

    /// Year length for the fixed-length calendars.
    fn fixed_year_days(&self) -> Option<i64> {
        match self {
            Calendar::NoLeap => Some(365),
            Calendar::AllLeap => Some(366),
            Calendar::Day360 => Some(360),
            _ => None,
        }
    }

    fn day_of_year_offset(&self, month: u32) -> i64 {
        let idx = (month - 1) as usize;
        match self {
            Calendar::Day360 => idx as i64 * 30,
            Calendar::AllLeap => CUMULATIVE_DAYS_366[idx] as i64,
            _ => CUMULATIVE_DAYS_365[idx] as i64,
        }
    }

    /// Number of days in `month`, or `None` for a month outside 1..=12.
    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let idx = month as usize;
        match self {
            Calendar::Day360 => Some(30),
            Calendar::AllLeap => Some(CUMULATIVE_DAYS_366[idx] - CUMULATIVE_DAYS_366[idx - 1]),
            Calendar::NoLeap => Some(CUMULATIVE_DAYS_365[idx] - CUMULATIVE_DAYS_365[idx - 1]),
            Calendar::Standard | Calendar::ProlepticGregorian => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?
                };
                u32::try_from(next.signed_duration_since(first).num_days()).ok()
            }
        }
    }

    fn month_from_day_of_year(&self, doy: i64) -> (u32, u32) {
        if let Calendar::Day360 = self {
            return ((doy / 30) as u32 + 1, (doy % 30) as u32 + 1);
        }
        let table = if let Calendar::AllLeap = self {
            &CUMULATIVE_DAYS_366
        } else {
            &CUMULATIVE_DAYS_365
        };
        let month = (1..=12)
            .rev()
            .find(|&m| table[m - 1] as i64 <= doy)
            .unwrap_or(1);
        (month as u32, (doy - table[month - 1] as i64) as u32 + 1)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Calendar::Standard
    }
}

/// A datetime in an arbitrary CF calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CfDatetime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub calendar: Calendar,
}

impl CfDatetime {
    pub fn new(year: i32, month: u32, day: u32, calendar: Calendar) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            calendar,
        }
    }

    pub fn with_time(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    fn from_naive(dt: NaiveDateTime, calendar: Calendar) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            calendar,
        }
    }

    /// Convert to a chrono datetime. Only defined for Gregorian calendars.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        if !self.calendar.is_gregorian() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)
    }

    fn seconds_of_day(&self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    /// Shift by a (possibly negative) number of seconds within the calendar.
    ///
    /// Results outside the representable range are an error.
    pub fn add_seconds(&self, seconds: i64) -> CfResult<Self> {
        let out_of_range = || {
            CfError::InvalidTimeUnits(format!(
                "offset of {} seconds from {} is out of range",
                seconds, self
            ))
        };

        if self.calendar.is_gregorian() {
            let naive = self.to_naive().ok_or_else(|| {
                CfError::InvalidTimeUnits(format!("invalid reference date {}", self))
            })?;
            let shifted = Duration::try_seconds(seconds)
                .and_then(|offset| naive.checked_add_signed(offset))
                .ok_or_else(out_of_range)?;
            return Ok(Self::from_naive(shifted, self.calendar));
        }

        let year_days = self
            .calendar
            .fixed_year_days()
            .ok_or_else(|| CfError::UnsupportedCalendar(self.calendar.name().to_string()))?;
        let days = self.year as i64 * year_days
            + self.calendar.day_of_year_offset(self.month)
            + (self.day as i64 - 1);
        let total = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|t| t.checked_add(self.seconds_of_day()))
            .and_then(|t| t.checked_add(seconds))
            .ok_or_else(out_of_range)?;

        let day_count = total.div_euclid(SECONDS_PER_DAY);
        let sod = total.rem_euclid(SECONDS_PER_DAY);
        let year = i32::try_from(day_count.div_euclid(year_days)).map_err(|_| out_of_range())?;
        let (month, day) = self
            .calendar
            .month_from_day_of_year(day_count.rem_euclid(year_days));

        Ok(Self {
            year,
            month,
            day,
            hour: (sod / 3600) as u32,
            minute: ((sod % 3600) / 60) as u32,
            second: (sod % 60) as u32,
            calendar: self.calendar,
        })
    }
}

impl fmt::Display for CfDatetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    /// Only meaningful in the 360-day calendar, where a month is 30 days.
    Months,
}

impl TimeUnit {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => Some(TimeUnit::Seconds),
            "minutes" | "minute" | "mins" | "min" => Some(TimeUnit::Minutes),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(TimeUnit::Hours),
            "days" | "day" | "d" => Some(TimeUnit::Days),
            "months" | "month" => Some(TimeUnit::Months),
            _ => None,
        }
    }

    fn seconds(&self, calendar: Calendar) -> CfResult<f64> {
        Ok(match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
            TimeUnit::Days => SECONDS_PER_DAY as f64,
            TimeUnit::Months if calendar == Calendar::Day360 => 30.0 * SECONDS_PER_DAY as f64,
            TimeUnit::Months => {
                return Err(CfError::InvalidTimeUnits(format!(
                    "'months since' is only defined for the 360_day calendar, not {}",
                    calendar.name()
                )))
            }
        })
    }
}

/// Parsed `<unit> since <reference>` time units.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    pub unit: TimeUnit,
    pub reference: CfDatetime,
}

impl TimeUnits {
    /// Returns true when `units` has the `<unit> since <reference>` form.
    pub fn is_time_units(units: &str) -> bool {
        units.contains(" since ")
    }

    /// Parse CF time units in the given calendar.
    ///
    /// Accepts references like `1960-01-01`, `1800-1-1 00:00:0.0` and
    /// `2000-01-01T12:00:00`.
    pub fn parse(units: &str, calendar: Calendar) -> CfResult<Self> {
        let (unit_str, reference_str) = units
            .split_once(" since ")
            .ok_or_else(|| CfError::InvalidTimeUnits(units.to_string()))?;

        let unit = TimeUnit::parse(unit_str.trim())
            .ok_or_else(|| CfError::InvalidTimeUnits(units.to_string()))?;
        // Reject bad unit/calendar combinations at parse time.
        unit.seconds(calendar)?;

        let reference = parse_reference(reference_str.trim(), calendar)
            .ok_or_else(|| CfError::InvalidTimeUnits(units.to_string()))?;

        Ok(Self { unit, reference })
    }

    /// Decode a numeric offset into a calendar datetime.
    pub fn decode(&self, value: f64) -> CfResult<CfDatetime> {
        if !value.is_finite() {
            return Err(CfError::InvalidTimeUnits(format!(
                "cannot decode non-finite offset {}",
                value
            )));
        }
        let seconds = (value * self.unit.seconds(self.reference.calendar)?).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper check is exclusive.
        if !(seconds >= i64::MIN as f64 && seconds < i64::MAX as f64) {
            return Err(CfError::InvalidTimeUnits(format!(
                "offset {} does not fit in a 64-bit count of seconds",
                value
            )));
        }
        self.reference.add_seconds(seconds as i64)
    }
}

fn parse_reference(s: &str, calendar: Calendar) -> Option<CfDatetime> {
    let mut parts = s.splitn(2, |c| c == ' ' || c == 'T');
    let date = parts.next()?;
    let time = parts.next().unwrap_or("").trim();

    let mut ymd = date.splitn(3, '-');
    let year: i32 = ymd.next()?.parse().ok()?;
    let month: u32 = ymd.next()?.parse().ok()?;
    let day: u32 = ymd.next()?.parse().ok()?;
    if day == 0 || day > calendar.days_in_month(year, month)? {
        return None;
    }

    let mut dt = CfDatetime::new(year, month, day, calendar);
    if !time.is_empty() {
        // Drop any trailing timezone designator.
        let time = time.split_whitespace().next().unwrap_or("").trim_end_matches('Z');
        let mut hms = time.splitn(3, ':');
        let hour: u32 = hms.next()?.parse().ok()?;
        let minute: u32 = hms.next().unwrap_or("0").parse().ok()?;
        let second: f64 = hms.next().unwrap_or("0").parse().ok()?;
        if hour >= 24 || minute >= 60 || !(0.0..60.0).contains(&second) {
            return None;
        }
        dt = dt.with_time(hour, minute, second as u32);
    }
    Some(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_since_360_day() {
        let units = TimeUnits::parse("months since 1960-01-01", Calendar::Day360).unwrap();
        let dates: Vec<String> = (0..4)
            .map(|m| units.decode(m as f64).unwrap().to_string())
            .collect();
        assert_eq!(
            dates,
            vec![
                "1960-01-01 00:00:00",
                "1960-02-01 00:00:00",
                "1960-03-01 00:00:00",
                "1960-04-01 00:00:00"
            ]
        );
    }

    #[test]
    fn test_months_rejected_for_gregorian() {
        let result = TimeUnits::parse("months since 1960-01-01", Calendar::Standard);
        assert!(matches!(result, Err(CfError::InvalidTimeUnits(_))));
    }

    #[test]
    fn test_hours_since_1800() {
        let units = TimeUnits::parse("hours since 1800-01-01", Calendar::Standard).unwrap();
        let dt = units.decode(1_867_128.0).unwrap();
        assert_eq!(dt.to_string(), "2013-01-01 00:00:00");
        let dt = units.decode(1_867_146.0).unwrap();
        assert_eq!(dt.to_string(), "2013-01-01 18:00:00");
    }

    #[test]
    fn test_noleap_skips_feb_29() {
        let units = TimeUnits::parse("days since 2000-02-28", Calendar::NoLeap).unwrap();
        let dt = units.decode(1.0).unwrap();
        assert_eq!((dt.month, dt.day), (3, 1));
    }

    #[test]
    fn test_all_leap_keeps_feb_29() {
        let units = TimeUnits::parse("days since 2001-02-28", Calendar::AllLeap).unwrap();
        let dt = units.decode(1.0).unwrap();
        assert_eq!((dt.month, dt.day), (2, 29));
    }

    #[test]
    fn test_fractional_days_and_negative_offsets() {
        let units =
            TimeUnits::parse("days since 1850-01-01", Calendar::ProlepticGregorian).unwrap();
        assert_eq!(units.decode(0.5).unwrap().to_string(), "1850-01-01 12:00:00");
        assert_eq!(units.decode(-1.0).unwrap().to_string(), "1849-12-31 00:00:00");

        let units = TimeUnits::parse("days since 1960-01-01", Calendar::Day360).unwrap();
        assert_eq!(units.decode(-1.0).unwrap().to_string(), "1959-12-30 00:00:00");
    }

    #[test]
    fn test_reference_with_time() {
        let units =
            TimeUnits::parse("seconds since 2000-01-01T06:30:00Z", Calendar::Standard).unwrap();
        assert_eq!(units.decode(90.0).unwrap().to_string(), "2000-01-01 06:31:30");
    }

    #[test]
    fn test_huge_offsets_rejected() {
        let units = TimeUnits::parse("days since 2000-01-01", Calendar::Standard).unwrap();
        assert!(matches!(units.decode(1e12), Err(CfError::InvalidTimeUnits(_))));
        assert!(matches!(units.decode(-1e17), Err(CfError::InvalidTimeUnits(_))));

        let units = TimeUnits::parse("days since 2000-01-01", Calendar::Day360).unwrap();
        assert!(matches!(units.decode(1e17), Err(CfError::InvalidTimeUnits(_))));
        assert!(matches!(units.decode(1e13), Err(CfError::InvalidTimeUnits(_))));

        let units = TimeUnits::parse("seconds since 2000-01-01", Calendar::NoLeap).unwrap();
        assert!(matches!(units.decode(9.2e18), Err(CfError::InvalidTimeUnits(_))));
    }

    #[test]
    fn test_reference_day_checked_per_calendar() {
        assert!(TimeUnits::parse("days since 2000-01-31", Calendar::Day360).is_err());
        assert!(TimeUnits::parse("days since 2000-02-30", Calendar::Day360).is_ok());
        assert!(TimeUnits::parse("days since 2000-02-29", Calendar::NoLeap).is_err());
        assert!(TimeUnits::parse("days since 2001-02-29", Calendar::AllLeap).is_ok());
        assert!(TimeUnits::parse("days since 2001-02-29", Calendar::Standard).is_err());
        assert!(TimeUnits::parse("days since 2000-02-29", Calendar::Standard).is_ok());
        assert!(TimeUnits::parse("days since 2000-04-31", Calendar::ProlepticGregorian).is_err());
        assert!(TimeUnits::parse("days since 2000-13-01", Calendar::NoLeap).is_err());
    }

    #[test]
    fn test_reference_time_of_day_checked() {
        assert!(TimeUnits::parse("hours since 2000-01-01 24:00:00", Calendar::Standard).is_err());
        assert!(TimeUnits::parse("hours since 2000-01-01 12:60:00", Calendar::Standard).is_err());
        assert!(TimeUnits::parse("hours since 2000-01-01 12:00:60", Calendar::Day360).is_err());
        assert!(TimeUnits::parse("hours since 2000-01-01 23:59:59.5", Calendar::Standard).is_ok());
    }

    #[test]
    fn test_calendar_parse() {
        assert_eq!(Calendar::parse("360_day").unwrap(), Calendar::Day360);
        assert_eq!(Calendar::parse("Gregorian").unwrap(), Calendar::Standard);
        assert_eq!(Calendar::parse("365_day").unwrap(), Calendar::NoLeap);
        assert!(Calendar::parse("julian").is_err());
    }

    #[test]
    fn test_invalid_units() {
        assert!(TimeUnits::parse("months", Calendar::Day360).is_err());
        assert!(TimeUnits::parse("fortnights since 2000-01-01", Calendar::Standard).is_err());
        assert!(!TimeUnits::is_time_units("degree_east"));
    }
}
