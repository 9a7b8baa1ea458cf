use chrono::{Datelike, NaiveDateTime, Timelike};
#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::types::CalculationError;

/// Offset of the day-number epoch, 2000 Jan 0.0 UT, from the calendar
/// origin of the integer day formula.
const EPOCH_OFFSET_DAYS: i64 = 730_515;

/// Computes the day number for a civil date/time.
///
/// The day number is the continuous time argument of every orbital formula
/// in this crate: 0.0 at 2000 Jan 0.0 UT (1999 Dec 31, 00:00 UT), increasing
/// by exactly 1.0 per day of Universal Time. The input is taken as UT in the
/// proleptic Gregorian calendar; no timezone handling is performed.
///
/// # Arguments
///
/// * `ut` - Universal Time as a [`NaiveDateTime`]
///
/// # Returns
///
/// The day number, including the fractional day from the time of day.
///
/// # Example
///
/// ```
/// use chrono::NaiveDateTime;
/// use ecliptic_calculator::day_number;
///
/// let dt = NaiveDateTime::parse_from_str("2000-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(day_number(&dt), 1.0);
/// ```
pub fn day_number(ut: &NaiveDateTime) -> f64 {
    // Seconds including fractional part from nanoseconds
    let seconds = f64::from(ut.second()) + f64::from(ut.nanosecond()) / 1_000_000_000.0;
    day_number_from_civil(ut.year(), ut.month(), ut.day(), ut.hour(), ut.minute(), seconds)
}

/// Computes the day number from raw civil date/time fields.
///
/// `UT = hour + minute/60 + second/3600` in fractional hours, and
///
/// ```text
/// d = 367Y - 7(Y + (M+9)/12)/4 - 3((Y + (M-9)/7)/100 + 1)/4 + 275M/9 + D - 730515 + UT/24
/// ```
///
/// where each of the four inner divisions is an integer division truncating
/// toward zero, applied to its immediate sub-expression before the terms are
/// summed. Only the final `UT/24` term is real-valued. The mixed precision
/// is part of the contract; rewriting the formula with real division changes
/// its output.
///
/// Month and day ranges are **not** validated: out-of-range fields produce a
/// well-defined but semantically meaningless day number. Use
/// [`EclipticCalculator::from_civil`](crate::EclipticCalculator::from_civil)
/// when rejection of invalid dates is wanted.
///
/// # Arguments
///
/// * `year` - Calendar year (Gregorian)
/// * `month` - Month of year, 1-12
/// * `day` - Day of month, 1-31
/// * `hour` - Hour of day, UT
/// * `minute` - Minute of hour
/// * `second` - Seconds, may carry a fractional part
///
/// # Returns
///
/// The day number, including the fractional day from the time of day.
pub fn day_number_from_civil(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    let y = i64::from(year);
    let m = i64::from(month);
    let d = i64::from(day);

    let whole_days =
        367 * y - 7 * (y + (m + 9) / 12) / 4 - 3 * ((y + (m - 9) / 7) / 100 + 1) / 4 + 275 * m / 9 + d
            - EPOCH_OFFSET_DAYS;

    let ut = f64::from(hour) + f64::from(minute) / 60.0 + second / 3600.0;
    whole_days as f64 + ut / 24.0
}

/// Rejects month/day fields outside the calendar ranges.
pub(crate) fn validate_civil_date(month: u32, day: u32) -> Result<(), CalculationError> {
    if !(1..=12).contains(&month) {
        return Err(CalculationError::InvalidCalendarDate);
    }
    if !(1..=31).contains(&day) {
        return Err(CalculationError::InvalidCalendarDate);
    }
    Ok(())
}
