#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::types::Dms;

/// Normalizes an angle in degrees to the range [0, 360).
///
/// This function takes any angle value (positive or negative) and converts it
/// to an equivalent angle in the range [0, 360). The operation is idempotent:
/// applying it to an already-normalized angle returns the angle unchanged.
///
/// # Arguments
///
/// * `degrees` - The angle in degrees to normalize
///
/// # Returns
///
/// The normalized angle in degrees, in the range [0, 360)
pub fn normalize_degrees_360(degrees: f64) -> f64 {
    let mut limited = degrees % 360.0;
    if limited < 0.0 {
        limited += 360.0;
    }
    limited
}

/// Sine of an angle given in degrees.
pub(crate) fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle given in degrees.
pub(crate) fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Arcsine, returned in degrees.
pub(crate) fn asin_deg(x: f64) -> f64 {
    x.asin().to_degrees()
}

/// Converts a decimal-degree value into a degrees/minutes/seconds quadruple.
///
/// The degree, minute and second fields are obtained by cascaded truncation
/// toward zero. The `arc_seconds` field is *not* the fractional part of the
/// seconds field: it is the remainder of the total arc-second count modulo 60
/// and can diverge from the fraction lost by truncating `seconds`. Callers
/// rely on both readings, so the two are kept side by side in [`Dms`].
///
/// # Arguments
///
/// * `decimal_degrees` - The angle in decimal degrees, expected in [0, 360)
///
/// # Returns
///
/// The [`Dms`] quadruple for the given angle
///
/// # Example
///
/// ```
/// use ecliptic_calculator::decimal_degrees_to_dms;
///
/// let dms = decimal_degrees_to_dms(125.5);
/// assert_eq!(dms.degrees, 125);
/// assert_eq!(dms.minutes, 30);
/// assert_eq!(dms.seconds, 0);
/// assert_eq!(dms.arc_seconds, 0.0);
/// ```
pub fn decimal_degrees_to_dms(decimal_degrees: f64) -> Dms {
    let total_seconds = decimal_degrees * 3600.0;

    let degrees = total_seconds / 3600.0;
    let degrees_int = degrees as i32;

    let minutes_decimal = (degrees - f64::from(degrees_int)) * 60.0;
    let minutes_int = minutes_decimal as i32;

    let seconds_decimal = (minutes_decimal - f64::from(minutes_int)) * 60.0;
    let seconds_int = seconds_decimal as i32;

    let arc_seconds = total_seconds % 60.0;

    Dms {
        degrees: degrees_int,
        minutes: minutes_int,
        seconds: seconds_int,
        arc_seconds,
    }
}
