use core::fmt;

use thiserror::Error;

use crate::elements::Body;

/// Error conditions surfaced by the position calculations.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CalculationError {
    /// The eccentric-anomaly iteration exceeded its iteration cap.
    #[error("eccentric anomaly iteration did not converge")]
    DidNotConverge,

    /// A validated constructor was given a month or day outside the
    /// calendar ranges.
    #[error("invalid calendar date")]
    InvalidCalendarDate,
}

/// Ecliptic position of a body, longitude only.
///
/// The simplified orbital model reports a single apparent ecliptic longitude
/// for the Sun and the planets; only the Moon carries latitude and distance
/// (see [`MoonPosition`]).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Apparent ecliptic longitude in degrees, in [0, 360).
    pub longitude: f64,
}

/// Ecliptic position of the Moon after perturbation corrections.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonPosition {
    /// Apparent ecliptic longitude in degrees, in [0, 360).
    pub longitude: f64,
    /// Ecliptic latitude in degrees, signed.
    pub latitude: f64,
    /// Geocentric distance in Earth radii.
    pub distance: f64,
}

/// Snapshot of the ecliptic longitudes of all seven bodies at one instant.
///
/// Produced by a single pass over the full pipeline and immutable once
/// constructed. The [`fmt::Display`] implementation renders one line per
/// body in arc notation (`D° M' S.SS"`).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CelestialBodyPositions {
    pub sun: f64,
    pub moon: f64,
    pub mercury: f64,
    pub venus: f64,
    pub mars: f64,
    pub jupiter: f64,
    pub saturn: f64,
}

impl CelestialBodyPositions {
    /// Returns the stored longitude for the given body.
    pub fn longitude(&self, body: Body) -> f64 {
        match body {
            Body::Sun => self.sun,
            Body::Moon => self.moon,
            Body::Mercury => self.mercury,
            Body::Venus => self.venus,
            Body::Mars => self.mars,
            Body::Jupiter => self.jupiter,
            Body::Saturn => self.saturn,
        }
    }
}

impl fmt::Display for CelestialBodyPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, body) in Body::ALL.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: ", body.name())?;
            fmt_arc_notation(f, self.longitude(*body))?;
        }
        Ok(())
    }
}

/// Writes a decimal-degree value as whole degrees, whole minutes and
/// decimal seconds.
fn fmt_arc_notation(f: &mut fmt::Formatter<'_>, degrees: f64) -> fmt::Result {
    let whole_degrees = degrees as i32;
    let minutes_decimal = (degrees - f64::from(whole_degrees)) * 60.0;
    let minutes = minutes_decimal as i32;
    let seconds = (minutes_decimal - f64::from(minutes)) * 60.0;
    write!(f, "{whole_degrees}° {minutes}' {seconds:.2}\"")
}

/// Degrees/minutes/seconds decomposition of a decimal-degree angle.
///
/// See [`decimal_degrees_to_dms`](crate::decimal_degrees_to_dms) for the
/// exact field semantics, in particular the `arc_seconds` remainder.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dms {
    /// Whole degrees, truncated toward zero.
    pub degrees: i32,
    /// Whole arc minutes, truncated toward zero.
    pub minutes: i32,
    /// Whole arc seconds, truncated toward zero.
    pub seconds: i32,
    /// Remainder of the total arc-second count modulo 60.
    pub arc_seconds: f64,
}
