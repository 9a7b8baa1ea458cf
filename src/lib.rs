//! # Ecliptic Calculator
//!
//! A low-precision library for calculating the apparent ecliptic longitude of the Sun,
//! Moon, Mercury, Venus, Mars, Jupiter and Saturn for any civil date/time.
//!
//! The calculations follow the simplified Keplerian method popularized by Paul Schlyter:
//! per-body orbital elements evaluated as linear functions of a day number counted from
//! 2000 Jan 0.0 UT, a bounded Kepler solve for the eccentric anomaly, and — for the Moon —
//! a classical table of periodic perturbation corrections to longitude, latitude and
//! geocentric distance. Accuracy is on the order of an arc minute or two for the Moon and
//! better for the Sun; there is no full-precision ephemeris here.
//!
//! The whole pipeline is pure: every result is a deterministic function of the day number,
//! the library performs no I/O and never reads a clock, and the same input always yields a
//! bit-identical output. Callers that want a ticking display re-invoke the pipeline with
//! the current time themselves.
//!
//! ## Basic Usage
//!
//! ```
//! use ecliptic_calculator::{decimal_degrees_to_dms, EclipticCalculator};
//!
//! // 1990 April 19, 00:00 UT (civil fields are taken as Universal Time)
//! let mut calc = EclipticCalculator::from_civil(1990, 4, 19, 0, 0, 0.0).unwrap();
//!
//! let sun = calc.get_sun_position().unwrap();
//! assert!((sun.longitude - 28.69).abs() < 0.01);
//!
//! let moon = calc.get_moon_position().unwrap();
//! println!("Moon: {:.4}° lon, {:.4}° lat, {:.2} Earth radii",
//!     moon.longitude, moon.latitude, moon.distance);
//!
//! // All seven bodies in one snapshot, renderable in arc notation
//! let positions = calc.get_all_positions().unwrap();
//! println!("{positions}");
//!
//! let dms = decimal_degrees_to_dms(sun.longitude);
//! assert_eq!(dms.degrees, 28);
//! ```
#![no_std]

pub(crate) mod elements;
pub(crate) mod kepler;
pub(crate) mod math;
pub(crate) mod moon;
pub(crate) mod time;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use chrono::NaiveDateTime;
use core::cell::OnceCell;

pub use crate::elements::{Body, OrbitalElements};
pub use crate::kepler::solve_eccentric_anomaly;
pub use crate::math::{decimal_degrees_to_dms, normalize_degrees_360};
pub use crate::time::{day_number, day_number_from_civil};
pub use crate::types::{CalculationError, CelestialBodyPositions, Dms, MoonPosition, Position};

/// Computes the apparent ecliptic longitude of a body at the given day
/// number.
///
/// For the Moon this is the perturbed longitude, identical to the one in
/// [`moon_position`]; the other bodies carry no perturbation series.
///
/// This is a stateless free function, safe to call concurrently from any
/// number of threads. For repeated queries at one instant prefer
/// [`EclipticCalculator`], which caches per-body results.
///
/// # Errors
///
/// Returns [`CalculationError::DidNotConverge`] if the eccentric-anomaly
/// iteration fails to settle (not observed for the eccentricities in the
/// element tables).
pub fn ecliptic_longitude(body: Body, day_number: f64) -> Result<Position, CalculationError> {
    match body {
        Body::Moon => {
            let position = moon::moon_position(day_number)?;
            Ok(Position {
                longitude: position.longitude,
            })
        }
        _ => {
            let elements = body.orbital_elements(day_number);
            let resolved = kepler::resolve_position(&elements)?;
            Ok(Position {
                longitude: resolved.longitude,
            })
        }
    }
}

/// Computes the Moon's perturbed ecliptic longitude, latitude and
/// geocentric distance (Earth radii) at the given day number.
///
/// # Errors
///
/// Returns [`CalculationError::DidNotConverge`] if the eccentric-anomaly
/// iteration fails to settle.
pub fn moon_position(day_number: f64) -> Result<MoonPosition, CalculationError> {
    moon::moon_position(day_number)
}

/// Computes the full seven-body snapshot for the given day number.
///
/// Equivalent to calling [`ecliptic_longitude`] for each body in turn;
/// the snapshot is immutable once constructed.
pub fn all_positions(day_number: f64) -> Result<CelestialBodyPositions, CalculationError> {
    Ok(CelestialBodyPositions {
        sun: ecliptic_longitude(Body::Sun, day_number)?.longitude,
        moon: moon::moon_position(day_number)?.longitude,
        mercury: ecliptic_longitude(Body::Mercury, day_number)?.longitude,
        venus: ecliptic_longitude(Body::Venus, day_number)?.longitude,
        mars: ecliptic_longitude(Body::Mars, day_number)?.longitude,
        jupiter: ecliptic_longitude(Body::Jupiter, day_number)?.longitude,
        saturn: ecliptic_longitude(Body::Saturn, day_number)?.longitude,
    })
}

/// Calculator for the ecliptic positions of all seven bodies at one instant.
///
/// This struct fixes a day number at construction and computes per-body
/// positions on demand. Results are cached for efficient repeated access, so
/// querying the same body twice — or assembling the aggregate snapshot after
/// individual queries — does not repeat the orbit solution. Create one
/// calculator per instant of interest and discard it afterwards; the
/// underlying pipeline itself holds no state between instants.
///
/// # Example
///
/// ```
/// use chrono::NaiveDateTime;
/// use ecliptic_calculator::EclipticCalculator;
///
/// let dt = NaiveDateTime::parse_from_str("2024-06-21 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let mut calc = EclipticCalculator::new(dt);
///
/// let saturn = calc.get_saturn_position().unwrap();
/// assert!(saturn.longitude >= 0.0 && saturn.longitude < 360.0);
/// ```
pub struct EclipticCalculator {
    day_number: f64,
    sun: OnceCell<Result<Position, CalculationError>>,
    moon: OnceCell<Result<MoonPosition, CalculationError>>,
    mercury: OnceCell<Result<Position, CalculationError>>,
    venus: OnceCell<Result<Position, CalculationError>>,
    mars: OnceCell<Result<Position, CalculationError>>,
    jupiter: OnceCell<Result<Position, CalculationError>>,
    saturn: OnceCell<Result<Position, CalculationError>>,
}

impl EclipticCalculator {
    /// Creates a calculator for the given civil date/time, taken as UT.
    pub fn new(ut: NaiveDateTime) -> Self {
        Self::from_day_number(time::day_number(&ut))
    }

    /// Creates a calculator directly from a day number.
    ///
    /// The day number is the count of days since 2000 Jan 0.0 UT, negative
    /// for earlier instants; see [`day_number`].
    pub fn from_day_number(day_number: f64) -> Self {
        Self {
            day_number,
            sun: OnceCell::new(),
            moon: OnceCell::new(),
            mercury: OnceCell::new(),
            venus: OnceCell::new(),
            mars: OnceCell::new(),
            jupiter: OnceCell::new(),
            saturn: OnceCell::new(),
        }
    }

    /// Creates a calculator from raw civil date/time fields, validating the
    /// calendar ranges.
    ///
    /// Unlike [`day_number_from_civil`], which accepts any numeric input and
    /// produces a garbage-in/garbage-out day number, this constructor
    /// rejects `month` outside 1-12 and `day` outside 1-31.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidCalendarDate`] when a field is out
    /// of range.
    pub fn from_civil(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, CalculationError> {
        time::validate_civil_date(month, day)?;
        Ok(Self::from_day_number(time::day_number_from_civil(
            year, month, day, hour, minute, second,
        )))
    }

    /// The day number this calculator evaluates at.
    pub fn day_number(&self) -> f64 {
        self.day_number
    }

    /// Returns the Sun's apparent ecliptic longitude.
    pub fn get_sun_position(&mut self) -> Result<Position, CalculationError> {
        let d = self.day_number;
        *self.sun.get_or_init(|| ecliptic_longitude(Body::Sun, d))
    }

    /// Returns the Moon's perturbed ecliptic longitude, latitude and
    /// distance.
    pub fn get_moon_position(&mut self) -> Result<MoonPosition, CalculationError> {
        let d = self.day_number;
        *self.moon.get_or_init(|| moon::moon_position(d))
    }

    /// Returns Mercury's apparent ecliptic longitude.
    pub fn get_mercury_position(&mut self) -> Result<Position, CalculationError> {
        let d = self.day_number;
        *self.mercury.get_or_init(|| ecliptic_longitude(Body::Mercury, d))
    }

    /// Returns Venus' apparent ecliptic longitude.
    pub fn get_venus_position(&mut self) -> Result<Position, CalculationError> {
        let d = self.day_number;
        *self.venus.get_or_init(|| ecliptic_longitude(Body::Venus, d))
    }

    /// Returns Mars' apparent ecliptic longitude.
    pub fn get_mars_position(&mut self) -> Result<Position, CalculationError> {
        let d = self.day_number;
        *self.mars.get_or_init(|| ecliptic_longitude(Body::Mars, d))
    }

    /// Returns Jupiter's apparent ecliptic longitude.
    pub fn get_jupiter_position(&mut self) -> Result<Position, CalculationError> {
        let d = self.day_number;
        *self.jupiter.get_or_init(|| ecliptic_longitude(Body::Jupiter, d))
    }

    /// Returns Saturn's apparent ecliptic longitude.
    pub fn get_saturn_position(&mut self) -> Result<Position, CalculationError> {
        let d = self.day_number;
        *self.saturn.get_or_init(|| ecliptic_longitude(Body::Saturn, d))
    }

    /// Returns the longitude-only position for any of the seven bodies.
    ///
    /// For the Moon this reports the perturbed longitude; latitude and
    /// distance are available through [`get_moon_position`](Self::get_moon_position).
    pub fn get_position(&mut self, body: Body) -> Result<Position, CalculationError> {
        match body {
            Body::Sun => self.get_sun_position(),
            Body::Moon => self.get_moon_position().map(|moon| Position {
                longitude: moon.longitude,
            }),
            Body::Mercury => self.get_mercury_position(),
            Body::Venus => self.get_venus_position(),
            Body::Mars => self.get_mars_position(),
            Body::Jupiter => self.get_jupiter_position(),
            Body::Saturn => self.get_saturn_position(),
        }
    }

    /// Returns the aggregate snapshot of all seven longitudes.
    pub fn get_all_positions(&mut self) -> Result<CelestialBodyPositions, CalculationError> {
        Ok(CelestialBodyPositions {
            sun: self.get_sun_position()?.longitude,
            moon: self.get_moon_position()?.longitude,
            mercury: self.get_mercury_position()?.longitude,
            venus: self.get_venus_position()?.longitude,
            mars: self.get_mars_position()?.longitude,
            jupiter: self.get_jupiter_position()?.longitude,
            saturn: self.get_saturn_position()?.longitude,
        })
    }
}
