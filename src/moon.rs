//! Lunar perturbation series.
//!
//! The raw Keplerian solution for the Moon is off by more than a degree
//! because the Sun continuously distorts the lunar orbit. This module
//! applies the classical correction series: twelve sine terms in longitude,
//! five in latitude and two cosine terms in distance, each driven by integer
//! combinations of four fundamental arguments.

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::elements::Body;
use crate::kepler;
use crate::math::{asin_deg, cos_deg, normalize_degrees_360, sin_deg};
use crate::types::{CalculationError, MoonPosition};

/// Fundamental arguments of the perturbation series, degrees in [0, 360).
#[derive(Copy, Clone, Debug)]
pub(crate) struct LunarArguments {
    /// Mean anomaly of the Sun (Ms).
    pub(crate) ms: f64,
    /// Mean anomaly of the Moon (Mm).
    pub(crate) mm: f64,
    /// Mean elongation of the Moon from the Sun (D).
    pub(crate) d: f64,
    /// Argument of latitude of the Moon (F).
    pub(crate) f: f64,
}

impl LunarArguments {
    /// Evaluates the fundamental arguments at the given day number.
    pub(crate) fn at(day_number: f64) -> Self {
        let sun = Body::Sun.orbital_elements(day_number);
        let moon = Body::Moon.orbital_elements(day_number);

        // Mean longitudes of the Sun and of the Moon
        let ls = normalize_degrees_360(sun.mean_anomaly + sun.arg_perihelion);
        let lm = normalize_degrees_360(moon.mean_anomaly + moon.arg_perihelion + moon.node);

        Self {
            ms: sun.mean_anomaly,
            mm: moon.mean_anomaly,
            d: normalize_degrees_360(lm - ls),
            f: normalize_degrees_360(lm - moon.node),
        }
    }
}

/// One periodic term: `coefficient * sin(arg)` (or cosine for the distance
/// series), where `arg = mm·Mm + d·D + ms·Ms + f·F`.
struct PerturbationTerm {
    coefficient: f64,
    mm: f64,
    d: f64,
    ms: f64,
    f: f64,
}

impl PerturbationTerm {
    const fn new(coefficient: f64, mm: f64, d: f64, ms: f64, f: f64) -> Self {
        Self { coefficient, mm, d, ms, f }
    }

    fn argument(&self, args: LunarArguments) -> f64 {
        self.mm * args.mm + self.d * args.d + self.ms * args.ms + self.f * args.f
    }
}

/// Longitude corrections, degrees.
const LONGITUDE_TERMS: [PerturbationTerm; 12] = [
    PerturbationTerm::new(-1.274, 1.0, -2.0, 0.0, 0.0), // evection
    PerturbationTerm::new(0.658, 0.0, 2.0, 0.0, 0.0),   // variation
    PerturbationTerm::new(-0.186, 0.0, 0.0, 1.0, 0.0),  // yearly equation
    PerturbationTerm::new(-0.059, 2.0, -2.0, 0.0, 0.0),
    PerturbationTerm::new(-0.057, 1.0, -2.0, 1.0, 0.0),
    PerturbationTerm::new(0.053, 1.0, 2.0, 0.0, 0.0),
    PerturbationTerm::new(0.046, 0.0, 2.0, -1.0, 0.0),
    PerturbationTerm::new(0.041, 1.0, 0.0, -1.0, 0.0),
    PerturbationTerm::new(-0.035, 0.0, 1.0, 0.0, 0.0), // parallactic equation
    PerturbationTerm::new(-0.031, 1.0, 0.0, 1.0, 0.0),
    PerturbationTerm::new(-0.015, 0.0, -2.0, 0.0, 2.0),
    PerturbationTerm::new(0.011, 1.0, -4.0, 0.0, 0.0),
];

/// Latitude corrections, degrees.
const LATITUDE_TERMS: [PerturbationTerm; 5] = [
    PerturbationTerm::new(-0.173, 0.0, -2.0, 0.0, 1.0),
    PerturbationTerm::new(-0.055, 1.0, -2.0, 0.0, -1.0),
    PerturbationTerm::new(-0.046, 1.0, -2.0, 0.0, 1.0),
    PerturbationTerm::new(0.033, 0.0, 2.0, 0.0, 1.0),
    PerturbationTerm::new(0.017, 2.0, 0.0, 0.0, 1.0),
];

/// Distance corrections, Earth radii; these are cosine terms.
const DISTANCE_TERMS: [PerturbationTerm; 2] = [
    PerturbationTerm::new(-0.58, 1.0, -2.0, 0.0, 0.0),
    PerturbationTerm::new(-0.46, 0.0, 2.0, 0.0, 0.0),
];

fn sum_sine_terms(terms: &[PerturbationTerm], args: LunarArguments) -> f64 {
    terms.iter().map(|term| term.coefficient * sin_deg(term.argument(args))).sum()
}

fn sum_cosine_terms(terms: &[PerturbationTerm], args: LunarArguments) -> f64 {
    terms.iter().map(|term| term.coefficient * cos_deg(term.argument(args))).sum()
}

pub(crate) fn longitude_correction(args: LunarArguments) -> f64 {
    sum_sine_terms(&LONGITUDE_TERMS, args)
}

pub(crate) fn latitude_correction(args: LunarArguments) -> f64 {
    sum_sine_terms(&LATITUDE_TERMS, args)
}

pub(crate) fn distance_correction(args: LunarArguments) -> f64 {
    sum_cosine_terms(&DISTANCE_TERMS, args)
}

/// Computes the Moon's perturbed ecliptic position at the given day number.
///
/// The raw in-orbit solution supplies longitude and radius; the ecliptic
/// latitude is taken as `asin(sin(lon - N)·sin i)` from the raw longitude.
/// The perturbation sums are then added to longitude, latitude and
/// distance, and the longitude is re-normalized.
pub(crate) fn moon_position(day_number: f64) -> Result<MoonPosition, CalculationError> {
    let elements = Body::Moon.orbital_elements(day_number);
    let raw = kepler::resolve_position(&elements)?;
    let raw_latitude = asin_deg(sin_deg(raw.longitude - elements.node) * sin_deg(elements.inclination));

    let args = LunarArguments::at(day_number);
    Ok(MoonPosition {
        longitude: normalize_degrees_360(raw.longitude + longitude_correction(args)),
        latitude: raw_latitude + latitude_correction(args),
        distance: raw.radius + distance_correction(args),
    })
}
