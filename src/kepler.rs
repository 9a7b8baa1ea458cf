use core::f64::consts::PI;

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::elements::OrbitalElements;
use crate::math::{cos_deg, normalize_degrees_360, sin_deg};
use crate::types::CalculationError;

const RAD_TO_DEG: f64 = 180.0 / PI;

// Iteration and convergence parameters
const NEAR_CIRCULAR_ECCENTRICITY: f64 = 0.05; // below this the first approximation suffices
const CONVERGENCE_TOLERANCE: f64 = 0.001; // Newton-Raphson step bound, degrees
pub(crate) const MAX_ITERATIONS: u32 = 100; // cap on Newton-Raphson refinement

/// Solves Kepler's equation for the eccentric anomaly, in degrees.
///
/// Starts from the first-order approximation
/// `E0 = M + e·(180/π)·sin M·(1 + e·cos M)`, which is returned directly for
/// near-circular orbits (`e < 0.05`). Otherwise the estimate is refined by
/// Newton-Raphson iteration until the step falls to 0.001° or less.
///
/// The refinement loop is bounded: if it has not converged after
/// 100 iterations the function reports
/// [`CalculationError::DidNotConverge`] instead of iterating further. For
/// the eccentricities in this crate's element tables (all below 0.21) the
/// loop settles in a handful of iterations.
///
/// # Arguments
///
/// * `mean_anomaly` - Mean anomaly M in degrees
/// * `eccentricity` - Orbital eccentricity e, 0 ≤ e < 1
///
/// # Returns
///
/// The eccentric anomaly E in degrees, or an error if the iteration failed
/// to converge.
///
/// # Example
///
/// ```
/// use ecliptic_calculator::solve_eccentric_anomaly;
///
/// // A circular orbit has E == M for every mean anomaly.
/// assert_eq!(solve_eccentric_anomaly(137.25, 0.0).unwrap(), 137.25);
/// ```
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, CalculationError> {
    let m = mean_anomaly;
    let e = eccentricity;

    let mut e0 = m + e * RAD_TO_DEG * sin_deg(m) * (1.0 + e * cos_deg(m));
    if e < NEAR_CIRCULAR_ECCENTRICITY {
        return Ok(e0);
    }

    for _ in 0..MAX_ITERATIONS {
        let e1 = e0 - (e0 - e * RAD_TO_DEG * sin_deg(e0) - m) / (1.0 - e * cos_deg(e0));
        if (e1 - e0).abs() <= CONVERGENCE_TOLERANCE {
            return Ok(e1);
        }
        e0 = e1;
    }
    Err(CalculationError::DidNotConverge)
}

/// Position of a body resolved from its orbital elements: the ecliptic
/// longitude together with the radius vector in the units of the body's
/// semi-major axis.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ResolvedPosition {
    pub(crate) longitude: f64,
    pub(crate) radius: f64,
}

/// Resolves the in-orbit position for an evaluated element set.
///
/// Computes the perifocal coordinates `xv = a(cos E - e)`,
/// `yv = a·√(1-e²)·sin E`, the true anomaly `v = atan2(yv, xv)` and the
/// radius `r = √(xv²+yv²)`, then reports `lon = normalize(v + w)`.
pub(crate) fn resolve_position(elements: &OrbitalElements) -> Result<ResolvedPosition, CalculationError> {
    let e = elements.eccentricity;
    let a = elements.semi_major_axis;
    let ecc_anomaly = solve_eccentric_anomaly(elements.mean_anomaly, e)?;

    let xv = a * (cos_deg(ecc_anomaly) - e);
    let yv = a * (1.0 - e * e).sqrt() * sin_deg(ecc_anomaly);

    let true_anomaly = yv.atan2(xv) * RAD_TO_DEG;
    let radius = (xv * xv + yv * yv).sqrt();

    Ok(ResolvedPosition {
        longitude: normalize_degrees_360(true_anomaly + elements.arg_perihelion),
        radius,
    })
}
