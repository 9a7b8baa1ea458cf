#![allow(clippy::unwrap_used, clippy::panic)]
extern crate std;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use proptest::prelude::*;
use proptest::proptest;
use std::string::ToString;

use crate::all_positions;
use crate::day_number;
use crate::day_number_from_civil;
use crate::decimal_degrees_to_dms;
use crate::ecliptic_longitude;
use crate::math::sin_deg;
use crate::moon::{distance_correction, latitude_correction, longitude_correction, LunarArguments};
use crate::moon_position;
use crate::normalize_degrees_360;
use crate::solve_eccentric_anomaly;
use crate::Body;
use crate::CalculationError;
use crate::CelestialBodyPositions;
use crate::EclipticCalculator;

/// Day number of the worked example of the underlying algorithm,
/// 1990 April 19, 00:00 UT.
const WORKED_EXAMPLE_DAY: f64 = -3543.0;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

#[test]
fn day_number_is_one_at_epoch_plus_one_day() {
    // 2000 Jan 0.0 UT is 1999 Dec 31, 00:00 UT; one full day later is 1.0
    assert_eq!(day_number_from_civil(2000, 1, 1, 0, 0, 0.0), 1.0);
    assert_eq!(day_number_from_civil(1999, 12, 31, 0, 0, 0.0), 0.0);

    let dt = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(day_number(&dt), 1.0);
}

#[test]
fn day_number_carries_fractional_time_of_day() {
    assert_eq!(day_number_from_civil(2000, 1, 1, 12, 0, 0.0), 1.5);
    // 1991 Dec 17, 07:27 UT
    assert_close(
        day_number_from_civil(1991, 12, 17, 7, 27, 0.0),
        -2935.6895833333333,
        1e-9,
    );
}

#[test]
fn day_number_matches_worked_example_date() {
    assert_eq!(day_number_from_civil(1990, 4, 19, 0, 0, 0.0), WORKED_EXAMPLE_DAY);
}

#[test]
fn sun_longitude_matches_worked_example() {
    let sun = ecliptic_longitude(Body::Sun, WORKED_EXAMPLE_DAY).unwrap();
    assert_close(sun.longitude, 28.686989426528726, 1e-6);
}

#[test]
fn planet_longitudes_match_worked_example_date() {
    let cases = [
        (Body::Mercury, 122.16083401541349),
        (Body::Venus, 187.0767893101485),
        (Body::Mars, 241.15963820841117),
        (Body::Jupiter, 4.902717523705292),
        (Body::Saturn, 175.8697542057317),
    ];
    for (body, expected) in cases {
        let position = ecliptic_longitude(body, WORKED_EXAMPLE_DAY).unwrap();
        assert_close(position.longitude, expected, 1e-6);
    }
}

#[test]
fn moon_position_matches_worked_example_date() {
    let moon = moon_position(WORKED_EXAMPLE_DAY).unwrap();
    assert_close(moon.longitude, 354.1926063071547, 1e-6);
    assert_close(moon.latitude, 3.3060093366684677, 1e-6);
    assert_close(moon.distance, 60.67790303343743, 1e-6);
}

#[test]
fn sun_longitude_at_natal_chart_instant() {
    let d = day_number_from_civil(1991, 12, 17, 7, 27, 0.0);
    let sun = ecliptic_longitude(Body::Sun, d).unwrap();
    assert_close(sun.longitude, 264.8494796949474, 1e-6);
}

#[test]
fn lunar_arguments_match_worked_example_date() {
    let args = LunarArguments::at(WORKED_EXAMPLE_DAY);
    assert_close(args.ms, 104.06528413449996, 1e-9);
    assert_close(args.mm, 266.0953749613036, 1e-9);
    assert_close(args.d, 287.7400929953036, 1e-9);
    assert_close(args.f, 1.840782052403597, 1e-9);
}

#[test]
fn longitude_correction_matches_expanded_term_sum() {
    let args = LunarArguments::at(WORKED_EXAMPLE_DAY);
    let (mm, d, ms, f) = (args.mm, args.d, args.ms, args.f);

    // The twelve terms written out longhand, in table order
    let expected = -1.274 * sin_deg(mm - 2.0 * d)
        + 0.658 * sin_deg(2.0 * d)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * d)
        - 0.057 * sin_deg(mm - 2.0 * d + ms)
        + 0.053 * sin_deg(mm + 2.0 * d)
        + 0.046 * sin_deg(2.0 * d - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(d)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * d)
        + 0.011 * sin_deg(mm - 4.0 * d);

    assert_close(longitude_correction(args), expected, 1e-12);
    assert_close(longitude_correction(args), -1.4132216503531472, 1e-9);
}

#[test]
fn corrections_vanish_at_zero_arguments() {
    let zero = LunarArguments {
        ms: 0.0,
        mm: 0.0,
        d: 0.0,
        f: 0.0,
    };
    // Every sine term vanishes; the two cosine distance terms collapse to
    // the sum of their coefficients.
    assert_eq!(longitude_correction(zero), 0.0);
    assert_eq!(latitude_correction(zero), 0.0);
    assert_close(distance_correction(zero), -1.04, 1e-12);
}

#[test]
fn eccentric_anomaly_refines_high_eccentricity_orbits() {
    let e = solve_eccentric_anomaly(100.0, 0.2).unwrap();
    assert_close(e, 110.71811762651836, 1e-9);
}

#[test]
fn dms_of_125_5_degrees() {
    let dms = decimal_degrees_to_dms(125.5);
    assert_eq!(dms.degrees, 125);
    assert_eq!(dms.minutes, 30);
    assert_eq!(dms.seconds, 0);
    assert_eq!(dms.arc_seconds, 0.0);
}

#[test]
fn dms_keeps_total_seconds_remainder_independent_of_seconds_field() {
    let dms = decimal_degrees_to_dms(359.9999);
    assert_eq!(dms.degrees, 359);
    assert_eq!(dms.minutes, 59);
    assert_eq!(dms.seconds, 59);
    // 359.9999° is 1295999.64 total arc seconds; the remainder keeps the
    // fraction the truncated seconds field drops
    assert_close(dms.arc_seconds, 59.64, 1e-6);

    let dms = decimal_degrees_to_dms(55.5051);
    assert_eq!(dms.degrees, 55);
    assert_eq!(dms.minutes, 30);
    assert_eq!(dms.seconds, 18);
    assert_close(dms.arc_seconds, 18.36, 1e-6);
}

#[test]
fn validated_constructor_rejects_calendar_garbage() {
    assert_eq!(
        EclipticCalculator::from_civil(1990, 0, 1, 0, 0, 0.0).err(),
        Some(CalculationError::InvalidCalendarDate)
    );
    assert_eq!(
        EclipticCalculator::from_civil(1990, 13, 1, 0, 0, 0.0).err(),
        Some(CalculationError::InvalidCalendarDate)
    );
    assert_eq!(
        EclipticCalculator::from_civil(1990, 1, 0, 0, 0, 0.0).err(),
        Some(CalculationError::InvalidCalendarDate)
    );
    assert_eq!(
        EclipticCalculator::from_civil(1990, 1, 32, 0, 0, 0.0).err(),
        Some(CalculationError::InvalidCalendarDate)
    );
    assert!(EclipticCalculator::from_civil(1990, 1, 31, 0, 0, 0.0).is_ok());
}

#[test]
fn raw_day_number_accepts_out_of_range_fields() {
    // The unvalidated entry point is garbage-in/garbage-out but total
    assert!(day_number_from_civil(1990, 13, 40, 99, 0, 0.0).is_finite());
}

#[test]
fn calculator_agrees_with_free_functions() {
    let mut calc = EclipticCalculator::from_day_number(WORKED_EXAMPLE_DAY);
    assert_eq!(
        calc.get_sun_position().unwrap(),
        ecliptic_longitude(Body::Sun, WORKED_EXAMPLE_DAY).unwrap()
    );
    assert_eq!(calc.get_moon_position().unwrap(), moon_position(WORKED_EXAMPLE_DAY).unwrap());
    assert_eq!(calc.get_all_positions().unwrap(), all_positions(WORKED_EXAMPLE_DAY).unwrap());

    // The cached snapshot is stable across repeated queries
    assert_eq!(calc.get_all_positions().unwrap(), calc.get_all_positions().unwrap());
}

#[test]
fn aggregate_longitude_accessor_matches_fields() {
    let positions = all_positions(WORKED_EXAMPLE_DAY).unwrap();
    assert_eq!(positions.longitude(Body::Sun), positions.sun);
    assert_eq!(positions.longitude(Body::Moon), positions.moon);
    assert_eq!(positions.longitude(Body::Saturn), positions.saturn);
}

#[test]
fn aggregate_display_renders_arc_notation() {
    let positions = CelestialBodyPositions {
        sun: 125.5,
        moon: 0.0,
        mercury: 90.25,
        venus: 180.0,
        mars: 270.75,
        jupiter: 1.0,
        saturn: 359.5,
    };
    let text = positions.to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Sun: 125\u{b0} 30' 0.00\""));
    assert_eq!(lines.next(), Some("Moon: 0\u{b0} 0' 0.00\""));
    assert_eq!(lines.next(), Some("Mercury: 90\u{b0} 15' 0.00\""));
    assert!(text.contains("Saturn: 359\u{b0} 30' 0.00\""));
}

fn any_civil_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (1800i32..=2200i32)
        .prop_flat_map(|year| (Just(year), 1u32..=12u32))
        .prop_flat_map(|(year, month)| {
            let days_in_month = match month {
                1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
                4 | 6 | 9 | 11 => 30,
                2 => {
                    // Leap year check
                    if (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0) {
                        29
                    } else {
                        28
                    }
                }
                _ => unreachable!(),
            };
            (Just(year), Just(month), 1u32..=days_in_month)
        })
        .prop_flat_map(|(year, month, day)| {
            (Just(year), Just(month), Just(day), 0u32..24u32, 0u32..60u32, 0u32..60u32)
        })
        .prop_filter_map("Create valid datetime", |(year, month, day, hour, min, sec)| {
            NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(hour, min, sec))
        })
}

fn any_body() -> impl Strategy<Value = Body> {
    (0usize..Body::ALL.len()).prop_map(|index| Body::ALL[index])
}

proptest! {
    #[test]
    fn normalization_lands_in_range_and_is_idempotent(degrees in -1.0e6..1.0e6_f64) {
        let normalized = normalize_degrees_360(degrees);
        prop_assert!((0.0..360.0).contains(&normalized));
        prop_assert_eq!(normalize_degrees_360(normalized), normalized);
    }

    #[test]
    fn circular_orbit_eccentric_anomaly_equals_mean_anomaly(mean_anomaly in 0.0..360.0_f64) {
        prop_assert_eq!(solve_eccentric_anomaly(mean_anomaly, 0.0).unwrap(), mean_anomaly);
    }

    #[test]
    fn eccentric_anomaly_satisfies_kepler_equation(
        mean_anomaly in 0.0..360.0_f64,
        eccentricity in 0.05..0.249_f64,
    ) {
        let e = solve_eccentric_anomaly(mean_anomaly, eccentricity).unwrap();
        // E - e*(180/π)*sin E must reproduce M to well within the step tolerance
        let residual = e - eccentricity * (180.0 / core::f64::consts::PI) * sin_deg(e) - mean_anomaly;
        prop_assert!(residual.abs() < 0.01, "residual {} too large", residual);
    }

    #[test]
    fn chrono_and_raw_civil_entry_points_agree(datetime in any_civil_datetime()) {
        use chrono::{Datelike, Timelike};
        let from_fields = day_number_from_civil(
            datetime.year(),
            datetime.month(),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            f64::from(datetime.second()),
        );
        prop_assert_eq!(day_number(&datetime), from_fields);
    }

    #[test]
    fn day_number_increases_by_one_per_day(datetime in any_civil_datetime()) {
        let next = datetime + chrono::Duration::days(1);
        let difference = day_number(&next) - day_number(&datetime);
        prop_assert!((difference - 1.0).abs() < 1e-9);
    }

    #[test]
    fn longitudes_stay_in_range_and_are_deterministic(
        body in any_body(),
        day in -100_000.0..100_000.0_f64,
    ) {
        let first = ecliptic_longitude(body, day).unwrap();
        prop_assert!((0.0..360.0).contains(&first.longitude));

        // Same inputs must yield bit-identical output
        let second = ecliptic_longitude(body, day).unwrap();
        prop_assert_eq!(first.longitude.to_bits(), second.longitude.to_bits());
    }

    #[test]
    fn moon_snapshot_is_deterministic(day in -100_000.0..100_000.0_f64) {
        let first = moon_position(day).unwrap();
        let second = moon_position(day).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!((0.0..360.0).contains(&first.longitude));
        prop_assert!(first.latitude.abs() < 90.0);
        prop_assert!(first.distance.is_finite());
    }

    #[test]
    fn aggregate_matches_per_body_queries(day in -100_000.0..100_000.0_f64) {
        let snapshot = all_positions(day).unwrap();
        for body in Body::ALL {
            let position = ecliptic_longitude(body, day).unwrap();
            prop_assert_eq!(snapshot.longitude(body), position.longitude);
        }
    }

    #[test]
    fn dms_fields_stay_in_range(degrees in 0.0..360.0_f64) {
        let dms = decimal_degrees_to_dms(degrees);
        prop_assert_eq!(dms.degrees, degrees as i32);
        prop_assert!((0..60).contains(&dms.minutes));
        prop_assert!((0..60).contains(&dms.seconds));
        prop_assert!((0.0..60.0).contains(&dms.arc_seconds));

        // Truncation loses less than one arc second
        let reconstructed = f64::from(dms.degrees)
            + f64::from(dms.minutes) / 60.0
            + f64::from(dms.seconds) / 3600.0;
        prop_assert!((degrees - reconstructed).abs() < 1.0 / 3600.0 + 1e-9);
    }
}
