//! # Constants and type definitions for conjunctions
//!
//! This module centralizes the **physical constants**, **conversion factors**, the
//! **search and coverage tuning values** and the **common type aliases** used
//! throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, speed of light, Julian epochs)
//! - Unit conversions (days ↔ seconds, AU ↔ km)
//! - Default knobs of the daily sampler, the minimum finder and the coverage resolver
//! - Naming of the CSV cache artifacts

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian Date of J2000.0 (2000-01-01 12:00:00 TDB)
pub const JD_J2000: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2_400_000.5;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// Number of light-time iterations used to build an astrometric position.
pub const LIGHT_TIME_ITERATIONS: usize = 3;

// -------------------------------------------------------------------------------------------------
// Sampling, search and coverage knobs
// -------------------------------------------------------------------------------------------------

/// Margin trimmed from each end of the raw ephemeris coverage (days).
pub const COVERAGE_MARGIN_DAYS: f64 = 1.5;

/// Nominal step of the daily sampler and default step of the minimum finder (days).
pub const DEFAULT_STEP_DAYS: f64 = 1.0;

/// Convergence tolerance of the minimum refinement (days, about one second).
pub const MINIMUM_TOLERANCE_DAYS: f64 = 1e-5;

/// Hard cap on golden-section iterations for a single bracket.
pub const MINIMUM_MAX_ITERATIONS: usize = 100;

/// Number of decimals kept in the persisted tables.
pub const TABLE_DECIMALS: i32 = 2;

/// Default ephemeris kernel (DE421).
pub const DEFAULT_EPHEMERIS_FILE: &str = "de421.bsp";

/// Default year sampled by the daily table.
pub const DEFAULT_YEAR: i32 = 2022;

/// Default length of the query window (days after its start).
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Julian Date (days)
pub type JulianDay = f64;
/// Calendar date rendered as `YYYY-MM-DD`
pub type DateString = String;
