//! # Time points and civil dates
//!
//! [`TimePoint`] is the continuous time value threaded through the sampler, the minimum
//! finder and the coverage resolver. It wraps a [`hifitime::Epoch`] and only exposes
//! what those components need:
//!
//! - conversion to and from a civil `YYYY-MM-DD` date (UTC),
//! - an offset by a (possibly fractional) number of days,
//! - ordering,
//! - the ephemeris time scale (ET seconds past J2000) used by SPK kernels,
//! - Julian Dates in the TT scale, used to express ephemeris coverage.
use std::{fmt, str::FromStr};

use hifitime::{Epoch, TimeScale, Unit};

use crate::{
    constants::{DateString, JulianDay, JDTOMJD},
    conjunction_errors::ConjunctionError,
};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimePoint(Epoch);

impl TimePoint {
    /// Midnight UTC of a civil date.
    ///
    /// Arguments
    /// ---------
    /// * `year`, `month`, `day`: Gregorian calendar date
    ///
    /// Return
    /// ------
    /// * The time point, or [`ConjunctionError::InvalidDate`] if the date does not exist
    pub fn from_utc_date(year: i32, month: u8, day: u8) -> Result<Self, ConjunctionError> {
        Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
            .map(TimePoint)
            .map_err(|_| ConjunctionError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Build a time point from a Julian Date expressed in the TT time scale.
    pub fn from_jd_tt(jd: JulianDay) -> Self {
        TimePoint(Epoch::from_mjd_in_time_scale(jd - JDTOMJD, TimeScale::TT))
    }

    /// Today at midnight UTC, read from the system clock.
    pub fn today_utc() -> Result<Self, ConjunctionError> {
        let (year, month, day, _, _, _, _) = Epoch::now()?.to_gregorian_utc();
        TimePoint::from_utc_date(year, month, day)
    }

    pub fn to_jd_tt(&self) -> JulianDay {
        self.0.to_mjd_tt_days() + JDTOMJD
    }

    pub fn to_et_seconds(&self) -> f64 {
        self.0.to_et_seconds()
    }

    /// A new time point shifted by `days` (may be fractional or negative).
    pub fn add_days(&self, days: f64) -> Self {
        TimePoint(self.0 + Unit::Day * days)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: &TimePoint) -> f64 {
        (self.0 - earlier.0).to_unit(Unit::Day)
    }

    /// Civil year of this instant in UTC.
    pub fn year(&self) -> i32 {
        self.0.to_gregorian_utc().0
    }

    /// Render the UTC calendar date of this instant as `YYYY-MM-DD` (time of day is truncated).
    pub fn to_date_string(&self) -> DateString {
        let (year, month, day, _, _, _, _) = self.0.to_gregorian_utc();
        format!("{year:04}-{month:02}-{day:02}")
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TimePoint {
    type Err = ConjunctionError;

    /// Parse a civil `YYYY-MM-DD` date into midnight UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConjunctionError::InvalidDate(s.to_string());

        let mut parts = s.trim().splitn(3, '-');
        let year = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let month = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let day = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        TimePoint::from_utc_date(year, month, day).map_err(|_| invalid())
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of civil days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}
