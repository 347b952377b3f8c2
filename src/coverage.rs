//! # Ephemeris coverage
//!
//! The usable span of a kernel is the span of its coverage segment (see
//! [`Ephemeris::coverage_segment`]) trimmed by [`COVERAGE_MARGIN_DAYS`] at both ends and
//! snapped to whole Julian days, so that no evaluation lands on the numerical edge of the
//! Chebyshev records. Rounding is ties-to-even: a DE kernel starting at JD 2414864.5
//! becomes usable from JD 2414866.
use tracing::info;

use crate::{
    conjunction_errors::ConjunctionError,
    constants::{JulianDay, COVERAGE_MARGIN_DAYS},
    jpl_ephem::Ephemeris,
    time::TimePoint,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisCoverage {
    pub start: TimePoint,
    pub end: TimePoint,
}

impl EphemerisCoverage {
    /// Trim a raw Julian Date range.
    ///
    /// Return
    /// ----------
    /// * `(round(start + 1.5), round(end − 1.5))` as time points, or
    ///   [`ConjunctionError::InvalidCoverage`] when the trimmed start is not before the end.
    ///   Both bounds are inclusive: the trimmed end is itself a usable epoch.
    pub fn from_jd_range(start_jd: JulianDay, end_jd: JulianDay) -> Result<Self, ConjunctionError> {
        let start = (start_jd + COVERAGE_MARGIN_DAYS).round_ties_even();
        let end = (end_jd - COVERAGE_MARGIN_DAYS).round_ties_even();
        if start >= end {
            return Err(ConjunctionError::InvalidCoverage(start, end));
        }
        Ok(EphemerisCoverage {
            start: TimePoint::from_jd_tt(start),
            end: TimePoint::from_jd_tt(end),
        })
    }

    /// Civil years of both ends, as embedded in the minima cache file name.
    pub fn years(&self) -> (i32, i32) {
        (self.start.year(), self.end.year())
    }

    pub fn contains(&self, t: &TimePoint) -> bool {
        *t >= self.start && *t <= self.end
    }
}

/// Usable coverage of a loaded ephemeris.
pub fn coverage(ephem: &Ephemeris) -> Result<EphemerisCoverage, ConjunctionError> {
    let (start_jd, end_jd) = ephem.coverage_segment().summary.coverage_jd();
    let coverage = EphemerisCoverage::from_jd_range(start_jd, end_jd)?;
    info!(
        raw_start_jd = start_jd,
        raw_end_jd = end_jd,
        start = %coverage.start.to_date_string(),
        end = %coverage.end.to_date_string(),
        "ephemeris coverage"
    );
    Ok(coverage)
}
