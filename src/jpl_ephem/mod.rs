//! # Ephemeris provider
//!
//! [`Ephemeris`] wraps a decoded SPK kernel ([`NaifData`]) and answers the one question the
//! rest of the crate asks: *where does a body appear in the sky of the Earth at a given time?*
//!
//! Positions are resolved against the Solar System Barycenter by walking the segment chain
//! `target → center → … → 0`. A DE4xx kernel gives for instance
//! `Moon (301) → Earth-Moon barycenter (3) → SSB (0)` and
//! `Saturn barycenter (6) → SSB (0)`.
//!
//! The apparent direction of a body seen from the geocenter is built in two steps:
//!
//! 1. **light time**: the body position is taken at `t − τ`, with `τ = |ρ| / c` iterated
//!    [`LIGHT_TIME_ITERATIONS`] times starting from `τ = 0`,
//! 2. **annual aberration**: the geocentric vector is shifted to first order along the
//!    barycentric velocity of the Earth (see [`correct_aberration`]).
//!
//! Units follow the kernel conversion to AU and AU/day, light time is expressed in days.
use camino::Utf8Path;
use nalgebra::Vector3;
use tracing::info;

use crate::{
    conjunction_errors::ConjunctionError,
    constants::{AU, LIGHT_TIME_ITERATIONS, SECONDS_PER_DAY, VLIGHT_AU},
    jpl_ephem::naif::{
        naif_data::{NaifData, Segment},
        naif_ids::{NaifId, EARTH, EARTH_MOON_BARYCENTER},
    },
    time::TimePoint,
};

pub mod download_jpl_file;
pub mod naif;

/// Segments deeper than this are treated as a broken chain.
const MAX_CHAIN_DEPTH: usize = 8;

/// Barycentric state vector, position in AU and velocity in AU/day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

#[derive(Debug, Clone)]
pub struct Ephemeris {
    naif: NaifData,
}

/// First-order stellar aberration seen by a moving observer.
///
/// Arguments
/// ---------
/// * `xrel`: observer → target vector \[AU\].
/// * `observer_velocity`: barycentric velocity of the observer \[AU/day\].
///
/// Returns
/// --------
/// * The apparent direction `xrel + (‖xrel‖ / c) · v`, not normalized.
pub(crate) fn correct_aberration(
    xrel: Vector3<f64>,
    observer_velocity: Vector3<f64>,
) -> Vector3<f64> {
    let dt = xrel.norm() / VLIGHT_AU;
    xrel + dt * observer_velocity
}

impl Ephemeris {
    pub fn from_naif(naif: NaifData) -> Self {
        Ephemeris { naif }
    }

    /// Read an SPK kernel from disk.
    pub fn load(path: &Utf8Path) -> Result<Self, ConjunctionError> {
        let naif = NaifData::read_naif_file(path)?;
        info!(
            path = %path,
            segments = naif.segments().len(),
            version = naif.header().map(|h| h.version.as_str()).unwrap_or("unknown"),
            "ephemeris loaded"
        );
        Ok(Ephemeris { naif })
    }

    pub fn naif(&self) -> &NaifData {
        &self.naif
    }

    /// Segment whose span defines the usable coverage of the kernel.
    ///
    /// The Earth-Moon barycenter relative to the SSB is used when present, otherwise the
    /// first segment in file order.
    pub fn coverage_segment(&self) -> &Segment {
        let segments = self.naif.segments();
        segments
            .iter()
            .find(|s| {
                s.summary.target == EARTH_MOON_BARYCENTER.to_id()
                    && s.summary.center == NaifId::SolarSystemBarycenter.to_id()
            })
            .unwrap_or(&segments[0])
    }

    /// Position and velocity of `target` relative to the Solar System Barycenter.
    ///
    /// Return
    /// ----------
    /// * [`ConjunctionError::BodyNotFound`] when no chain of segments reaches the SSB,
    ///   [`ConjunctionError::OutOfCoverage`] when a link of the chain does not cover the epoch.
    pub fn barycentric_state(
        &self,
        target: NaifId,
        et_seconds: f64,
    ) -> Result<StateVector, ConjunctionError> {
        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        let mut body = target.to_id();

        for _ in 0..MAX_CHAIN_DEPTH {
            if body == NaifId::SolarSystemBarycenter.to_id() {
                return Ok(StateVector {
                    position: position / AU,
                    velocity: velocity * SECONDS_PER_DAY / AU,
                });
            }
            let center = self
                .naif
                .center_of(body)
                .ok_or(ConjunctionError::BodyNotFound(target.to_id()))?;
            let (p, v) = self.naif.ephemeris(body, center, et_seconds)?;
            position += p;
            velocity += v;
            body = center;
        }
        Err(ConjunctionError::BodyNotFound(target.to_id()))
    }

    /// Apparent geocentric direction of `target` at time `t`, in AU.
    pub fn apparent_direction(
        &self,
        target: NaifId,
        t: &TimePoint,
    ) -> Result<Vector3<f64>, ConjunctionError> {
        let et = t.to_et_seconds();
        let earth = self.barycentric_state(EARTH, et)?;

        let mut light_time_days = 0.0;
        let mut rho = Vector3::zeros();
        for _ in 0..LIGHT_TIME_ITERATIONS {
            let body = self.barycentric_state(target, et - light_time_days * SECONDS_PER_DAY)?;
            rho = body.position - earth.position;
            light_time_days = rho.norm() / VLIGHT_AU;
        }

        Ok(correct_aberration(rho, earth.velocity))
    }

    /// Human readable description of the kernel.
    pub fn info(&self) -> String {
        self.naif.info()
    }
}
