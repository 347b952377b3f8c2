//! # Angular separation
//!
//! The separation of two bodies is the angle between their apparent geocentric directions
//! (see [`Ephemeris::apparent_direction`]). It is computed as
//! `atan2(|u × v|, u · v)`, which stays accurate for nearly aligned or nearly opposite
//! directions where `acos` of the normalized dot product loses precision.
//!
//! [`SeparationFn`] is the seam used by the daily sampler and the minimum finder: anything
//! that maps a [`TimePoint`] to degrees can be searched, which keeps the search testable on
//! synthetic signals.
use nalgebra::Vector3;

use crate::{
    bodies::{BodyId, Pair},
    conjunction_errors::ConjunctionError,
    constants::Degree,
    jpl_ephem::Ephemeris,
    time::TimePoint,
};

/// A scalar signal of time, in degrees.
pub trait SeparationFn {
    fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError>;

    /// Evaluate the signal at every time of `times`, in order.
    ///
    /// The first failure aborts the whole evaluation.
    fn separations(&self, times: &[TimePoint]) -> Result<Vec<Degree>, ConjunctionError> {
        times.iter().map(|t| self.separation_at(t)).collect()
    }
}

impl<T: SeparationFn + ?Sized> SeparationFn for Box<T> {
    fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError> {
        (**self).separation_at(t)
    }
}

/// Angle between two direction vectors, in degrees within `[0, 180]`.
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> Degree {
    u.cross(v).norm().atan2(u.dot(v)).to_degrees()
}

/// Apparent angular separation of `body_a` and `body_b` seen from the Earth at `t`.
pub fn separation(
    ephem: &Ephemeris,
    body_a: BodyId,
    body_b: BodyId,
    t: &TimePoint,
) -> Result<Degree, ConjunctionError> {
    let u = ephem.apparent_direction(body_a.naif_id(), t)?;
    let v = ephem.apparent_direction(body_b.naif_id(), t)?;
    Ok(angle_between(&u, &v))
}

/// Separation signal of one pair against a loaded ephemeris.
#[derive(Debug, Clone, Copy)]
pub struct PairSeparation<'a> {
    ephem: &'a Ephemeris,
    pair: Pair,
}

impl<'a> PairSeparation<'a> {
    pub fn new(ephem: &'a Ephemeris, pair: Pair) -> Self {
        PairSeparation { ephem, pair }
    }

    pub fn pair(&self) -> Pair {
        self.pair
    }
}

impl SeparationFn for PairSeparation<'_> {
    fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError> {
        separation(self.ephem, self.pair.first(), self.pair.second(), t)
    }
}
