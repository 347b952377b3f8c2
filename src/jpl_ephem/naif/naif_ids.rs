//! NAIF integer identifiers for the bodies carried by the planetary SPK kernels.
//!
//! Only the codes found in the DE4xx planetary kernels are named. Anything else is
//! kept as [`NaifId::Other`] so that exotic segments never prevent a kernel from loading.
//!
//! | Range    | Meaning                          |
//! |----------|----------------------------------|
//! | `0`      | Solar System Barycenter          |
//! | `1..=9`  | Planetary system barycenters     |
//! | `10`     | Sun                              |
//! | `x99`    | Planet mass centers              |
//! | `301`    | Moon                             |
use std::fmt;

use crate::conjunction_errors::ConjunctionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaifId {
    SolarSystemBarycenter,
    Sun,
    /// Planetary system barycenter, `1..=9` (3 is the Earth–Moon barycenter).
    Barycenter(u8),
    /// Planet mass center, `199..=999`.
    PlanetCenter(u8),
    Moon,
    Other(i32),
}

pub const EARTH: NaifId = NaifId::PlanetCenter(3);
pub const EARTH_MOON_BARYCENTER: NaifId = NaifId::Barycenter(3);

impl NaifId {
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => NaifId::SolarSystemBarycenter,
            10 => NaifId::Sun,
            1..=9 => NaifId::Barycenter(id as u8),
            301 => NaifId::Moon,
            199 | 299 | 399 | 499 | 599 | 699 | 799 | 899 | 999 => {
                NaifId::PlanetCenter((id / 100) as u8)
            }
            _ => NaifId::Other(id),
        }
    }

    pub fn to_id(&self) -> i32 {
        match self {
            NaifId::SolarSystemBarycenter => 0,
            NaifId::Sun => 10,
            NaifId::Barycenter(n) => *n as i32,
            NaifId::PlanetCenter(n) => *n as i32 * 100 + 99,
            NaifId::Moon => 301,
            NaifId::Other(id) => *id,
        }
    }
}

impl From<NaifId> for i32 {
    fn from(naif_id: NaifId) -> Self {
        naif_id.to_id()
    }
}

impl From<i32> for NaifId {
    fn from(id: i32) -> Self {
        NaifId::from_id(id)
    }
}

fn planet_name(n: u8) -> &'static str {
    match n {
        1 => "Mercury",
        2 => "Venus",
        3 => "Earth",
        4 => "Mars",
        5 => "Jupiter",
        6 => "Saturn",
        7 => "Uranus",
        8 => "Neptune",
        9 => "Pluto",
        _ => "Unknown",
    }
}

impl fmt::Display for NaifId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaifId::SolarSystemBarycenter => write!(f, "Solar System Barycenter"),
            NaifId::Sun => write!(f, "Sun"),
            NaifId::Barycenter(3) => write!(f, "Earth-Moon Barycenter"),
            NaifId::Barycenter(n) => write!(f, "{} Barycenter", planet_name(*n)),
            NaifId::PlanetCenter(n) => write!(f, "{}", planet_name(*n)),
            NaifId::Moon => write!(f, "Moon"),
            NaifId::Other(id) => write!(f, "NAIF {id}"),
        }
    }
}

/// SPK segment data types. Only the Chebyshev types 2 and 3 are evaluated by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SpkDataType {
    ModifiedDifferenceArray = 1,
    ChebyshevPositionOnly = 2,
    ChebyshevPositionVelocity = 3,
    TwoBodyDiscreteStates = 5,
    EquallySpacedLagrange = 8,
    UnequallySpacedLagrange = 9,
    TwoLineElements = 10,
    HermiteUniform = 12,
    HermiteNonUniform = 13,
    ChebyshevNonUniform = 14,
    PrecessingConic = 15,
    EquinoctialElements = 17,
    ChebyshevVelocityOnly = 20,
    ExtendedModifiedDifferenceArray = 21,
}

impl SpkDataType {
    /// Number of Chebyshev coefficient sets stored per record (X, Y, Z and optionally VX, VY, VZ).
    pub fn coefficient_sets(&self) -> Option<usize> {
        match self {
            SpkDataType::ChebyshevPositionOnly => Some(3),
            SpkDataType::ChebyshevPositionVelocity => Some(6),
            _ => None,
        }
    }
}

impl TryFrom<i32> for SpkDataType {
    type Error = ConjunctionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use SpkDataType::*;
        match value {
            1 => Ok(ModifiedDifferenceArray),
            2 => Ok(ChebyshevPositionOnly),
            3 => Ok(ChebyshevPositionVelocity),
            5 => Ok(TwoBodyDiscreteStates),
            8 => Ok(EquallySpacedLagrange),
            9 => Ok(UnequallySpacedLagrange),
            10 => Ok(TwoLineElements),
            12 => Ok(HermiteUniform),
            13 => Ok(HermiteNonUniform),
            14 => Ok(ChebyshevNonUniform),
            15 => Ok(PrecessingConic),
            17 => Ok(EquinoctialElements),
            20 => Ok(ChebyshevVelocityOnly),
            21 => Ok(ExtendedModifiedDifferenceArray),
            _ => Err(ConjunctionError::InvalidSpkDataType(value)),
        }
    }
}

impl fmt::Display for SpkDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpkDataType::ModifiedDifferenceArray => "Modified Difference Array",
            SpkDataType::ChebyshevPositionOnly => "Chebyshev Position Only",
            SpkDataType::ChebyshevPositionVelocity => "Chebyshev Position Velocity",
            SpkDataType::TwoBodyDiscreteStates => "Two Body Discrete States",
            SpkDataType::EquallySpacedLagrange => "Equally Spaced Lagrange",
            SpkDataType::UnequallySpacedLagrange => "Unequally Spaced Lagrange",
            SpkDataType::TwoLineElements => "Two Line Elements",
            SpkDataType::HermiteUniform => "Hermite Uniform",
            SpkDataType::HermiteNonUniform => "Hermite Non Uniform",
            SpkDataType::ChebyshevNonUniform => "Chebyshev Non Uniform",
            SpkDataType::PrecessingConic => "Precessing Conic",
            SpkDataType::EquinoctialElements => "Equinoctial Elements",
            SpkDataType::ChebyshevVelocityOnly => "Chebyshev Velocity Only",
            SpkDataType::ExtendedModifiedDifferenceArray => "Extended Modified Difference Array",
        };
        write!(f, "{s}")
    }
}
