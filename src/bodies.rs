//! # Bodies and pairs
//!
//! The six naked-eye bodies tracked by the tables and their unordered pairs.
//!
//! The enumeration order `Mercury, Venus, Moon, Mars, Jupiter, Saturn` is canonical: it
//! fixes which body comes first in a [`Pair`], the pair labels (`mercury-venus`, …) and the
//! column order of the CSV tables. Changing it would invalidate every cached table.
use std::{fmt, str::FromStr};

use crate::jpl_ephem::naif::naif_ids::NaifId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BodyId {
    Mercury,
    Venus,
    Moon,
    Mars,
    Jupiter,
    Saturn,
}

impl BodyId {
    /// All bodies in canonical order.
    pub const ALL: [BodyId; 6] = [
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Moon,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
    ];

    /// Lower-case name used in pair labels.
    pub fn name(&self) -> &'static str {
        match self {
            BodyId::Mercury => "mercury",
            BodyId::Venus => "venus",
            BodyId::Moon => "moon",
            BodyId::Mars => "mars",
            BodyId::Jupiter => "jupiter",
            BodyId::Saturn => "saturn",
        }
    }

    /// NAIF code looked up in the kernel.
    ///
    /// DE4xx kernels carry mass centers for the inner planets but only system barycenters
    /// for the giant planets, which is also what the tables refer to.
    pub fn naif_id(&self) -> NaifId {
        match self {
            BodyId::Mercury => NaifId::PlanetCenter(1),
            BodyId::Venus => NaifId::PlanetCenter(2),
            BodyId::Moon => NaifId::Moon,
            BodyId::Mars => NaifId::PlanetCenter(4),
            BodyId::Jupiter => NaifId::Barycenter(5),
            BodyId::Saturn => NaifId::Barycenter(6),
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BodyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyId::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown body {s:?}"))
    }
}

/// Unordered pair of distinct bodies, stored in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair {
    first: BodyId,
    second: BodyId,
}

impl Pair {
    /// Build the pair `{a, b}`; `None` when `a == b`.
    pub fn new(a: BodyId, b: BodyId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Pair {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Some(Pair {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> BodyId {
        self.first
    }

    pub fn second(&self) -> BodyId {
        self.second
    }

    /// Column label, `<first>-<second>` in lower case.
    pub fn label(&self) -> String {
        format!("{}-{}", self.first.name(), self.second.name())
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl FromStr for Pair {
    type Err = String;

    /// Parse a label such as `jupiter-saturn` (either order).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| format!("pair label {s:?} is not of the form <a>-<b>"))?;
        Pair::new(a.parse()?, b.parse()?).ok_or_else(|| format!("pair {s:?} repeats a body"))
    }
}
