//! The fixed catalog of the 15 body pairs, bound to an ephemeris.
use itertools::Itertools;

use crate::{
    bodies::{BodyId, Pair},
    jpl_ephem::Ephemeris,
    separation::PairSeparation,
};

/// Every unordered pair of [`BodyId::ALL`], as 2-combinations of the canonical order.
///
/// The order is that of the table columns: `mercury-venus`, `mercury-moon`, …,
/// `jupiter-saturn`.
pub fn all_pairs() -> Vec<Pair> {
    BodyId::ALL
        .into_iter()
        .tuple_combinations()
        .filter_map(|(a, b)| Pair::new(a, b))
        .collect()
}

/// Column labels of the tables, in pair order.
pub fn pair_labels() -> Vec<String> {
    all_pairs().iter().map(Pair::label).collect()
}

/// Separation functions of every pair over one ephemeris.
#[derive(Debug, Clone, Copy)]
pub struct PairCatalog<'a> {
    ephem: &'a Ephemeris,
}

impl<'a> PairCatalog<'a> {
    pub fn new(ephem: &'a Ephemeris) -> Self {
        PairCatalog { ephem }
    }

    pub fn pairs(&self) -> Vec<Pair> {
        all_pairs()
    }

    pub fn function_for(&self, pair: Pair) -> PairSeparation<'a> {
        PairSeparation::new(self.ephem, pair)
    }
}
