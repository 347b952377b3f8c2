//! # Daily sampler
//!
//! Builds the daily table of a civil year: every pair is evaluated once per day at
//! 00:00 UTC, from January 1st to December 31st, and the values are rounded to
//! [`TABLE_DECIMALS`] decimals.
use tracing::{debug, info};

use crate::{
    conjunction_errors::ConjunctionError,
    constants::{DEFAULT_STEP_DAYS, TABLE_DECIMALS},
    pair_catalog::{pair_labels, PairCatalog},
    progress::PairProgress,
    separation::SeparationFn,
    tables::{round_to, DatedTable},
    time::{days_in_year, TimePoint},
};

/// Midnight UTC of every day of `year`, 365 or 366 time points.
pub fn year_days(year: i32) -> Result<Vec<TimePoint>, ConjunctionError> {
    let first = TimePoint::from_utc_date(year, 1, 1)?;
    Ok((0..days_in_year(year))
        .map(|d| first.add_days(f64::from(d) * DEFAULT_STEP_DAYS))
        .collect())
}

/// Sample every `(label, function)` at every time of `times`.
///
/// Columns keep the order of `functions`; rows are keyed by the UTC date of each time.
/// Any evaluation error aborts the whole table.
pub fn sample_days<F: SeparationFn>(
    functions: &[(String, F)],
    times: &[TimePoint],
) -> Result<DatedTable, ConjunctionError> {
    let columns = functions.iter().map(|(label, _)| label.clone()).collect();
    let mut table = DatedTable::new(columns);
    let dates: Vec<_> = times.iter().map(TimePoint::to_date_string).collect();

    let mut progress = PairProgress::new(functions.len(), "daily");
    for (label, f) in functions {
        progress.start(label);
        let values = f.separations(times)?;
        for (date, value) in dates.iter().zip(values) {
            table.set(date, label, round_to(value, TABLE_DECIMALS))?;
        }
        let elapsed = progress.finish_one();
        debug!(pair = %label, ?elapsed, "daily samples computed");
    }
    progress.finish();
    Ok(table)
}

/// Daily table of `year` for the 15 pairs of `catalog`.
pub fn sample_year(catalog: &PairCatalog, year: i32) -> Result<DatedTable, ConjunctionError> {
    info!(year, "sampling daily separations");
    let functions: Vec<_> = catalog
        .pairs()
        .into_iter()
        .map(|pair| (pair.label(), catalog.function_for(pair)))
        .collect();
    let table = sample_days(&functions, &year_days(year)?)?;
    debug_assert_eq!(table.columns(), pair_labels().as_slice());
    Ok(table)
}
