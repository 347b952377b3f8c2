//! # Conjunctions
//!
//! [`Conjunctions`] is the entry point of the crate. It owns the run
//! [`ConjunctionConfig`] and the ephemeris, and ties the pipeline together:
//!
//! ```text
//! load kernel ─► coverage ─┬─► daily table of `year`   ─► planetary_separations_<year>.csv
//!                          └─► minima over the coverage ─► planetary_separation_minima_<s>-<e>.csv
//! ```
//!
//! The kernel is opened on first use via [`OnceCell`], then reused.
//! Both tables go through the CSV cache (see [`crate::cache`]): a present file is loaded,
//! a missing one is computed and written.
//!
//! ## Example
//!
//! ```rust,no_run
//! use conjunctions::{config::ConjunctionConfig, conjunctions::Conjunctions};
//!
//! let session = Conjunctions::new(ConjunctionConfig::default().with_year(2020));
//! let (daily, minima) = session.calculate()?;
//! println!("{}", daily.window("2020-12-18", "2020-12-24"));
//! println!("{} conjunction dates", minima.len());
//! # Ok::<(), conjunctions::conjunction_errors::ConjunctionError>(())
//! ```
use camino::Utf8Path;
use once_cell::sync::OnceCell;
use tracing::info;

use crate::{
    cache::{daily_table_path, get_or_compute, minima_table_path},
    config::ConjunctionConfig,
    conjunction_errors::ConjunctionError,
    constants::Degree,
    coverage::{coverage, EphemerisCoverage},
    daily_sampler::sample_year,
    jpl_ephem::{
        download_jpl_file::{get_ephemeris_file, resolve_data_dir},
        Ephemeris,
    },
    minimum_finder::minima_table,
    pair_catalog::{pair_labels, PairCatalog},
    tables::{ConjunctionEvent, DatedTable},
    time::TimePoint,
};

/// Resolve the data directory, fetch the kernel if needed and decode it.
///
/// Arguments
/// ---------
/// * `data_dir`: explicit kernel directory, or `None` for the default candidates.
/// * `filename`: kernel file name inside that directory.
pub fn load_ephemeris(
    data_dir: Option<&Utf8Path>,
    filename: &str,
) -> Result<Ephemeris, ConjunctionError> {
    let dir = resolve_data_dir(data_dir)?;
    let path = get_ephemeris_file(&dir, filename)?;
    Ephemeris::load(&path)
}

#[derive(Debug)]
pub struct Conjunctions {
    config: ConjunctionConfig,
    ephem: OnceCell<Ephemeris>,
}

impl Conjunctions {
    pub fn new(config: ConjunctionConfig) -> Self {
        Conjunctions {
            config,
            ephem: OnceCell::new(),
        }
    }

    /// Session over an already decoded kernel; the data directory is never consulted.
    pub fn with_ephemeris(config: ConjunctionConfig, ephem: Ephemeris) -> Self {
        Conjunctions {
            config,
            ephem: OnceCell::with_value(ephem),
        }
    }

    pub fn config(&self) -> &ConjunctionConfig {
        &self.config
    }

    /// Get the lazily loaded ephemeris.
    ///
    /// The first call runs [`load_ephemeris`] with the configured directory and file name;
    /// later calls return the same reference. A failed load is retried on the next call.
    pub fn ephemeris(&self) -> Result<&Ephemeris, ConjunctionError> {
        self.ephem.get_or_try_init(|| {
            load_ephemeris(self.config.data_dir.as_deref(), &self.config.ephemeris_file)
        })
    }

    pub fn coverage(&self) -> Result<EphemerisCoverage, ConjunctionError> {
        coverage(self.ephemeris()?)
    }

    /// Daily table of `year`, from the cache when present.
    pub fn daily_table(&self, year: i32) -> Result<DatedTable, ConjunctionError> {
        let path = daily_table_path(&self.config.cache_dir, year);
        let (table, _) = get_or_compute(&path, || {
            let catalog = PairCatalog::new(self.ephemeris()?);
            sample_year(&catalog, year)
        })?;
        Ok(table)
    }

    /// Minima table over the whole usable coverage, from the cache when present.
    ///
    /// The cache file is named after the coverage years, so the kernel is always loaded to
    /// resolve them, even on a cache hit.
    pub fn minima_table(&self) -> Result<DatedTable, ConjunctionError> {
        let coverage = self.coverage()?;
        let (start_year, end_year) = coverage.years();
        let path = minima_table_path(&self.config.cache_dir, start_year, end_year);
        let (table, _) = get_or_compute(&path, || {
            let catalog = PairCatalog::new(self.ephemeris()?);
            minima_table(&catalog, &coverage, self.config.step_days)
        })?;
        Ok(table)
    }

    /// Daily table of the configured year and minima table over the coverage.
    pub fn calculate(&self) -> Result<(DatedTable, DatedTable), ConjunctionError> {
        let daily = self.daily_table(self.config.year)?;
        let minima = self.minima_table()?;
        info!(
            year = self.config.year,
            daily_rows = daily.len(),
            minima_rows = minima.len(),
            "tables ready"
        );
        Ok((daily, minima))
    }

    /// Daily separations between `start` and `end`, both dates included.
    ///
    /// The rows come from the daily tables of every year the window touches, so a window
    /// across New Year reads two cache files.
    pub fn window(&self, start: &TimePoint, end: &TimePoint) -> Result<DatedTable, ConjunctionError> {
        let (from, to) = (start.to_date_string(), end.to_date_string());
        let mut rows = DatedTable::new(pair_labels());
        for year in start.year()..=end.year() {
            rows.merge(self.daily_table(year)?.window(&from, &to))?;
        }
        Ok(rows)
    }

    /// Daily separations from today to `window_days` days ahead.
    pub fn upcoming(&self) -> Result<DatedTable, ConjunctionError> {
        let today = TimePoint::today_utc()?;
        let end = today.add_days(self.config.window_days as f64);
        self.window(&today, &end)
    }

    /// Minima of the coverage as long-format events, keeping those at most `max_degrees`
    /// apart when given.
    pub fn events(&self, max_degrees: Option<Degree>) -> Result<Vec<ConjunctionEvent>, ConjunctionError> {
        let events = self.minima_table()?.events();
        Ok(match max_degrees {
            Some(limit) => events.into_iter().filter(|e| e.degrees <= limit).collect(),
            None => events,
        })
    }
}
