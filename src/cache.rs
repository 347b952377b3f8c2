//! # CSV cache
//!
//! Each table is persisted under a file name derived from its parameters:
//!
//! | Table  | File name                                             |
//! |--------|-------------------------------------------------------|
//! | daily  | `planetary_separations_<year>.csv`                    |
//! | minima | `planetary_separation_minima_<start>-<end>.csv`        |
//!
//! A cache file is trusted as soon as it exists and parses: its content is not compared
//! with the current ephemeris. Replacing the kernel by another one with the same coverage
//! years therefore serves the old minima; delete the file to force a recomputation.
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

use crate::{conjunction_errors::ConjunctionError, tables::DatedTable};

pub fn daily_table_path(cache_dir: &Utf8Path, year: i32) -> Utf8PathBuf {
    cache_dir.join(format!("planetary_separations_{year}.csv"))
}

pub fn minima_table_path(cache_dir: &Utf8Path, start_year: i32, end_year: i32) -> Utf8PathBuf {
    cache_dir.join(format!(
        "planetary_separation_minima_{start_year}-{end_year}.csv"
    ))
}

/// Whether the table at `path` came from disk or was just computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Computed,
}

/// Load the table at `path`, or compute, persist and return it.
///
/// A missing or unreadable file is a cache miss; only errors of `compute` and of the final
/// write are returned.
pub fn get_or_compute<F>(
    path: &Utf8Path,
    compute: F,
) -> Result<(DatedTable, CacheStatus), ConjunctionError>
where
    F: FnOnce() -> Result<DatedTable, ConjunctionError>,
{
    if path.is_file() {
        match DatedTable::read_csv(path) {
            Ok(table) => {
                info!(path = %path, rows = table.len(), "cache hit");
                warn!(
                    path = %path,
                    "cached table is used as-is; delete it if the ephemeris changed"
                );
                return Ok((table, CacheStatus::Hit));
            }
            Err(err) => debug!(path = %path, error = %err, "unreadable cache file, recomputing"),
        }
    } else {
        debug!(path = %path, "cache miss");
    }

    let table = compute()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    table.write_csv(path)?;
    info!(path = %path, rows = table.len(), "table computed and cached");
    Ok((table, CacheStatus::Computed))
}
