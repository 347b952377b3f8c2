//! Run configuration of a [`Conjunctions`](crate::conjunctions::Conjunctions) session.
use camino::{Utf8Path, Utf8PathBuf};

use crate::constants::{
    DEFAULT_EPHEMERIS_FILE, DEFAULT_STEP_DAYS, DEFAULT_WINDOW_DAYS, DEFAULT_YEAR,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ConjunctionConfig {
    /// Directory holding the kernel; `None` tries `/var/data` then `~/.data`.
    pub data_dir: Option<Utf8PathBuf>,
    pub ephemeris_file: String,
    /// Year of the daily table.
    pub year: i32,
    pub cache_dir: Utf8PathBuf,
    /// Coarse sampling step of the minimum search, in days.
    pub step_days: f64,
    pub window_days: i64,
}

impl Default for ConjunctionConfig {
    fn default() -> Self {
        ConjunctionConfig {
            data_dir: None,
            ephemeris_file: DEFAULT_EPHEMERIS_FILE.to_string(),
            year: DEFAULT_YEAR,
            cache_dir: Utf8PathBuf::from("."),
            step_days: DEFAULT_STEP_DAYS,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl ConjunctionConfig {
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Utf8Path>) -> Self {
        self.data_dir = Some(data_dir.as_ref().to_path_buf());
        self
    }

    pub fn with_ephemeris_file(mut self, filename: impl Into<String>) -> Self {
        self.ephemeris_file = filename.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl AsRef<Utf8Path>) -> Self {
        self.cache_dir = cache_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_step_days(mut self, step_days: f64) -> Self {
        self.step_days = step_days;
        self
    }

    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }
}
