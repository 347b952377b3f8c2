//! Locating (and optionally downloading) the ephemeris kernel.
//!
//! The data directory is either given explicitly, in which case it must exist, or picked
//! from a short list of conventional locations. With the `jpl-download` feature a kernel
//! missing from that directory is fetched from the NAIF generic kernels server.
#[cfg(feature = "jpl-download")]
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use tracing::{debug, info};

use crate::conjunction_errors::ConjunctionError;

/// Public NAIF directory holding the DE4xx planetary kernels.
pub const NAIF_PLANETS_URL: &str = "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets";

/// Conventional data directories, in lookup order: `/var/data`, then `~/.data`.
fn default_data_dirs() -> Result<Vec<Utf8PathBuf>, ConjunctionError> {
    let base_dir = BaseDirs::new().ok_or_else(|| {
        ConjunctionError::DataDirNotFound("cannot determine the home directory".to_string())
    })?;
    let home = Utf8Path::from_path(base_dir.home_dir()).ok_or_else(|| {
        ConjunctionError::Utf8PathError(format!(
            "home directory {} is not valid UTF-8",
            base_dir.home_dir().display()
        ))
    })?;
    Ok(vec![Utf8PathBuf::from("/var/data"), home.join(".data")])
}

/// Pick the first existing candidate, or the last one when none exists.
fn first_existing(candidates: &[Utf8PathBuf]) -> Option<Utf8PathBuf> {
    candidates
        .iter()
        .find(|dir| dir.is_dir())
        .or(candidates.last())
        .cloned()
}

/// Resolve the directory holding the ephemeris kernel.
///
/// Arguments
/// ---------
/// * `data_dir`: an explicit directory, which must exist.
///
/// Return
/// ------
/// * The explicit directory, else the first existing of `/var/data` and `~/.data`, else
///   `~/.data` (created later, on download).
/// * [`ConjunctionError::DataDirNotFound`] if an explicit directory does not exist.
pub fn resolve_data_dir(data_dir: Option<&Utf8Path>) -> Result<Utf8PathBuf, ConjunctionError> {
    if let Some(dir) = data_dir {
        return if dir.is_dir() {
            Ok(dir.to_path_buf())
        } else {
            Err(ConjunctionError::DataDirNotFound(dir.to_string()))
        };
    }

    let candidates = default_data_dirs()?;
    let resolved = first_existing(&candidates)
        .ok_or_else(|| ConjunctionError::DataDirNotFound("no candidate directory".to_string()))?;
    debug!(data_dir = %resolved, "resolved default data directory");
    Ok(resolved)
}

/// Download a large file from a URL.
///
/// The response body is streamed chunk by chunk into the destination with tokio file I/O,
/// so the kernel never has to fit in memory.
#[cfg(feature = "jpl-download")]
async fn download_big_file(url: &str, path: &Utf8Path) -> Result<(), ConjunctionError> {
    use tokio::{fs::File, io::AsyncWriteExt};
    use tokio_stream::StreamExt;

    let response = reqwest::get(url).await?.error_for_status()?;
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}

/// Path of the kernel `filename` inside `data_dir`, downloading it when allowed.
///
/// Arguments
/// ---------
/// * `data_dir`: directory returned by [`resolve_data_dir`].
/// * `filename`: kernel file name, for example `de421.bsp`.
///
/// Return
/// ------
/// * The kernel path, or [`ConjunctionError::JPLFileNotFound`] when the file is missing and
///   the `jpl-download` feature is disabled.
pub fn get_ephemeris_file(
    data_dir: &Utf8Path,
    filename: &str,
) -> Result<Utf8PathBuf, ConjunctionError> {
    let local_file = data_dir.join(filename);
    if local_file.is_file() {
        return Ok(local_file);
    }

    #[cfg(feature = "jpl-download")]
    {
        fs::create_dir_all(data_dir)?;

        let url = format!("{NAIF_PLANETS_URL}/{filename}");
        info!(url = %url, destination = %local_file, "downloading ephemeris kernel");

        // A partially written kernel must not be mistaken for a complete one next time.
        let partial = data_dir.join(format!("{filename}.part"));
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(download_big_file(&url, &partial))?;
        fs::rename(&partial, &local_file)?;

        info!(destination = %local_file, "ephemeris kernel downloaded");
        Ok(local_file)
    }

    #[cfg(not(feature = "jpl-download"))]
    {
        info!(
            missing = %local_file,
            "ephemeris kernel not found; rebuild with the jpl-download feature to fetch it"
        );
        Err(ConjunctionError::JPLFileNotFound(local_file.to_string()))
    }
}
