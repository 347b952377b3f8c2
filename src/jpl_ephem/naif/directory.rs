//! Directory footer of a Chebyshev (type 2/3) SPK segment.
//!
//! The last four DP-words of the segment hold:
//!
//! * `init`: start epoch of the first record (ET seconds past J2000),
//! * `intlen`: time span covered by each record (seconds),
//! * `rsize`: record size in DP-words (not bytes),
//! * `n_records`: number of records in the segment.
//!
//! A DAF address counts 8-byte words from 1, so the footer starts at byte
//! `(end_addr - 4) * 8`.

use std::io::{Read, Seek, SeekFrom};

use nom::number::complete::le_f64;

use crate::conjunction_errors::ConjunctionError;

#[derive(Debug, PartialEq, Clone)]
pub struct DirectoryData {
    pub init: f64,
    pub intlen: f64,
    pub rsize: usize,
    pub n_records: usize,
}

impl DirectoryData {
    /// Read the footer of the segment ending at `end_addr` (1-based DP-word address).
    pub fn parse<R: Read + Seek>(
        file: &mut R,
        end_addr: usize,
    ) -> Result<Self, ConjunctionError> {
        if end_addr < 4 {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "segment end address {end_addr} is too small to hold a directory"
            )));
        }

        let mut dir_buf = [0u8; 32];
        file.seek(SeekFrom::Start(((end_addr - 4) * 8) as u64))?;
        file.read_exact(&mut dir_buf)?;

        let corrupted =
            |_| ConjunctionError::InvalidSpkFile("truncated segment directory".to_string());
        let (input, init) = le_f64::<_, nom::error::Error<_>>(dir_buf.as_slice()).map_err(corrupted)?;
        let (input, intlen) = le_f64::<_, nom::error::Error<_>>(input).map_err(corrupted)?;
        let (input, rsize) = le_f64::<_, nom::error::Error<_>>(input).map_err(corrupted)?;
        let (_, n_records) = le_f64::<_, nom::error::Error<_>>(input).map_err(corrupted)?;

        if intlen <= 0.0 || rsize < 5.0 || n_records < 1.0 {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "inconsistent directory: intlen={intlen} rsize={rsize} n={n_records}"
            )));
        }

        Ok(DirectoryData {
            init,
            intlen,
            rsize: rsize as usize,
            n_records: n_records as usize,
        })
    }

    /// 0-based index of the record covering `et_seconds`, clamped to the last record so that
    /// the segment end epoch itself is still served.
    pub fn record_index(&self, et_seconds: f64) -> usize {
        let idx = ((et_seconds - self.init) / self.intlen).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.n_records - 1)
        }
    }
}
