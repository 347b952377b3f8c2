//! In-memory SPK kernel.
//!
//! Loading follows the DAF layout:
//!
//! 1. the file record ([`DAFHeader`]) gives the summary layout and the first summary record,
//! 2. records `2 .. fward` hold the comment area, where JPL kernels describe themselves,
//! 3. summary records form a doubly linked list; each one lists up to `nsum` segment
//!    descriptors ([`Summary`]),
//! 4. each Chebyshev segment ends with a [`DirectoryData`] footer, and its records are
//!    decoded eagerly into [`EphemerisRecord`]s.
//!
//! Segments whose data type cannot be evaluated are skipped with a warning so that a kernel
//! mixing types still serves the bodies it can.
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
};

use camino::Utf8Path;
use nalgebra::Vector3;
use nom::number::complete::le_f64;
use tracing::{debug, warn};

use crate::{
    conjunction_errors::ConjunctionError,
    constants::Kilometer,
    jpl_ephem::naif::{
        daf_header::{DAFHeader, DAF_RECORD_BYTES},
        directory::DirectoryData,
        ephemeris_record::EphemerisRecord,
        jpl_ephem_header::JPLEphemHeader,
        naif_ids::{NaifId, SpkDataType},
        summary_record::Summary,
    },
};

/// One evaluable segment of the kernel.
#[derive(Debug, Clone)]
pub struct Segment {
    pub summary: Summary,
    pub directory: DirectoryData,
    pub records: Vec<EphemerisRecord>,
}

impl Segment {
    /// Position (km) and velocity (km/s) of `target` relative to `center` at `et_seconds`.
    pub fn state(&self, et_seconds: f64) -> (Vector3<Kilometer>, Vector3<f64>) {
        let idx = self.directory.record_index(et_seconds);
        self.records[idx.min(self.records.len() - 1)].interpolate(et_seconds)
    }
}

#[derive(Debug, Clone)]
pub struct NaifData {
    pub(crate) daf_header: DAFHeader,
    pub(crate) header: Option<JPLEphemHeader>,
    pub(crate) segments: Vec<Segment>,
}

fn summary_record_words(buffer: &[u8]) -> Result<(f64, f64), ConjunctionError> {
    let invalid = |_| ConjunctionError::InvalidSpkFile("truncated summary record".to_string());
    let (input, next) = le_f64::<_, nom::error::Error<_>>(buffer).map_err(invalid)?;
    let (input, _previous) = le_f64::<_, nom::error::Error<_>>(input).map_err(invalid)?;
    let (_, nsum) = le_f64::<_, nom::error::Error<_>>(input).map_err(invalid)?;
    Ok((next, nsum))
}

impl NaifData {
    /// Load a binary SPK kernel and decode every Chebyshev segment.
    ///
    /// Arguments
    /// -----------------
    /// * `file_path`: location of the `.bsp` file.
    ///
    /// Return
    /// ----------
    /// * The decoded kernel, or [`ConjunctionError::InvalidSpkFile`] / an IO error.
    pub fn read_naif_file(file_path: &Utf8Path) -> Result<Self, ConjunctionError> {
        let mut file = BufReader::new(File::open(file_path)?);
        Self::from_reader(&mut file)
    }

    pub fn from_reader<R: Read + Seek>(file: &mut R) -> Result<Self, ConjunctionError> {
        let mut buffer = [0u8; DAF_RECORD_BYTES];
        file.read_exact(&mut buffer)?;
        let (_, daf_header) = DAFHeader::parse(&buffer)
            .map_err(|e| ConjunctionError::InvalidSpkFile(format!("file record: {e}")))?;
        daf_header.validate()?;

        let comment_bytes = (daf_header.fward as usize - 2) * DAF_RECORD_BYTES;
        let mut comment = vec![0u8; comment_bytes];
        file.read_exact(&mut comment)?;
        let comment = String::from_utf8_lossy(&comment).replace('\0', "\n");
        let header = JPLEphemHeader::parse(&comment).ok().map(|(_, h)| h);
        if header.is_none() {
            debug!("kernel has no JPL descriptive header");
        }

        let summary_bytes = daf_header.summary_words() * 8;
        let mut segments = Vec::new();
        let mut record_number = daf_header.fward as usize;

        while record_number != 0 {
            file.seek(SeekFrom::Start(
                ((record_number - 1) * DAF_RECORD_BYTES) as u64,
            ))?;
            file.read_exact(&mut buffer)?;
            let (next, nsum) = summary_record_words(&buffer)?;

            for i in 0..nsum as usize {
                let start = 24 + i * summary_bytes;
                let raw = buffer.get(start..start + summary_bytes).ok_or_else(|| {
                    ConjunctionError::InvalidSpkFile(format!("summary {i} overflows its record"))
                })?;
                let (_, summary) = Summary::parse(raw)
                    .map_err(|e| ConjunctionError::InvalidSpkFile(format!("summary {i}: {e}")))?;

                let data_type = match SpkDataType::try_from(summary.data_type) {
                    Ok(t) if t.coefficient_sets().is_some() => t,
                    _ => {
                        warn!(
                            target = summary.target,
                            center = summary.center,
                            data_type = summary.data_type,
                            "skipping SPK segment with unsupported data type"
                        );
                        continue;
                    }
                };

                let directory = DirectoryData::parse(file, summary.last_word)?;
                let records = EphemerisRecord::parse(
                    file,
                    summary.first_word,
                    summary.last_word,
                    directory.rsize,
                    directory.n_records,
                    data_type,
                )?;

                debug!(
                    target = summary.target,
                    center = summary.center,
                    records = records.len(),
                    "loaded SPK segment"
                );
                segments.push(Segment {
                    summary,
                    directory,
                    records,
                });
            }

            record_number = next as usize;
        }

        if segments.is_empty() {
            return Err(ConjunctionError::InvalidSpkFile(
                "kernel holds no Chebyshev segment".to_string(),
            ));
        }

        Ok(NaifData {
            daf_header,
            header,
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn header(&self) -> Option<&JPLEphemHeader> {
        self.header.as_ref()
    }

    /// `true` when at least one segment links `target` to `center`.
    pub fn has_pair(&self, target: i32, center: i32) -> bool {
        self.segments
            .iter()
            .any(|s| s.summary.target == target && s.summary.center == center)
    }

    /// Center of the first segment whose target is `target`.
    pub fn center_of(&self, target: i32) -> Option<i32> {
        self.segments
            .iter()
            .find(|s| s.summary.target == target)
            .map(|s| s.summary.center)
    }

    /// State of `target` relative to `center` at `et_seconds`.
    ///
    /// Return
    /// ----------
    /// * [`ConjunctionError::BodyNotFound`] if no segment links the pair,
    ///   [`ConjunctionError::OutOfCoverage`] if none covers the epoch.
    pub fn ephemeris(
        &self,
        target: i32,
        center: i32,
        et_seconds: f64,
    ) -> Result<(Vector3<Kilometer>, Vector3<f64>), ConjunctionError> {
        if !self.has_pair(target, center) {
            return Err(ConjunctionError::BodyNotFound(target));
        }
        self.segments
            .iter()
            .filter(|s| s.summary.target == target && s.summary.center == center)
            .find(|s| s.summary.contains(et_seconds))
            .map(|s| s.state(et_seconds))
            .ok_or(ConjunctionError::OutOfCoverage {
                target,
                center,
                et_seconds,
            })
    }

    /// Human readable description of the kernel: file record, JPL header and segments.
    pub fn info(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("+{:-^78}+\n", " Ephemeris File Information "));
        out.push_str(&self.daf_header.to_string());
        if let Some(header) = &self.header {
            out.push_str(&header.to_string());
        }
        out.push_str(&format!("+{:-^78}+\n", " Segments "));
        for segment in &self.segments {
            let title = format!(
                " {} -> {} ",
                NaifId::from_id(segment.summary.target),
                NaifId::from_id(segment.summary.center)
            );
            out.push_str(&format!("+{title:-^78}+\n"));
            out.push_str(&segment.summary.to_string());
            out.push_str(&format!(
                "records: {} of {} days\n",
                segment.directory.n_records,
                segment.directory.intlen / 86400.0
            ));
        }
        out
    }
}
