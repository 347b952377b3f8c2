//! Segment descriptors of an SPK kernel.
//!
//! With `ND = 2` and `NI = 6`, each descriptor packs two doubles (coverage in ET seconds)
//! and six integers (target, center, frame, data type, first and last DP-word).
use std::fmt;

use nom::{
    number::complete::{le_f64, le_i32},
    IResult, Parser,
};

use crate::{
    constants::{JulianDay, JD_J2000, SECONDS_PER_DAY},
    jpl_ephem::naif::naif_ids::{NaifId, SpkDataType},
};

#[derive(Debug, PartialEq, Clone)]
pub struct Summary {
    pub start_et: f64,
    pub end_et: f64,
    pub target: i32,
    pub center: i32,
    pub frame: i32,
    pub data_type: i32,
    /// First DP-word of the segment, counted from 1.
    pub first_word: usize,
    pub last_word: usize,
}

impl Summary {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, ((start_et, end_et), (target, center, frame, data_type), (first, last))) = (
            (le_f64, le_f64),
            (le_i32, le_i32, le_i32, le_i32),
            (le_i32, le_i32),
        )
            .parse(input)?;
        Ok((
            input,
            Summary {
                start_et,
                end_et,
                target,
                center,
                frame,
                data_type,
                first_word: first.max(0) as usize,
                last_word: last.max(0) as usize,
            },
        ))
    }

    /// Segment coverage as Julian Dates (TDB).
    pub fn coverage_jd(&self) -> (JulianDay, JulianDay) {
        (
            JD_J2000 + self.start_et / SECONDS_PER_DAY,
            JD_J2000 + self.end_et / SECONDS_PER_DAY,
        )
    }

    pub fn contains(&self, et_seconds: f64) -> bool {
        (self.start_et..=self.end_et).contains(&et_seconds)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start_jd, end_jd) = self.coverage_jd();
        let kind = match SpkDataType::try_from(self.data_type) {
            Ok(t) => t.to_string(),
            Err(_) => format!("type {}", self.data_type),
        };
        writeln!(
            f,
            "  {} relative to {} (frame {})",
            NaifId::from_id(self.target),
            NaifId::from_id(self.center),
            self.frame
        )?;
        writeln!(f, "  JD {start_jd:.1} .. {end_jd:.1}, {kind}")?;
        writeln!(f, "  words {} .. {}", self.first_word, self.last_word)
    }
}

#[cfg(test)]
mod test_summary {
    use super::*;

    /// Earth-Moon barycenter segment of DE440.
    fn emb_segment() -> Summary {
        Summary {
            start_et: -14_200_747_200.0,
            end_et: 20_514_081_600.0,
            target: 3,
            center: 0,
            frame: 1,
            data_type: 2,
            first_word: 3_021_513,
            last_word: 4_051_108,
        }
    }

    #[test]
    fn test_parse_descriptor() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-14_200_747_200.0f64).to_le_bytes());
        bytes.extend_from_slice(&20_514_081_600.0f64.to_le_bytes());
        for v in [3i32, 0, 1, 2, 3_021_513, 4_051_108] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.extend_from_slice(&[0xAA; 4]);

        let (rest, summary) = Summary::parse(&bytes).unwrap();
        assert_eq!(rest, &[0xAA; 4]);
        assert_eq!(summary, emb_segment());
    }

    #[test]
    fn test_truncated_descriptor() {
        assert!(Summary::parse(&[0u8; 39]).is_err());
    }

    #[test]
    fn test_coverage() {
        let segment = emb_segment();
        assert_eq!(segment.coverage_jd(), (2_287_184.5, 2_688_976.5));
        assert!(segment.contains(0.0));
        assert!(segment.contains(segment.end_et));
        assert!(!segment.contains(segment.end_et + 1.0));
    }

    #[test]
    fn test_display() {
        let output = emb_segment().to_string();
        assert!(output.contains("Earth-Moon Barycenter relative to Solar System Barycenter"));
        assert!(output.contains("JD 2287184.5 .. 2688976.5"));
        assert!(output.contains("words 3021513 .. 4051108"));
    }
}
