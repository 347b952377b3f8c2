//! DAF (Double precision Array File) file record.
//!
//! The first 1024-byte record of an SPK kernel describes its binary layout:
//!
//! * **`idword`**: format identifier, `"DAF/SPK"` (older kernels: `"NAIF/DAF"`),
//! * **`nd`** / **`ni`**: double / integer components of each array summary
//!   (`nd = 2`, `ni = 6` for SPK),
//! * **`fward`** / **`bward`**: 1-based record numbers of the first and last summary record,
//! * **`free`**: first free DP-word address,
//! * **`locfmt`**: numeric encoding of the file (`"LTL-IEEE"` or `"BIG-IEEE"`).
//!
//! Integers are decoded little-endian. Big-endian kernels are rejected by
//! [`DAFHeader::validate`] rather than misread.

use std::fmt;

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

use crate::conjunction_errors::ConjunctionError;

/// Size in bytes of one DAF record.
pub const DAF_RECORD_BYTES: usize = 1024;

#[derive(Debug, PartialEq, Clone)]
pub struct DAFHeader {
    pub idword: String,
    pub internal_filename: String,
    pub nd: i32,
    pub ni: i32,
    pub fward: i32,
    pub bward: i32,
    pub free: i32,
    pub locfmt: String,
}

impl DAFHeader {
    /// Decode the file record from the first bytes of a kernel.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: a slice starting at byte 0 of the file, at least 88 bytes long.
    ///
    /// Return
    /// ----------
    /// * `(remaining, header)` with padding trimmed from the text fields.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, idword) = take(8usize)(input)?;
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;
        Ok((
            input,
            DAFHeader {
                idword: String::from_utf8_lossy(idword).trim().to_string(),
                internal_filename: String::from_utf8_lossy(ifname).trim().to_string(),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: String::from_utf8_lossy(locfmt).trim().to_string(),
            },
        ))
    }

    /// Check that the kernel is an SPK this reader can decode.
    pub fn validate(&self) -> Result<(), ConjunctionError> {
        if self.idword != "DAF/SPK" && self.idword != "NAIF/DAF" {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "unexpected id word {:?}",
                self.idword
            )));
        }
        // Pre-1995 kernels leave LOCFMT blank and are little-endian VAX/PC files.
        if !self.locfmt.is_empty() && self.locfmt != "LTL-IEEE" {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "unsupported binary format {:?}",
                self.locfmt
            )));
        }
        if self.nd != 2 || self.ni != 6 {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "unexpected summary layout ND={} NI={}",
                self.nd, self.ni
            )));
        }
        if self.fward < 2 {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "invalid first summary record {}",
                self.fward
            )));
        }
        Ok(())
    }

    /// Size of one array summary in DP-words: `ND + ceil(NI / 2)`.
    pub fn summary_words(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }
}

impl fmt::Display for DAFHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 18;
        const VALUE_WIDTH: usize = 50;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        let rows = [
            ("ID Word", self.idword.clone()),
            ("Internal Name", self.internal_filename.clone()),
            ("ND / NI", format!("{} / {}", self.nd, self.ni)),
            ("Summary records", format!("{} .. {}", self.fward, self.bward)),
            ("Free Addr", self.free.to_string()),
            ("Binary Format", self.locfmt.clone()),
        ];

        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(
                f,
                "| {:<label$}| {:<value$}|",
                label,
                value,
                label = LABEL_WIDTH,
                value = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod test_daf_header {
    use super::*;

    fn raw_header(idword: &[u8; 8], locfmt: &[u8; 8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(DAF_RECORD_BYTES);
        buf.extend_from_slice(idword);
        buf.extend_from_slice(&2i32.to_le_bytes());
        buf.extend_from_slice(&6i32.to_le_bytes());
        let mut name = [b' '; 60];
        name[..7].copy_from_slice(b"NIO2SPK");
        buf.extend_from_slice(&name);
        buf.extend_from_slice(&4i32.to_le_bytes());
        buf.extend_from_slice(&4i32.to_le_bytes());
        buf.extend_from_slice(&14974889i32.to_le_bytes());
        buf.extend_from_slice(locfmt);
        buf.resize(DAF_RECORD_BYTES, 0);
        buf
    }

    #[test]
    fn test_parse_daf_header() {
        let buf = raw_header(b"DAF/SPK ", b"LTL-IEEE");
        let (_, header) = DAFHeader::parse(&buf).unwrap();
        assert_eq!(
            header,
            DAFHeader {
                idword: "DAF/SPK".to_string(),
                internal_filename: "NIO2SPK".to_string(),
                nd: 2,
                ni: 6,
                fward: 4,
                bward: 4,
                free: 14974889,
                locfmt: "LTL-IEEE".to_string(),
            }
        );
        assert!(header.validate().is_ok());
        assert_eq!(header.summary_words(), 5);
    }

    #[test]
    fn test_reject_big_endian() {
        let buf = raw_header(b"DAF/SPK ", b"BIG-IEEE");
        let (_, header) = DAFHeader::parse(&buf).unwrap();
        assert!(matches!(
            header.validate(),
            Err(ConjunctionError::InvalidSpkFile(_))
        ));
    }

    #[test]
    fn test_reject_non_spk() {
        let buf = raw_header(b"DAF/CK  ", b"LTL-IEEE");
        let (_, header) = DAFHeader::parse(&buf).unwrap();
        assert!(header.validate().is_err());
    }
}
