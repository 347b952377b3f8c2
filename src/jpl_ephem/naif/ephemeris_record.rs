//! Chebyshev records of SPK type 2 and 3 segments.
//!
//! Each record is `rsize` little-endian DP-words:
//!
//! 1. `mid`, midpoint of the record interval (ET seconds past J2000),
//! 2. `radius`, half-width of the interval (seconds),
//! 3. `ncoeff` coefficients for X, then Y, then Z (km),
//! 4. for type 3 only, `ncoeff` coefficients for VX, VY, VZ (km/s).
//!
//! Velocity sets of type 3 records are skipped: velocities are obtained by
//! differentiating the position series, which is what type 2 requires anyway.
use std::io::{Read, Seek, SeekFrom};

use nalgebra::Vector3;
use nom::{multi::count, number::complete::le_f64, IResult, Parser};

use crate::{
    conjunction_errors::ConjunctionError, constants::Kilometer,
    jpl_ephem::naif::naif_ids::SpkDataType,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    pub mid: f64,
    pub radius: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl EphemerisRecord {
    fn parse_record(input: &[u8], ncoeff: usize) -> IResult<&[u8], Self> {
        let (input, (mid, radius)) = (le_f64, le_f64).parse(input)?;
        let (input, (x, y, z)) = (
            count(le_f64, ncoeff),
            count(le_f64, ncoeff),
            count(le_f64, ncoeff),
        )
            .parse(input)?;
        Ok((input, EphemerisRecord { mid, radius, x, y, z }))
    }

    /// Read every record of a segment.
    ///
    /// Arguments
    /// -----------------
    /// * `file`: kernel reader.
    /// * `first_word`, `last_word`: DP-word range of the segment (1-based, inclusive).
    /// * `rsize`: record size in DP-words, taken from the segment directory.
    /// * `n_records`: number of records, taken from the segment directory.
    /// * `data_type`: segment type, which fixes the number of coefficient sets.
    ///
    /// Return
    /// ----------
    /// * The records in time order, [`ConjunctionError::InvalidSpkDataType`] for
    ///   non-Chebyshev segments, or [`ConjunctionError::InvalidSpkFile`] when the records
    ///   and the directory do not fit in the word range.
    pub fn parse<R: Read + Seek>(
        file: &mut R,
        first_word: usize,
        last_word: usize,
        rsize: usize,
        n_records: usize,
        data_type: SpkDataType,
    ) -> Result<Vec<Self>, ConjunctionError> {
        let sets = data_type
            .coefficient_sets()
            .ok_or(ConjunctionError::InvalidSpkDataType(data_type as i32))?;
        let ncoeff = rsize.saturating_sub(2) / sets;
        if ncoeff == 0 || 2 + ncoeff * sets != rsize {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "record size {rsize} does not match a {data_type} segment"
            )));
        }

        if first_word == 0 || last_word < first_word {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "invalid segment word range {first_word} .. {last_word}"
            )));
        }
        let available = last_word - first_word + 1;
        let needed = n_records
            .checked_mul(rsize)
            .and_then(|words| words.checked_add(4));
        if !matches!(needed, Some(words) if words <= available) {
            return Err(ConjunctionError::InvalidSpkFile(format!(
                "{n_records} records of {rsize} words do not fit in a segment of {available} words"
            )));
        }

        let record_bytes = rsize * 8;
        let mut buf = vec![0u8; record_bytes];
        file.seek(SeekFrom::Start(((first_word - 1) * 8) as u64))?;

        let mut records = Vec::with_capacity(n_records);
        for _ in 0..n_records {
            file.read_exact(&mut buf)?;
            let (_, record) = Self::parse_record(&buf, ncoeff).map_err(|e| {
                ConjunctionError::InvalidSpkFile(format!("corrupted Chebyshev record: {e}"))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Evaluate position (km) and velocity (km/s) at `ephem_time` (ET seconds).
    ///
    /// The normalized time `(et - mid) / radius` is clamped to `[-1, 1]`.
    pub fn interpolate(&self, ephem_time: f64) -> (Vector3<Kilometer>, Vector3<f64>) {
        let t = ((ephem_time - self.mid) / self.radius).clamp(-1.0, 1.0);
        let n = self.x.len();

        // T_0 = 1, T_1 = t, T_k = 2t T_{k-1} - T_{k-2}
        let mut poly = vec![0.0; n];
        poly[0] = 1.0;
        if n > 1 {
            poly[1] = t;
        }
        for k in 2..n {
            poly[k] = 2.0 * t * poly[k - 1] - poly[k - 2];
        }

        // T'_0 = 0, T'_1 = 1, T'_k = 2t T'_{k-1} + 2 T_{k-1} - T'_{k-2}
        let mut deriv = vec![0.0; n];
        if n > 1 {
            deriv[1] = 1.0;
        }
        for k in 2..n {
            deriv[k] = 2.0 * t * deriv[k - 1] + 2.0 * poly[k - 1] - deriv[k - 2];
        }

        let series = |coeffs: &[f64], basis: &[f64]| -> f64 {
            coeffs.iter().zip(basis).map(|(c, b)| c * b).sum()
        };

        let position = Vector3::new(
            series(&self.x, &poly),
            series(&self.y, &poly),
            series(&self.z, &poly),
        );
        let velocity = Vector3::new(
            series(&self.x, &deriv),
            series(&self.y, &deriv),
            series(&self.z, &deriv),
        ) / self.radius;

        (position, velocity)
    }
}

#[cfg(test)]
mod test_ephemeris_record {
    use std::io::Cursor;

    use approx::assert_relative_eq;

    use super::*;

    fn linear_record() -> EphemerisRecord {
        // x = 100 + 50 t, y = 5 + 5 T_2 = 10 t^2, z = -3
        EphemerisRecord {
            mid: 1000.0,
            radius: 500.0,
            x: vec![100.0, 50.0, 0.0],
            y: vec![5.0, 0.0, 5.0],
            z: vec![-3.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_interpolate_at_mid_and_edges() {
        let record = linear_record();

        let (pos, vel) = record.interpolate(1000.0);
        assert_relative_eq!(pos, Vector3::new(100.0, 0.0, -3.0), epsilon = 1e-12);
        // dx/dt = 50 / radius, dy/dt = 5 * 4t / radius = 0 at t = 0
        assert_relative_eq!(vel, Vector3::new(0.1, 0.0, 0.0), epsilon = 1e-12);

        let (pos, vel) = record.interpolate(1500.0);
        assert_relative_eq!(pos, Vector3::new(150.0, 10.0, -3.0), epsilon = 1e-12);
        assert_relative_eq!(vel, Vector3::new(0.1, 0.04, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_clamps_outside_interval() {
        let record = linear_record();
        let (inside, _) = record.interpolate(500.0);
        let (outside, _) = record.interpolate(-10_000.0);
        assert_eq!(inside, outside);
    }

    #[test]
    fn test_parse_type3_skips_velocity_sets() {
        let mut words = vec![0.0; 4];
        // record: mid, radius, then 6 sets of 2 coefficients
        words.extend([10.0, 5.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0]);
        let bytes: Vec<u8> = words.iter().flat_map(|w: &f64| w.to_le_bytes()).collect();

        let mut cursor = Cursor::new(bytes);
        let records = EphemerisRecord::parse(
            &mut cursor,
            5,
            22,
            14,
            1,
            SpkDataType::ChebyshevPositionVelocity,
        )
        .unwrap();

        assert_eq!(
            records,
            vec![EphemerisRecord {
                mid: 10.0,
                radius: 5.0,
                x: vec![1.0, 2.0],
                y: vec![3.0, 4.0],
                z: vec![5.0, 6.0],
            }]
        );
    }

    #[test]
    fn test_parse_rejects_unsupported_type() {
        let mut cursor = Cursor::new(vec![0u8; 64]);
        let result =
            EphemerisRecord::parse(&mut cursor, 1, 8, 8, 1, SpkDataType::TwoBodyDiscreteStates);
        assert_eq!(result, Err(ConjunctionError::InvalidSpkDataType(5)));
    }

    #[test]
    fn test_parse_rejects_bad_word_range() {
        let mut cursor = Cursor::new(vec![0u8; 256]);
        let chebyshev = SpkDataType::ChebyshevPositionOnly;

        // address 0 does not exist in a DAF
        assert!(matches!(
            EphemerisRecord::parse(&mut cursor, 0, 32, 5, 1, chebyshev),
            Err(ConjunctionError::InvalidSpkFile(_))
        ));
        assert!(matches!(
            EphemerisRecord::parse(&mut cursor, 10, 9, 5, 1, chebyshev),
            Err(ConjunctionError::InvalidSpkFile(_))
        ));
        // garbage record count from a corrupted directory
        assert!(matches!(
            EphemerisRecord::parse(&mut cursor, 1, 32, 5, usize::MAX / 2, chebyshev),
            Err(ConjunctionError::InvalidSpkFile(_))
        ));
        // 2 records of 5 words + footer need 14 words
        assert!(matches!(
            EphemerisRecord::parse(&mut cursor, 1, 13, 5, 2, chebyshev),
            Err(ConjunctionError::InvalidSpkFile(_))
        ));
        assert_eq!(
            EphemerisRecord::parse(&mut cursor, 1, 14, 5, 2, chebyshev)
                .unwrap()
                .len(),
            2
        );
    }
}
