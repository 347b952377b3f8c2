#![allow(dead_code)]

use std::f64::consts::{PI, TAU};

use camino::{Utf8Path, Utf8PathBuf};
use conjunctions::{
    constants::{AU, JD_J2000, SECONDS_PER_DAY},
    jpl_ephem::Ephemeris,
};

/// First epoch of every synthetic segment, 2021-06-01 00:00 TDB.
pub const KERNEL_START_JD: f64 = 2_459_366.5;
/// Two-day records.
pub const RECORD_DAYS: f64 = 2.0;
pub const RECORD_COUNT: usize = 685;
pub const KERNEL_END_JD: f64 = KERNEL_START_JD + RECORD_DAYS * RECORD_COUNT as f64;

const RECORD: usize = 1024;
const COEFFS: usize = 8;
const RSIZE: usize = 2 + 3 * COEFFS;

/// Circular orbit around the segment center.
#[derive(Clone, Copy)]
struct Orbit {
    radius_au: f64,
    period_days: f64,
    phase_deg: f64,
    inclination_deg: f64,
}

impl Orbit {
    const AT_CENTER: Orbit = Orbit {
        radius_au: 0.0,
        period_days: 1.0,
        phase_deg: 0.0,
        inclination_deg: 0.0,
    };

    fn planet(radius_au: f64, phase_deg: f64, inclination_deg: f64) -> Orbit {
        Orbit {
            radius_au,
            period_days: 365.25 * radius_au.powf(1.5),
            phase_deg,
            inclination_deg,
        }
    }

    /// Position in km at `jd`.
    fn position(&self, jd: f64) -> [f64; 3] {
        let theta = self.phase_deg.to_radians() + TAU * (jd - JD_J2000) / self.period_days;
        let incl = self.inclination_deg.to_radians();
        let r = self.radius_au * AU;
        [
            r * theta.cos(),
            r * theta.sin() * incl.cos(),
            r * theta.sin() * incl.sin(),
        ]
    }
}

/// `(target, center, orbit)` chained like a DE4xx kernel.
fn segments() -> Vec<(i32, i32, Orbit)> {
    vec![
        (1, 0, Orbit::planet(0.387, 40.0, 7.0)),
        (2, 0, Orbit::planet(0.723, 130.0, 3.4)),
        (3, 0, Orbit::planet(1.0, 100.0, 0.0)),
        (4, 0, Orbit::planet(1.524, 250.0, 1.85)),
        (5, 0, Orbit::planet(5.203, 330.0, 1.3)),
        (6, 0, Orbit::planet(9.537, 310.0, 2.5)),
        (199, 1, Orbit::AT_CENTER),
        (299, 2, Orbit::AT_CENTER),
        (
            301,
            3,
            Orbit {
                radius_au: 0.00257,
                period_days: 27.32,
                phase_deg: 0.0,
                inclination_deg: 5.1,
            },
        ),
        (399, 3, Orbit::AT_CENTER),
        (499, 4, Orbit::AT_CENTER),
    ]
}

fn et_seconds(jd: f64) -> f64 {
    (jd - JD_J2000) * SECONDS_PER_DAY
}

/// Type 2 words of one segment: Chebyshev interpolants of the orbit sampled at the
/// Chebyshev nodes of each record, then the directory footer.
fn segment_words(orbit: &Orbit) -> Vec<f64> {
    let mut words = Vec::with_capacity(RECORD_COUNT * RSIZE + 4);
    let radius = RECORD_DAYS / 2.0;
    let n = COEFFS as f64;
    for k in 0..RECORD_COUNT {
        let mid = KERNEL_START_JD + RECORD_DAYS * (k as f64 + 0.5);
        let samples: Vec<[f64; 3]> = (0..COEFFS)
            .map(|j| {
                let x = (PI * (j as f64 + 0.5) / n).cos();
                orbit.position(mid + x * radius)
            })
            .collect();
        words.push(et_seconds(mid));
        words.push(radius * SECONDS_PER_DAY);
        for axis in 0..3 {
            for c in 0..COEFFS {
                let sum: f64 = samples
                    .iter()
                    .enumerate()
                    .map(|(j, f)| f[axis] * (PI * c as f64 * (j as f64 + 0.5) / n).cos())
                    .sum();
                let scale = if c == 0 { 1.0 / n } else { 2.0 / n };
                words.push(scale * sum);
            }
        }
    }
    words.extend([
        et_seconds(KERNEL_START_JD),
        RECORD_DAYS * SECONDS_PER_DAY,
        RSIZE as f64,
        RECORD_COUNT as f64,
    ]);
    words
}

/// Bytes of a little-endian SPK kernel holding the synthetic solar system.
///
/// Layout: file record, one empty comment record, one summary record, one name record,
/// then the segments back to back.
pub fn synthetic_kernel() -> Vec<u8> {
    kernel_of(segments())
}

/// Synthetic kernel with the segment of `target` left out.
pub fn synthetic_kernel_without(target: i32) -> Vec<u8> {
    kernel_of(
        segments()
            .into_iter()
            .filter(|(t, _, _)| *t != target)
            .collect(),
    )
}

fn kernel_of(segments: Vec<(i32, i32, Orbit)>) -> Vec<u8> {
    let mut bytes = vec![0u8; 4 * RECORD];

    bytes[..8].copy_from_slice(b"DAF/SPK ");
    bytes[8..12].copy_from_slice(&2i32.to_le_bytes());
    bytes[12..16].copy_from_slice(&6i32.to_le_bytes());
    bytes[16..76].fill(b' ');
    bytes[76..80].copy_from_slice(&3i32.to_le_bytes());
    bytes[80..84].copy_from_slice(&3i32.to_le_bytes());
    bytes[88..96].copy_from_slice(b"LTL-IEEE");
    bytes[3 * RECORD..4 * RECORD].fill(b' ');

    let summary_record = 2 * RECORD;
    bytes[summary_record + 16..summary_record + 24]
        .copy_from_slice(&(segments.len() as f64).to_le_bytes());

    for (i, (target, center, orbit)) in segments.iter().enumerate() {
        let first_word = bytes.len() / 8 + 1;
        for w in segment_words(orbit) {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        let last_word = bytes.len() / 8;

        let s = summary_record + 24 + i * 40;
        bytes[s..s + 8].copy_from_slice(&et_seconds(KERNEL_START_JD).to_le_bytes());
        bytes[s + 8..s + 16].copy_from_slice(&et_seconds(KERNEL_END_JD).to_le_bytes());
        let ints = [*target, *center, 1, 2, first_word as i32, last_word as i32];
        for (k, v) in ints.iter().enumerate() {
            bytes[s + 16 + 4 * k..s + 20 + 4 * k].copy_from_slice(&v.to_le_bytes());
        }
    }
    bytes
}

/// Write the synthetic kernel as `<dir>/<filename>` and return its path.
pub fn write_synthetic_kernel(dir: &Utf8Path, filename: &str) -> Utf8PathBuf {
    let path = dir.join(filename);
    std::fs::write(&path, synthetic_kernel()).unwrap();
    path
}

pub fn synthetic_ephemeris() -> Ephemeris {
    let tmp = tempfile::tempdir().unwrap();
    let dir = Utf8Path::from_path(tmp.path()).unwrap();
    Ephemeris::load(&write_synthetic_kernel(dir, "synthetic.bsp")).unwrap()
}

/// Load kernel `bytes` through a temporary file.
pub fn ephemeris_from(bytes: &[u8]) -> Ephemeris {
    let tmp = tempfile::tempdir().unwrap();
    let path = utf8(&tmp).join("partial.bsp");
    std::fs::write(&path, bytes).unwrap();
    Ephemeris::load(&path).unwrap()
}

pub fn utf8(tmp: &tempfile::TempDir) -> &Utf8Path {
    Utf8Path::from_path(tmp.path()).unwrap()
}
