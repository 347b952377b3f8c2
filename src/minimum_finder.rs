//! # Local-minimum search
//!
//! Finds every local minimum of a [`SeparationFn`] over a time interval with a coarse scan
//! followed by a golden-section refinement of each bracket.
//!
//! ## Algorithm
//!
//! 1. The interval `[t_start, t_end]` is cut into `n = ⌈span / step⌉` equal intervals, so
//!    that consecutive samples are never more than `step` days apart. The signal is
//!    evaluated at the `n + 1` nodes.
//! 2. Each interior node `i` with `y[i-1] > y[i] ≤ y[i+1]` brackets a minimum in
//!    `[t[i-1], t[i+1]]`. The strict inequality on the left means a flat bottom opens
//!    a single bracket.
//! 3. Each bracket is narrowed by golden-section search until it is shorter than
//!    [`MINIMUM_TOLERANCE_DAYS`], and the signal is evaluated at the bracket midpoint.
//!
//! Minima are returned in time order, unrounded, without merging minima that fall close
//! together. A signal varying faster than the step can hide minima from the scan, which is
//! why the step is a parameter.
use tracing::{debug, info, trace};

use crate::{
    conjunction_errors::ConjunctionError,
    constants::{Degree, MINIMUM_MAX_ITERATIONS, MINIMUM_TOLERANCE_DAYS, TABLE_DECIMALS},
    coverage::EphemerisCoverage,
    pair_catalog::PairCatalog,
    progress::PairProgress,
    separation::SeparationFn,
    tables::{round_to, DatedTable},
    time::TimePoint,
};

/// Inverse golden ratio, `(√5 − 1) / 2`.
const INV_PHI: f64 = 0.618_033_988_749_894_8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    pub time: TimePoint,
    pub degrees: Degree,
}

/// Golden-section search of a unimodal bracket `[a, b]` (offsets in days from `origin`).
fn golden_section<F: SeparationFn + ?Sized>(
    f: &F,
    origin: &TimePoint,
    mut a: f64,
    mut b: f64,
) -> Result<Minimum, ConjunctionError> {
    let eval = |x: f64| f.separation_at(&origin.add_days(x));

    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = eval(c)?;
    let mut fd = eval(d)?;

    for _ in 0..MINIMUM_MAX_ITERATIONS {
        if (b - a).abs() < MINIMUM_TOLERANCE_DAYS {
            break;
        }
        if fc <= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = eval(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = eval(d)?;
        }
    }

    let x = 0.5 * (a + b);
    let time = origin.add_days(x);
    Ok(Minimum {
        time,
        degrees: f.separation_at(&time)?,
    })
}

/// Every local minimum of `f` inside `[t_start, t_end]`.
///
/// Arguments
/// -----------------
/// * `f`: the signal to search.
/// * `t_start`, `t_end`: search interval.
/// * `step_days`: maximum spacing of the coarse scan, in days.
///
/// Return
/// ----------
/// * The minima in time order; empty when the interval is shorter than one step or holds
///   no interior minimum.
/// * [`ConjunctionError::InvalidStepSize`] for a non-positive or non-finite step, or the
///   first evaluation error of `f`.
pub fn find_minima<F: SeparationFn + ?Sized>(
    f: &F,
    t_start: &TimePoint,
    t_end: &TimePoint,
    step_days: f64,
) -> Result<Vec<Minimum>, ConjunctionError> {
    if !step_days.is_finite() || step_days <= 0.0 {
        return Err(ConjunctionError::InvalidStepSize(step_days));
    }

    let span = t_end.days_since(t_start);
    if span < step_days {
        return Ok(Vec::new());
    }

    let n = (span / step_days).ceil() as usize;
    let h = span / n as f64;
    let offsets: Vec<f64> = (0..=n).map(|i| i as f64 * h).collect();
    let times: Vec<TimePoint> = offsets.iter().map(|x| t_start.add_days(*x)).collect();
    let values = f.separations(&times)?;

    let mut minima = Vec::new();
    for i in 1..n {
        if values[i - 1] > values[i] && values[i] <= values[i + 1] {
            let minimum = golden_section(f, t_start, offsets[i - 1], offsets[i + 1])?;
            if minimum.time >= *t_start && minimum.time <= *t_end {
                trace!(time = %minimum.time, degrees = minimum.degrees, "local minimum");
                minima.push(minimum);
            }
        }
    }
    Ok(minima)
}

/// Sparse table of the minima of every `(label, function)` over `[t_start, t_end]`.
///
/// Each minimum is stored under its UTC date, rounded to [`TABLE_DECIMALS`] decimals. When
/// two minima of the same pair fall on the same date, the later one is kept.
pub fn tabulate_minima<F: SeparationFn>(
    functions: &[(String, F)],
    t_start: &TimePoint,
    t_end: &TimePoint,
    step_days: f64,
) -> Result<DatedTable, ConjunctionError> {
    let columns = functions.iter().map(|(label, _)| label.clone()).collect();
    let mut table = DatedTable::new(columns);

    let mut progress = PairProgress::new(functions.len(), "minima");
    for (label, f) in functions {
        progress.start(label);
        let minima = find_minima(f, t_start, t_end, step_days)?;
        for minimum in &minima {
            let date = minimum.time.to_date_string();
            if table.get(&date, label).is_some() {
                debug!(pair = %label, date = %date, "two minima on one date, keeping the later");
            }
            table.set(&date, label, round_to(minimum.degrees, TABLE_DECIMALS))?;
        }
        let elapsed = progress.finish_one();
        debug!(pair = %label, count = minima.len(), ?elapsed, "minima found");
    }
    progress.finish();
    Ok(table)
}

/// Minima table of the 15 pairs of `catalog` over the whole coverage.
pub fn minima_table(
    catalog: &PairCatalog,
    coverage: &EphemerisCoverage,
    step_days: f64,
) -> Result<DatedTable, ConjunctionError> {
    info!(
        start = %coverage.start.to_date_string(),
        end = %coverage.end.to_date_string(),
        step_days,
        "searching separation minima"
    );
    let functions: Vec<_> = catalog
        .pairs()
        .into_iter()
        .map(|pair| (pair.label(), catalog.function_for(pair)))
        .collect();
    tabulate_minima(&functions, &coverage.start, &coverage.end, step_days)
}

#[cfg(test)]
mod test_minimum_finder {
    use approx::assert_abs_diff_eq;

    use super::*;

    /// `depth + (t − t0)²` degrees, `t` in days.
    struct Parabola {
        t0: TimePoint,
        depth: f64,
    }

    impl SeparationFn for Parabola {
        fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError> {
            let dt = t.days_since(&self.t0);
            Ok(self.depth + dt * dt)
        }
    }

    /// Smooth signal with a minimum every `period` days.
    struct Wave {
        origin: TimePoint,
        period: f64,
    }

    impl SeparationFn for Wave {
        fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError> {
            let phase = t.days_since(&self.origin) / self.period * std::f64::consts::TAU;
            Ok(90.0 + 45.0 * phase.cos())
        }
    }

    struct Ramp(TimePoint);

    impl SeparationFn for Ramp {
        fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError> {
            Ok(t.days_since(&self.0))
        }
    }

    /// Fails past `cutoff`, like a kernel running out of coverage.
    struct Truncated {
        cutoff: TimePoint,
    }

    impl SeparationFn for Truncated {
        fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError> {
            if *t > self.cutoff {
                return Err(ConjunctionError::BodyNotFound(499));
            }
            Ok(10.0)
        }
    }

    fn jan_first() -> TimePoint {
        TimePoint::from_utc_date(2022, 1, 1).unwrap()
    }

    #[test]
    fn test_single_parabola_minimum() {
        let start = jan_first();
        let end = start.add_days(30.0);
        let truth = start.add_days(12.37);
        let f = Parabola {
            t0: truth,
            depth: 0.5,
        };

        let minima = find_minima(&f, &start, &end, 1.0).unwrap();
        assert_eq!(minima.len(), 1);
        assert_abs_diff_eq!(minima[0].time.days_since(&truth), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(minima[0].degrees, 0.5, epsilon = 1e-6);
        assert_eq!(minima[0].time.to_date_string(), "2022-01-13");
    }

    #[test]
    fn test_monotonic_signal_has_no_minimum() {
        let start = jan_first();
        let f = Ramp(start);
        assert!(find_minima(&f, &start, &start.add_days(100.0), 1.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_minimum_at_boundary_is_not_interior() {
        let start = jan_first();
        let f = Parabola {
            t0: start,
            depth: 0.0,
        };
        assert!(find_minima(&f, &start, &start.add_days(10.0), 1.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_interval_shorter_than_step() {
        let start = jan_first();
        let f = Parabola {
            t0: start.add_days(0.25),
            depth: 1.0,
        };
        let minima = find_minima(&f, &start, &start.add_days(0.5), 1.0).unwrap();
        assert!(minima.is_empty());
    }

    #[test]
    fn test_several_minima_in_order() {
        let start = jan_first();
        let f = Wave {
            origin: start.add_days(3.0),
            period: 29.5,
        };
        let minima = find_minima(&f, &start, &start.add_days(365.0), 1.0).unwrap();

        // cos minima at origin + 14.75 + k * 29.5
        assert_eq!(minima.len(), 12);
        for (k, m) in minima.iter().enumerate() {
            let expected = 3.0 + 14.75 + k as f64 * 29.5;
            assert_abs_diff_eq!(m.time.days_since(&start), expected, epsilon = 1e-3);
            assert_abs_diff_eq!(m.degrees, 45.0, epsilon = 1e-8);
        }
        assert!(minima.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_invalid_step() {
        let start = jan_first();
        let f = Ramp(start);
        for step in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                find_minima(&f, &start, &start.add_days(10.0), step),
                Err(ConjunctionError::InvalidStepSize(_))
            ));
        }
    }

    #[test]
    fn test_dyn_separation_fn() {
        let start = jan_first();
        let f: Box<dyn SeparationFn> = Box::new(Parabola {
            t0: start.add_days(5.5),
            depth: 2.0,
        });
        let minima = find_minima(f.as_ref(), &start, &start.add_days(10.0), 1.0).unwrap();
        assert_eq!(minima.len(), 1);
    }

    #[test]
    fn test_tabulate_minima_is_sparse() {
        let start = jan_first();
        let functions = vec![
            (
                "a-b".to_string(),
                Box::new(Parabola {
                    t0: start.add_days(10.2),
                    depth: 1.234,
                }) as Box<dyn SeparationFn>,
            ),
            (
                "a-c".to_string(),
                Box::new(Ramp(start)) as Box<dyn SeparationFn>,
            ),
        ];
        let table = tabulate_minima(&functions, &start, &start.add_days(30.0), 1.0).unwrap();
        assert_eq!(
            table.columns(),
            ["a-b".to_string(), "a-c".to_string()].as_slice()
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("2022-01-11", "a-b"), Some(1.23));
        assert_eq!(table.get("2022-01-11", "a-c"), None);
    }

    #[test]
    fn test_same_date_minima_last_write_wins() {
        // two minima 0.4 day apart, both on 2022-01-05
        struct TwoDips(TimePoint);
        impl SeparationFn for TwoDips {
            fn separation_at(&self, t: &TimePoint) -> Result<Degree, ConjunctionError> {
                let x = t.days_since(&self.0);
                let first = 5.0 + 400.0 * (x - 4.2).powi(2);
                let second = 3.0 + 400.0 * (x - 4.6).powi(2);
                Ok(first.min(second))
            }
        }

        let start = jan_first();
        let f = TwoDips(start);
        let minima = find_minima(&f, &start, &start.add_days(10.0), 0.1).unwrap();
        assert_eq!(minima.len(), 2);

        let functions = vec![("a-b".to_string(), f)];
        let table = tabulate_minima(&functions, &start, &start.add_days(10.0), 0.1).unwrap();
        assert_eq!(table.get("2022-01-05", "a-b"), Some(3.0));
    }

    fn failing_pairs(start: &TimePoint) -> Vec<(String, Box<dyn SeparationFn>)> {
        vec![
            (
                "a-b".to_string(),
                Box::new(Parabola {
                    t0: start.add_days(10.2),
                    depth: 1.0,
                }) as Box<dyn SeparationFn>,
            ),
            (
                "a-c".to_string(),
                Box::new(Truncated {
                    cutoff: start.add_days(20.0),
                }) as Box<dyn SeparationFn>,
            ),
        ]
    }

    #[test]
    fn test_tabulate_minima_aborts_on_failure() {
        let start = jan_first();
        let functions = failing_pairs(&start);
        assert_eq!(
            tabulate_minima(&functions, &start, &start.add_days(30.0), 1.0),
            Err(ConjunctionError::BodyNotFound(499))
        );
    }

    #[test]
    fn test_failed_minima_search_leaves_no_cache_file() {
        use camino::Utf8Path;

        use crate::cache::{get_or_compute, minima_table_path};

        let tmp = tempfile::tempdir().unwrap();
        let path = minima_table_path(Utf8Path::from_path(tmp.path()).unwrap(), 2022, 2022);
        let start = jan_first();
        let functions = failing_pairs(&start);

        let result = get_or_compute(&path, || {
            tabulate_minima(&functions, &start, &start.add_days(30.0), 1.0)
        });
        assert_eq!(result, Err(ConjunctionError::BodyNotFound(499)));
        assert!(!path.exists());
    }
}
