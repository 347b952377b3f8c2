use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use conjunctions::{
    conjunction_errors::ConjunctionError, minimum_finder::find_minima,
    separation::SeparationFn, time::TimePoint,
};

/// Two beating sinusoids, close to the shape of a Moon-planet separation.
struct Beat {
    t0: TimePoint,
    phase: f64,
}

impl SeparationFn for Beat {
    fn separation_at(&self, t: &TimePoint) -> Result<f64, ConjunctionError> {
        let d = t.days_since(&self.t0);
        let fast = (std::f64::consts::TAU * d / 29.53 + self.phase).cos();
        let slow = (std::f64::consts::TAU * d / 398.9).cos();
        Ok(90.0 + 80.0 * fast + 5.0 * slow)
    }
}

fn bench_find_minima(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let t0 = TimePoint::from_utc_date(2000, 1, 1).unwrap();
    let t1 = t0.add_days(3652.5);
    let signals: Vec<Beat> = (0..15)
        .map(|_| Beat {
            t0,
            phase: rng.random::<f64>() * std::f64::consts::TAU,
        })
        .collect();

    c.bench_function("find_minima/15_pairs_10_years", |b| {
        b.iter(|| {
            for f in &signals {
                black_box(find_minima(f, &t0, &t1, black_box(1.0)).unwrap());
            }
        })
    });

    c.bench_function("find_minima/coarse_step_5d", |b| {
        b.iter(|| black_box(find_minima(&signals[0], &t0, &t1, black_box(5.0)).unwrap()))
    });
}

criterion_group!(benches, bench_find_minima);
criterion_main!(benches);
