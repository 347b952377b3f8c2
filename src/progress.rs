//! Progress reporting over the pair loop.
//!
//! With the `progress` feature, [`PairProgress`] drives an `indicatif` bar showing the pair
//! being processed and the time spent on the previous one. Without it, every method is a
//! no-op and the loop only logs through `tracing`.
use std::time::{Duration, Instant};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Human-readable duration: `253µs`, `42ms` or `3.14s`.
pub fn fmt_dur(d: Duration) -> String {
    let us = d.as_micros();
    if us < 1_000 {
        format!("{us}µs")
    } else if d.as_millis() < 1_000 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.2}s", d.as_secs_f32())
    }
}

pub struct PairProgress {
    #[cfg(feature = "progress")]
    pb: ProgressBar,
    last: Instant,
    previous: Option<Duration>,
}

impl PairProgress {
    pub fn new(total: usize, _title: &str) -> Self {
        #[cfg(feature = "progress")]
        let pb = {
            let pb = ProgressBar::new(total.max(1) as u64);
            if let Ok(style) = ProgressStyle::with_template(
                "{prefix} {bar:30.cyan/blue} {pos}/{len} | ETA {eta_precise} | {msg}",
            ) {
                pb.set_style(style);
            }
            pb.set_prefix(_title.to_string());
            pb.enable_steady_tick(Duration::from_millis(200));
            pb
        };
        #[cfg(not(feature = "progress"))]
        let _ = total;

        PairProgress {
            #[cfg(feature = "progress")]
            pb,
            last: Instant::now(),
            previous: None,
        }
    }

    /// Announce the pair about to be processed.
    pub fn start(&mut self, _label: &str) {
        self.last = Instant::now();
        #[cfg(feature = "progress")]
        match self.previous {
            Some(d) => self.pb.set_message(format!("{_label} (last: {})", fmt_dur(d))),
            None => self.pb.set_message(_label.to_string()),
        }
    }

    /// Mark the current pair as done and return the time it took.
    pub fn finish_one(&mut self) -> Duration {
        let elapsed = self.last.elapsed();
        self.previous = Some(elapsed);
        #[cfg(feature = "progress")]
        self.pb.inc(1);
        elapsed
    }

    pub fn finish(self) {
        #[cfg(feature = "progress")]
        {
            self.pb.disable_steady_tick();
            self.pb.finish_and_clear();
        }
    }
}
