use std::{io, process::ExitCode};

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conjunctions::{
    config::ConjunctionConfig,
    conjunction_errors::ConjunctionError,
    conjunctions::Conjunctions,
    constants::{DEFAULT_EPHEMERIS_FILE, DEFAULT_STEP_DAYS, DEFAULT_WINDOW_DAYS, DEFAULT_YEAR},
    time::TimePoint,
};

#[derive(Parser)]
#[command(
    name = "conjunctions",
    about = "Angular separations and conjunctions of Mercury, Venus, the Moon, Mars, Jupiter and Saturn"
)]
struct Cli {
    /// Directory holding the SPK kernel (default: /var/data, then ~/.data)
    #[arg(long)]
    data_dir: Option<Utf8PathBuf>,

    /// Kernel file name inside the data directory
    #[arg(long, default_value = DEFAULT_EPHEMERIS_FILE)]
    ephemeris: String,

    /// Year of the daily table
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    year: i32,

    /// Directory of the CSV cache files
    #[arg(long, default_value = ".")]
    cache_dir: Utf8PathBuf,

    /// Coarse step of the minimum search, in days
    #[arg(long, default_value_t = DEFAULT_STEP_DAYS)]
    step: f64,

    /// Length of the printed window, in days after its start
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    days: i64,

    /// First date of the printed window (YYYY-MM-DD, default: today)
    #[arg(long)]
    start: Option<TimePoint>,

    /// Last date of the printed window (YYYY-MM-DD, default: start + days)
    #[arg(long)]
    end: Option<TimePoint>,

    /// Describe the kernel and its usable coverage, then exit
    #[arg(long)]
    info: bool,

    /// Only report conjunctions at most this many degrees apart
    #[arg(long)]
    min_sep: Option<f64>,

    /// Write every conjunction of the coverage as CSV on stdout, then exit
    #[arg(long)]
    events: bool,
}

fn run(cli: Cli) -> Result<(), ConjunctionError> {
    let mut config = ConjunctionConfig::default()
        .with_ephemeris_file(cli.ephemeris)
        .with_year(cli.year)
        .with_cache_dir(cli.cache_dir)
        .with_step_days(cli.step)
        .with_window_days(cli.days);
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    let session = Conjunctions::new(config);

    if cli.info {
        let coverage = session.coverage()?;
        println!("{}", session.ephemeris()?.info());
        println!(
            "Usable coverage: {} .. {}",
            coverage.start.to_date_string(),
            coverage.end.to_date_string()
        );
        return Ok(());
    }

    if cli.events {
        let mut wtr = csv::Writer::from_writer(io::stdout().lock());
        for event in session.events(cli.min_sep)? {
            wtr.serialize(event)?;
        }
        wtr.flush()?;
        return Ok(());
    }

    let (_, minima) = session.calculate()?;

    let start = match cli.start {
        Some(start) => start,
        None => TimePoint::today_utc()?,
    };
    let end = cli
        .end
        .unwrap_or_else(|| start.add_days(session.config().window_days as f64));
    let (from, to) = (start.to_date_string(), end.to_date_string());
    info!(from = %from, to = %to, "printing window");

    let daily = match (cli.start, cli.end) {
        (None, None) => session.upcoming()?,
        _ => session.window(&start, &end)?,
    };
    println!("{daily}");

    let limit = cli.min_sep.unwrap_or(f64::INFINITY);
    let upcoming: Vec<_> = minima
        .window(&from, &to)
        .events()
        .into_iter()
        .filter(|e| e.degrees <= limit)
        .collect();
    if upcoming.is_empty() {
        println!("No conjunction between {from} and {to}");
    }
    for event in upcoming {
        println!("{}  {:<16} {:>6.2}°", event.date, event.pair, event.degrees);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("conjunctions: {e}");
            ExitCode::FAILURE
        }
    }
}
