use clap::Parser;
use std::path::PathBuf;
use tickforge_application::config::GenerateOverrides;
use tickforge_gen::obs::{self, LogFormat};
use tickforge_gen::GenOpts;

#[derive(Parser, Debug)]
#[command(name = "tickforge-gen")]
#[command(about = "Write a CSV of synthetic price/volume ticks.", version)]
struct Cli {
    /// Destination CSV path (default: ticks.csv).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of symbols to simulate (default: 100).
    #[arg(long)]
    symbols: Option<usize>,

    /// Number of simulated days (default: 7).
    #[arg(long)]
    days: Option<u32>,

    /// Ticks per day per symbol (default: 24).
    #[arg(long)]
    rate: Option<u32>,

    /// Seed for the random source. Omit for a different file on every run.
    #[arg(long)]
    seed: Option<u64>,

    /// Config file path (TOML). If omitted, uses env TICKFORGE_CONFIG.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the written file back and check row count, symbols and ordering.
    #[arg(long)]
    verify: bool,

    /// Log output format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Prometheus metrics listen addr (e.g. 127.0.0.1:9898). Optional.
    #[arg(long)]
    metrics_addr: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = obs::init_tracing(cli.log_format) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    if let Err(err) = obs::init_metrics(cli.metrics_addr.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let config_path = cli.config.or_else(|| {
        std::env::var("TICKFORGE_CONFIG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });

    let opts = GenOpts {
        config_path,
        overrides: GenerateOverrides {
            out: cli.out,
            symbols: cli.symbols,
            days: cli.days,
            rate: cli.rate,
            seed: cli.seed,
        },
        verify: cli.verify,
    };

    match tickforge_gen::run(opts) {
        Ok(report) => println!("{}", report.summary_line()),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
