//! Cache hierarchy simulator CLI.
//!
//! This binary replays a memory trace through the two-level cache model. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then per-flag overrides.
//! 2. **Simulation:** Streams `<r|w> <hex address>` lines from a file or stdin.
//! 3. **Reporting:** Prints the settings and statistics blocks, or one JSON document.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::{ConfigError, TraceError};
use cachesim_core::config::HierarchyConfig;
use cachesim_core::sim::TraceReader;
use cachesim_core::{CacheStats, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Two-level cache hierarchy simulator with stride prefetching",
    long_about = "Replay a memory trace through an L1/L2 write-back LRU cache hierarchy.\n\nSizes are powers of two: a level holds 2^C bytes in 2^B-byte blocks, 2^S blocks per set.\n\nExamples:\n  cachesim -i traces/gcc.trace\n  cachesim -c 10 -b 6 -s 2 -k 0 < traces/astar.trace\n  cachesim --config l2-heavy.json --json -i traces/mcf.trace"
)]
struct Cli {
    /// Total size of L1 in bytes is 2^C1.
    #[arg(short = 'c', long = "c1")]
    c1: Option<u32>,

    /// Size of each block in L1 in bytes is 2^B1.
    #[arg(short = 'b', long = "b1")]
    b1: Option<u32>,

    /// Number of blocks per set in L1 is 2^S1.
    #[arg(short = 's', long = "s1")]
    s1: Option<u32>,

    /// Total size of L2 in bytes is 2^C2.
    #[arg(short = 'C', long = "c2")]
    c2: Option<u32>,

    /// Size of each block in L2 in bytes is 2^B2.
    #[arg(short = 'B', long = "b2")]
    b2: Option<u32>,

    /// Number of blocks per set in L2 is 2^S2.
    #[arg(short = 'S', long = "s2")]
    s2: Option<u32>,

    /// Number of blocks prefetched into L2 once a stride is confirmed (0-4).
    #[arg(short = 'k', long = "prefetch-degree")]
    k: Option<u32>,

    /// Trace file to replay (defaults to stdin).
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// JSON configuration file applied before the individual flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the configuration and statistics as one JSON document.
    #[arg(long)]
    json: bool,

    /// Log filter used when `RUST_LOG` is not set (e.g. `debug`, `cachesim_core=trace`).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Layers defaults, the optional config file, and flag overrides.
    ///
    /// The result is not validated; [`Simulator::new`] does that.
    fn hierarchy_config(&self) -> Result<HierarchyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => HierarchyConfig::from_json_file(path)?,
            None => HierarchyConfig::default(),
        };

        let overrides = [
            (self.c1, &mut config.l1.c),
            (self.b1, &mut config.l1.b),
            (self.s1, &mut config.l1.s),
            (self.c2, &mut config.l2.c),
            (self.b2, &mut config.l2.b),
            (self.s2, &mut config.l2.s),
            (self.k, &mut config.prefetch_degree),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value;
            }
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = match cli.hierarchy_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = match Simulator::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: invalid cache configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error: cannot open {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let mut stats = CacheStats::default();
    let mut reader = TraceReader::new(input);
    for event in reader.by_ref() {
        match event {
            Ok(event) => sim.access(event.kind, event.addr, &mut stats),
            Err(TraceError::Io(e)) => {
                eprintln!("Error: failed to read trace: {e}");
                return ExitCode::FAILURE;
            }
            Err(e) => warn!("skipping malformed trace line: {e}"),
        }
    }
    sim.finalize(&mut stats);
    info!(lines = reader.line_no(), accesses = stats.l1_accesses, "trace complete");

    if cli.json {
        let report = serde_json::json!({ "config": config, "stats": stats });
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{config}");
        stats.print();
    }
    ExitCode::SUCCESS
}

/// Installs the stderr log subscriber; `RUST_LOG` wins over `--log-level`.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
