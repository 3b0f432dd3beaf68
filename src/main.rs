mod commands;

use crate::commands::{check, draw, DrawArgs, InputArgs};
use clap::{Args, Parser, Subcommand};
use colored::*;
use fair_draw::config::Overrides;
use std::path::PathBuf;
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "fair-draw", version, about)]
struct Opts {
    /// Log more detail to stderr (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: u64,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw winners and write them to a CSV file.
    Draw {
        #[clap(flatten)]
        inputs: InputOpts,
        /// Seed for the shuffle, to reproduce a draw exactly
        #[clap(long)]
        seed: Option<u64>,
        /// Winners CSV path [default: winners_YYYYMMDD.csv]
        #[clap(short, long)]
        output: Option<PathBuf>,
        /// Write a JSON audit report of the draw to this path
        #[clap(long)]
        report: Option<PathBuf>,
        /// Print how long each stage took
        #[clap(long)]
        timings: bool,
    },
    /// Validate the inputs and describe the draw pools without drawing.
    Check {
        #[clap(flatten)]
        inputs: InputOpts,
    },
}

#[derive(Args)]
struct InputOpts {
    /// Registration table for this round (.csv, .xlsx, .xls or .ods)
    registrations: PathBuf,
    /// Winners of the previous round
    previous_winners: PathBuf,
    /// Number of winners, per group when --group-column is set
    #[clap(short, long)]
    quota: Option<usize>,
    /// Column holding registrant names in both tables [default: name]
    #[clap(long)]
    name_column: Option<String>,
    /// Draw separately for each value of this registration column
    #[clap(long)]
    group_column: Option<String>,
    /// A name that must win; repeat for several
    #[clap(long = "pin", value_name = "NAME")]
    pin: Vec<String>,
    /// File of names that must win, one per line
    #[clap(long)]
    pinned_file: Option<PathBuf>,
    /// JSON file with draw settings; flags given here take precedence
    #[clap(long)]
    config: Option<PathBuf>,
}

impl InputOpts {
    fn into_args(self, seed: Option<u64>) -> InputArgs {
        InputArgs {
            registrations: self.registrations,
            previous_winners: self.previous_winners,
            config: self.config,
            pinned_file: self.pinned_file,
            overrides: Overrides {
                name_column: self.name_column,
                group_column: self.group_column,
                quota: self.quota,
                pinned: self.pin,
                seed,
            },
        }
    }
}

/// Initialize tracing. Verbosity picks the default level; RUST_LOG overrides it.
fn init_logging(verbose: u64) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("fair-draw started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn main() {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    let (action, outcome) = match opts.command {
        Command::Draw {
            inputs,
            seed,
            output,
            report,
            timings,
        } => (
            "Draw",
            draw(&DrawArgs {
                inputs: inputs.into_args(seed),
                output,
                report,
                timings,
            }),
        ),
        Command::Check { inputs } => ("Check", check(&inputs.into_args(None))),
    };

    if let Err(e) = outcome {
        eprintln!("{}", format!("❌ {} failed: {}", action, e).bright_red());
        std::process::exit(1);
    }
}
