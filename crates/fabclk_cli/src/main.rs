//! fabclk CLI: command-line front end for the clock-select bitstream setting generator.
//!
//! Provides `fabclk generate` to write the bitstream setting file and
//! `fabclk locate` to inspect where each assigned clock lands on the device.

#![warn(missing_docs)]

mod generate;
mod locate;
mod options;

use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Exit code returned when the device size is malformed and nothing was generated.
pub const EXIT_SKIPPED: i32 = 2;

/// fabclk: clock-select bitstream overrides for fabric and SoC clocks.
#[derive(Parser, Debug)]
#[command(name = "fabclk", version, about = "Clock-select bitstream setting generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a `fabclk.toml` options file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the bitstream setting file.
    Generate(GenerateArgs),
    /// Print the location and edge of every assigned clock.
    Locate(LocateArgs),
}

/// Input files and device shared by every command.
#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Device grid size as `<W>x<H>` (e.g. `44x40`).
    #[arg(long)]
    pub device_size: Option<String>,

    /// Clock-assignment file (`set_core_clk` / `set_soc_clk` directives).
    #[arg(long)]
    pub design: Option<String>,

    /// Vendor pin-table CSV file.
    #[arg(long)]
    pub pin: Option<String>,

    /// Reject pin-table rows whose coordinates are not numbers.
    #[arg(long)]
    pub strict_coordinates: bool,
}

/// Arguments for the `fabclk generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Input files and device.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Existing bitstream setting file to splice the overrides into.
    #[arg(long)]
    pub template: Option<String>,

    /// Output path for the generated setting file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write a fixed placeholder instead of the template path.
    #[arg(long)]
    pub unittest: bool,
}

/// Arguments for the `fabclk locate` subcommand.
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Input files and device.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output format for the location report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
    /// Optional path to an options file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Locate(ref args) => locate::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Returns the default log filter for the given flags.
fn log_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        return "error";
    }
    match global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(global)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
