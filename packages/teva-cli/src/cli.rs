use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "teva",
    version,
    about = "Telemetry event analysis command-line tool",
    long_about = "Detect driving-condition events in vehicle telemetry captures (CSV)\n\
                  and compute per-channel summary statistics over each event window."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a single capture file and emit its results bundle
    Run(RunArgs),
    /// Discover, gate, and process a batch of capture files
    Batch(BatchArgs),
    /// Detect events in a capture without computing statistics
    Events(EventsArgs),
    /// Check whether a capture file decodes as a valid recording
    Validate(ValidateArgs),
}

/// Condition flags shared by every command that segments.
#[derive(Args, Clone)]
pub struct ConditionArgs {
    /// Condition channel name
    #[arg(long, default_value = "SPEED")]
    pub channel: String,

    /// Lower bound of the in-range interval (inclusive)
    #[arg(long, default_value_t = 40.0)]
    pub low: f64,

    /// Upper bound of the in-range interval (inclusive)
    #[arg(long, default_value_t = 60.0)]
    pub high: f64,
}

#[derive(Args)]
pub struct RunArgs {
    /// Input capture file path (csv, txt, ext)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub condition: ConditionArgs,

    /// Channels to compute statistics for (default: all channels)
    #[arg(long, num_args = 1..)]
    pub channels: Option<Vec<String>>,

    /// Write the bundle JSON to this file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the standard `<file_name>.result` artifact into this directory
    /// instead of printing
    #[arg(long, conflicts_with = "output")]
    pub output_dir: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Root directories to search recursively for capture files
    #[arg(long, num_args = 1..)]
    pub roots: Option<Vec<String>>,

    /// Explicit list of capture files
    #[arg(long, num_args = 1.., conflicts_with = "roots")]
    pub files: Option<Vec<String>>,

    /// Glob pattern for capture files
    #[arg(long, conflicts_with_all = ["roots", "files"])]
    pub glob: Option<String>,

    #[command(flatten)]
    pub condition: ConditionArgs,

    /// Channels to compute statistics for (default: all channels)
    #[arg(long, num_args = 1..)]
    pub channels: Option<Vec<String>>,

    /// Directory for `<file_name>.result` artifacts
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// List the files that would be processed, then exit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct EventsArgs {
    /// Input capture file path
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub condition: ConditionArgs,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input capture file path
    #[arg(long)]
    pub file: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl ConditionArgs {
    pub fn to_condition(&self) -> Result<teva_rs::RangeCondition, String> {
        if self.low > self.high {
            return Err(format!(
                "--low ({}) must not exceed --high ({})",
                self.low, self.high
            ));
        }
        if self.channel.is_empty() {
            return Err("--channel must not be empty".to_string());
        }
        Ok(teva_rs::RangeCondition::new(
            self.channel.clone(),
            self.low,
            self.high,
        ))
    }
}
