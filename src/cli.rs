use clap::{Parser, ValueEnum};

/// Command-line arguments for `pipe-shell-rs`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pipe-shell-rs",
    version,
    about = "A minimal interactive shell that runs `|`-separated commands as a process pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Prompt printed before each line is read.
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Maximum number of words (program included) in a single command.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub max_args: Option<u16>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PIPESH_LOG` or a default of `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
