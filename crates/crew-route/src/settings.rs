use clap::Parser;
use crew_route_lib::{Config, ValidationPolicy};
use std::path::PathBuf;

/// Output format of the report
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Crew Route - estimate drive time, billable hours and arrival timelines for field-service crews
pub struct Settings {
    /// JSON file with an array of crew routes
    #[clap(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Only report the route of this crew
    #[clap(short, long)]
    pub crew: Option<String>,

    /// Reject invalid coordinates, durations and start times instead of warning
    #[clap(long, default_value = "false")]
    pub strict: bool,

    /// Start time (HH:MM, 24-hour) for routes that do not set one
    #[clap(long, default_value = "08:00")]
    pub start_time: String,

    /// Report format
    #[clap(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl Settings {
    /// Parse the command line, exiting with usage information on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Library configuration derived from the flags
    pub fn config(&self) -> Config {
        Config {
            validation: if self.strict {
                ValidationPolicy::Strict
            } else {
                ValidationPolicy::Lenient
            },
            default_start_time: self.start_time.clone(),
        }
    }
}
