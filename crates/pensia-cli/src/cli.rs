use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "pensia",
    version,
    about = "Cross-field validation of pension product filings"
)]
pub struct Cli {
    /// Filing files (.json, .yaml, .yml) or directories holding them
    #[arg(required_unless_present = "list_checkers")]
    pub inputs: Vec<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory the problem reports are written to")]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    #[arg(long = "skip", value_name = "CHECKER", help = "Skip a checker by name (repeatable)")]
    pub skip: Vec<String>,

    #[arg(long, value_name = "FILE", help = "YAML validation config")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Do not check inputs against the embedded schema")]
    pub no_schema: bool,

    #[arg(long, default_value_t = false, help = "List registered checkers and exit")]
    pub list_checkers: bool,

    #[arg(short, long, default_value_t = false, help = "Log debug output")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}
