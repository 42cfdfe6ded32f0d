use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gradegrip")]
#[command(about = "A terminal CGPA calculator - grade and weight your courses, get the average")]
pub struct CliArgs {
    /// Path to the persisted course sheet (overrides config)
    #[arg(long)]
    pub sheet: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
