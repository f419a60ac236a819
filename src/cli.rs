use std::path::PathBuf;

use clap::Parser;

/// Command line for the project structure setup.
#[derive(Parser, Debug)]
#[command(
    name = "spear-scaffold",
    version,
    about = "Create the project folder layout, skipping folders that already exist"
)]
pub struct Cli {
    /// Directory to create the layout under (defaults to the current directory).
    #[arg(short = 'C', long = "base-path", env = "SPEAR_SCAFFOLD_BASE_PATH")]
    pub base_path: Option<PathBuf>,
    /// Load the folder layout from a TOML file instead of the built-in one.
    #[arg(long = "layout")]
    pub layout: Option<PathBuf>,
    /// Print the layout entries and exit.
    #[arg(long = "print-layout")]
    pub print_layout: bool,
    /// Report what would be created without touching the filesystem.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
    /// Only print the summary.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
    /// Print the run report as JSON.
    #[arg(long = "json")]
    pub json: bool,
    /// Log more detail to stderr (repeat for debug output).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
