use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shortstat",
    about = "Extract Shorts titles, hashtags and view counts from saved channel pages",
    version,
    long_about = None
)]
pub struct Args {
    /// HTML file or directory of saved pages
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory reports are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of keywords and hashtags to list
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Path to a configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Command used to open written reports
    #[arg(long)]
    pub editor: Option<String>,

    /// Do not open reports after writing them
    #[arg(long)]
    pub no_open: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize shortstat.toml with default settings
    #[arg(long)]
    pub init: bool,
}
