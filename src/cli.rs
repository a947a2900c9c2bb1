use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tidywin",
    about = "A Windows cleanup tool — delete cached and temporary files",
    version
)]
pub struct Cli {
    /// Path to the config file (defaults to the per-user location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show configured cleanup targets and their current sizes (no deletion)
    Scan,

    /// Clean configured directories (requires --confirm to actually delete)
    Clean {
        /// Actually delete files. Without this flag, behaves like scan.
        #[arg(long)]
        confirm: bool,

        /// Overwrite files with random data before deleting
        #[arg(long)]
        secure: bool,

        /// Copy files into the backup directory before deleting
        #[arg(long)]
        backup: bool,

        /// Additional path to exclude from deletion (repeatable)
        #[arg(long = "exclude")]
        excludes: Vec<String>,

        /// Clean a single directory instead of the configured set
        #[arg(long)]
        path: Option<String>,
    },
}
