//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dayport")]
#[command(about = "Convert social-media exports into Day One journal archives", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (default: ./dayport.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a journal from exports and write it as an archive
    Import {
        /// Facebook export directory (searched for your_posts*.json)
        #[arg(long = "facebook", value_name = "DIR")]
        facebook_exports: Vec<PathBuf>,

        /// Single Facebook posts file
        #[arg(long = "posts", value_name = "FILE")]
        post_files: Vec<PathBuf>,

        /// Directory media paths in --posts files are relative to
        #[arg(long, value_name = "DIR")]
        media_root: Option<PathBuf>,

        /// Journal name
        #[arg(short, long)]
        name: Option<String>,

        /// Archive to write
        #[arg(short, long, default_value = "journal.zip")]
        output: PathBuf,
    },

    /// Print the journals in an archive as JSON
    Dump {
        /// Archive to read
        archive: PathBuf,
    },

    /// Load an archive and save it to a new file
    Repack {
        /// Archive to read
        input: PathBuf,

        /// Archive to write
        output: PathBuf,
    },
}
