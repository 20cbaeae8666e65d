use std::path::PathBuf;

use clap::Parser;
use hbnb_store::ReloadPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "hbnb",
    about = "HBnB object store console",
    version,
)]
pub struct Cli {
    /// Backing JSON document [default: file.json]
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// What to do with stored entries that cannot be loaded
    #[arg(long, value_enum)]
    pub on_corrupt: Option<CorruptEntries>,

    /// Never print the prompt, even on a terminal
    #[arg(long)]
    pub no_prompt: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CorruptEntries {
    Fail,
    Skip,
}

impl From<CorruptEntries> for ReloadPolicy {
    fn from(value: CorruptEntries) -> Self {
        match value {
            CorruptEntries::Fail => ReloadPolicy::Fail,
            CorruptEntries::Skip => ReloadPolicy::Skip,
        }
    }
}
