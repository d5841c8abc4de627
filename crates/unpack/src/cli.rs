use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "unpack", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Cli {
    /// CSV manifest whose cells hold `archive!entry` requests
    pub manifest: PathBuf,

    /// Directory the archive names in the manifest are resolved against
    pub archive_dir: PathBuf,

    /// Maximum number of archives processed at once [default: number of CPUs]
    #[arg(short, long, env = "UNPACK_JOBS")]
    pub jobs: Option<NonZeroUsize>,

    /// Exit with status 1 when any archive failed or missed entries
    #[arg(long)]
    pub strict: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn jobs(&self) -> usize {
        self.jobs.map_or_else(num_cpus::get, NonZeroUsize::get)
    }
}
