//! Thread placement for batch correction

use std::num::NonZeroUsize;

/// Where `correct_batch` runs its work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// On the calling thread, in input order
    Sequential,
    /// On rayon's global pool
    #[default]
    Global,
    /// On a pool built for the batch with exactly this many threads
    Threads(NonZeroUsize),
}

/// Settings for correcting many strings at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorrectionConfig {
    pub parallelism: Parallelism,
}

impl CorrectionConfig {
    /// `threads == 0` means the global pool; `parallel == false` overrides it
    pub fn new(threads: usize, parallel: bool) -> Self {
        let parallelism = match (parallel, NonZeroUsize::new(threads)) {
            (false, _) => Parallelism::Sequential,
            (true, None) => Parallelism::Global,
            (true, Some(n)) => Parallelism::Threads(n),
        };
        Self { parallelism }
    }

    /// Read `--threads` and `--no-parallel` from the `correct` subcommand
    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let threads = matches.get_one::<usize>("threads").copied().unwrap_or(0);
        Self::new(threads, !matches.get_flag("no-parallel"))
    }
}
