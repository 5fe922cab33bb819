//! Tournament configuration.

use std::path::PathBuf;

/// Tournament settings, assembled with chainable `with_*` methods.
///
/// ```
/// use box_arbiter::prelude::*;
///
/// let config = Configuration::new()
///     .with_rounds(2)
///     .with_workers(4)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    pub(crate) rounds: u32,
    pub(crate) workers: usize,
    pub(crate) log_dir: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) trace_log: bool,
}

impl Configuration {
    /// Defaults: one match per pair, run sequentially, no logging, fresh
    /// entropy.
    pub fn new() -> Configuration {
        Configuration::default()
    }

    /// Full double round robins to play; `0` plays one match per pair.
    pub fn with_rounds(mut self, rounds: u32) -> Configuration {
        self.rounds = rounds;
        self
    }

    /// Matches to run in parallel; `0` runs them on the calling thread.
    pub fn with_workers(mut self, workers: usize) -> Configuration {
        self.workers = workers;
        self
    }

    /// Existing directory under which a timestamped run directory with
    /// transcripts and player stderr captures is created.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Configuration {
        self.log_dir = Some(dir.into());
        self
    }

    /// Fixes the master seed. Seeded runs replay the same tiles and
    /// secret colors per scheduled match, whatever the worker count.
    pub fn with_seed(mut self, seed: u64) -> Configuration {
        self.seed = Some(seed);
        self
    }

    /// Also writes a trace log of arbiter internals.
    pub fn with_trace_log(mut self, enabled: bool) -> Configuration {
        self.trace_log = enabled;
        self
    }
}
