use std::time::Duration;

pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_CONCURRENCY: usize = 256;

/// Runtime knobs threaded from the CLI into the probe engine.
pub struct Config {
    /// How long a single probe waits for an echo reply before its host
    /// is reported unreachable.
    pub probe_timeout: Duration,
    /// Upper bound on probes in flight at the same time.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
