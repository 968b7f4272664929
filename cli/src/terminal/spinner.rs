use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Spins while the sweep runs; the caller clears it before printing
/// results.
pub fn start_sweep_spinner(host_count: usize) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}").unwrap();
    pb.set_style(style);
    pb.set_message(format!("Probing {host_count} hosts..."));
    pb.enable_steady_tick(TICK_INTERVAL);
    pb
}
