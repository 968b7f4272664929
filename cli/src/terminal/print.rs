use std::time::Duration;

use colored::*;
use sweepr_common::network::probe::ProbeResult;
use sweepr_common::network::spec::NetworkSpec;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 56;

const ADDR_COL: usize = 18;
const STATUS_COL: usize = 10;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{}", line);
}

pub fn no_usable_hosts(network: &NetworkSpec) {
    println!(
        "{}",
        format!("Network {network} has no usable host addresses, nothing to sweep").yellow()
    );
}

/// Prints the result table: header, separator, then one row per
/// reachable host. Unreachable hosts are omitted.
pub fn results_table(results: &[ProbeResult]) {
    print!("{}", render_table(results));
}

pub fn summary(results: &[ProbeResult], total_time: Duration) {
    let active: usize = results.iter().filter(|r| r.is_reachable()).count();
    let active_str: ColoredString = format!("{active} active hosts").bold().green();
    let time_str: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    println!();
    println!("Sweep complete: {} identified in {}", active_str, time_str);
}

fn render_table(results: &[ProbeResult]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}{}{}\n",
        pad("IP Address", ADDR_COL).bold(),
        pad("Status", STATUS_COL).bold(),
        "Roundtrip Time (ms)".bold()
    ));
    out.push_str(&format!("{}\n", "─".repeat(TOTAL_WIDTH).bright_black()));

    for result in results.iter().filter(|r| r.is_reachable()) {
        let rtt_ms: u128 = result.rtt.map(|rtt| rtt.as_millis()).unwrap_or_default();
        out.push_str(&format!(
            "{}{}{}\n",
            pad(&result.addr.to_string(), ADDR_COL),
            pad("Active", STATUS_COL).green(),
            rtt_ms
        ));
    }

    out
}

fn pad(text: &str, width: usize) -> String {
    let fill: usize = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
