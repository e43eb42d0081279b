//! CLI output: user-facing error and report formatting.

use crate::error::MakerError;
use crate::maker::MakeReport;
use crate::store::CacheEntryStatus;

/// Map domain errors to a string for CLI output.
/// Keeps route handlers thin; extend with stable categories if needed.
pub fn map_error(e: &MakerError) -> String {
    e.to_string()
}

pub fn format_make_report(report: &MakeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Generated {} class(es) for vendor {} in {} ms ({} previous artifact(s) replaced)\n",
        report.class_count, report.vendor_alias, report.duration_ms, report.removed_count
    ));
    for (fqn, path) in &report.classes {
        out.push_str(&format!("  {} -> {}\n", fqn, path.display()));
    }
    out.trim_end().to_string()
}

pub fn format_cache_status(key: &str, status: Option<&CacheEntryStatus>) -> String {
    match status {
        Some(status) => format!(
            "{}: age {}s, ttl {}s, {}",
            key,
            status.age_secs,
            status.ttl_secs,
            if status.fresh { "fresh" } else { "expired" }
        ),
        None => format!("{}: no cached descriptor", key),
    }
}
