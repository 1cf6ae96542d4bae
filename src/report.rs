//! Plain-text rendering of a reconciliation outcome

use core_reconcile::{ErrorCategory, ErrorStats, ReconcileOutcome};
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

/// Full report: failure detail (verbose only), statistics, then recommendations
pub fn render_report(outcome: &ReconcileOutcome, verbose: bool) -> String {
    let mut out = String::new();

    if verbose {
        for failure in &outcome.failures {
            let _ = writeln!(
                out,
                "Error checking album '{} - {}': {}",
                failure.record.artist_name, failure.record.title, failure.message
            );
        }
    }

    if outcome.stats.has_failures() {
        out.push_str(&render_statistics(&outcome.stats));
        out.push('\n');
    }

    out.push_str(&render_recommendations(outcome));
    out
}

/// Success ratio plus one hint per category that saw failures
fn render_statistics(stats: &ErrorStats) -> String {
    let mut out = format!(
        "API Statistics: {}/{} requests successful ({} failed)\n",
        stats.successful, stats.total, stats.failed
    );

    for category in [
        ErrorCategory::RateLimited,
        ErrorCategory::ServerError,
        ErrorCategory::Network,
        ErrorCategory::Other,
    ] {
        let count = stats.count(category);
        if count == 0 {
            continue;
        }
        let hint = match category {
            ErrorCategory::RateLimited => format!(
                "Rate limiting detected ({count} requests) - server may be limiting API calls"
            ),
            ErrorCategory::ServerError => format!(
                "Server errors detected ({count} requests) - Subsonic server may be overloaded"
            ),
            ErrorCategory::Network => format!(
                "Network issues detected ({count} requests) - connection problems to server"
            ),
            ErrorCategory::Other => format!(
                "Other errors detected ({count} requests) - run with VERBOSE=true for details"
            ),
        };
        let _ = writeln!(out, "⚠️  {hint}");
    }

    out
}

fn render_recommendations(outcome: &ReconcileOutcome) -> String {
    if outcome.recommendations.is_empty() {
        return "All top albums exist in your Subsonic library!\n".to_string();
    }

    let mut out = String::from("RECOMMENDED ALBUMS\n");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    for (index, record) in outcome.recommendations.iter().enumerate() {
        let _ = writeln!(out, "{}. {} - {}", index + 1, record.artist_name, record.title);
        let _ = writeln!(out, "   Last.fm URL: {}", record.source_url);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    out
}
