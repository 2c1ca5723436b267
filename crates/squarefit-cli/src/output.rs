//! Output formatting utilities.

use serde::Serialize;
use squarefit_core::Verdict;

/// Formats a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Prints the verdict table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<24} {:<10} {:<8} {:<18} {}",
        "INPUT", "STATUS", "SQUARES", "OBJECTIVE", "DETAIL"
    );
    println!("{}", "-".repeat(100));
}

/// Formats a verdict as a table row.
pub fn format_table_row(input: &str, verdict: &Verdict) -> String {
    match verdict {
        Verdict::Accepted(accepted) => format!(
            "{:<24} {:<10} {:<8} {:<18} {}",
            truncate(input, 24),
            "accepted",
            accepted.square_count,
            accepted.objective_value.display(),
            accepted.content_hash
        ),
        Verdict::Rejected(rejection) => {
            let mut detail = rejection.detail.clone().unwrap_or_default();
            if !rejection.colliding_pairs.is_empty() {
                let pairs: Vec<String> = rejection
                    .colliding_pairs
                    .iter()
                    .map(|(i, j)| format!("({}, {})", i, j))
                    .collect();
                detail = format!("{}: {}", detail, pairs.join(" "));
            }
            format!(
                "{:<24} {:<10} {:<8} {:<18} {}",
                truncate(input, 24),
                "rejected",
                "-",
                format!("{:?}", rejection.reason).to_lowercase(),
                detail
            )
        }
    }
}

/// Display name for an input path.
pub fn input_name(input: Option<&str>) -> &str {
    input.unwrap_or("<stdin>")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
