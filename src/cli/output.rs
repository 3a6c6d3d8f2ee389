//! Output formatting utilities

use crate::application::{ImportSummary, RepackSummary};

fn count_of(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// Format the result of an import for display
pub fn format_import_summary(summary: &ImportSummary) -> String {
    format!(
        "Exported {} with {} to {}",
        count_of(summary.entries, "entry", "entries"),
        count_of(summary.photos, "photo", "photos"),
        summary.output.display()
    )
}

/// Format the result of a repack for display
pub fn format_repack_summary(summary: &RepackSummary) -> String {
    format!(
        "Repacked {} and {}",
        count_of(summary.journals, "journal", "journals"),
        count_of(summary.photos, "photo", "photos")
    )
}
