//! Vendor footer detection.
//!
//! Export tools append a block of summary and branding lines after the real
//! data:
//!
//! ```text
//! anna_k,Anna Kowalska,...
//! ,,
//! Found profiles count: 1543
//! IG DM BOT:
//! https://socialdeck.ai
//! ```
//!
//! Only the first column of each row is inspected.

use crate::model::{Cell, Tabular};
use crate::options::{CleanOptions, FooterConfirmation};
use tracing::debug;

/// Prefix of the profile count summary line.
const FOUND_PROFILES_PREFIX: &str = "Found profiles count:";

/// Product banner line.
const BOT_BANNER: &str = "IG DM BOT:";

/// Free-plan limit notices (matched case-insensitively).
const FREE_PLAN_NOTICES: &[&str] = &["profiles max on free plan", "max on free plan"];

/// Vendor domain (matched case-insensitively).
const VENDOR_DOMAIN: &str = "socialdeck.ai";

/// Phrases removed anywhere in the data by the footer sweep.
pub const FOOTER_PHRASES: &[&str] = &[
    FOUND_PROFILES_PREFIX,
    BOT_BANNER,
    VENDOR_DOMAIN,
    "https://socialdeck.ai",
    "profiles max on free plan",
    "max on free plan",
];

/// Returns true if a first-column value could start a footer block.
pub fn is_footer_candidate(cell: &Cell) -> bool {
    if cell.is_null_like() {
        return true;
    }

    let text = cell.as_str().trim();
    if text.starts_with(FOUND_PROFILES_PREFIX) || text == BOT_BANNER {
        return true;
    }

    let lower = text.to_lowercase();
    FREE_PLAN_NOTICES.iter().any(|notice| lower.contains(notice))
}

/// Returns true if a first-column value confirms a footer block.
pub fn is_footer_marker(cell: &Cell) -> bool {
    is_footer_candidate(cell) || cell.as_str().to_lowercase().contains(VENDOR_DOMAIN)
}

/// Returns true if a first-column value contains any footer phrase.
pub fn contains_footer_phrase(cell: &Cell) -> bool {
    let lower = cell.as_str().to_lowercase();
    FOOTER_PHRASES
        .iter()
        .any(|phrase| lower.contains(&phrase.to_lowercase()))
}

/// Finds the index of the first row of the footer block.
///
/// A candidate row is confirmed when a footer marker appears within the
/// confirmation window. Returns `None` when no candidate is confirmed.
pub fn find_footer_start(table: &Tabular, options: &CleanOptions) -> Option<usize> {
    let len = table.row_count();
    let window = options.footer_window.max(1);

    for i in 0..len {
        let Some(cell) = table.first_cell(i) else {
            continue;
        };
        if !is_footer_candidate(cell) {
            continue;
        }

        let start = match options.footer_confirmation {
            FooterConfirmation::Inclusive => i,
            FooterConfirmation::Lookahead => i + 1,
        };
        let end = (start + window).min(len);

        let confirmed = (start..end)
            .filter_map(|j| table.first_cell(j))
            .any(is_footer_marker);

        if confirmed {
            debug!(
                index = i,
                sample = cell.as_str(),
                "footer section detected"
            );
            return Some(i);
        }
    }

    None
}
