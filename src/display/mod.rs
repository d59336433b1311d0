//! Display formatting for terminal output
//!
//! Formatters return strings; printing is left to the CLI and the shell.

pub mod lists;
pub mod search;
pub mod session;

pub use lists::{format_add_outcome, format_delete_outcome, format_folder, format_folder_listing};
pub use search::format_search_results;
pub use session::{format_session, format_session_list};

use crate::models::{ListEntry, Money};

/// Currency symbols used when printing prices
#[derive(Debug, Clone, Copy)]
pub struct Symbols<'a> {
    pub source: &'a str,
    pub normalized: &'a str,
}

impl Default for Symbols<'static> {
    fn default() -> Self {
        Self {
            source: "₡",
            normalized: "$",
        }
    }
}

impl Symbols<'_> {
    /// `₡1000.00 ($1.94)`
    pub fn price_pair(&self, source: Money, normalized: Money) -> String {
        format!(
            "{} ({})",
            source.format_with_symbol(self.source),
            normalized.format_with_symbol(self.normalized)
        )
    }

    pub fn normalized(&self, amount: Money) -> String {
        amount.format_with_symbol(self.normalized)
    }

    /// `leche: ₡1000.00 ($1.94)`
    pub fn entry_line(&self, entry: &ListEntry) -> String {
        format!(
            "{}: {}",
            entry.description(),
            self.price_pair(entry.price_source(), entry.price_normalized())
        )
    }
}
