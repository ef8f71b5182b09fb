//! Profile data model.
//!
//! This module defines the in-memory table that flows from the cleaning
//! stage into the filter stage, plus the summaries both stages report.

mod cell;
mod stats;
mod table;

pub use cell::*;
pub use stats::*;
pub use table::*;
