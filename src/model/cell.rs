//! Cell values.

use serde::Serialize;

/// Text spreadsheet tools write for a missing value.
pub const NAN_TOKEN: &str = "nan";

/// A single field of a profile row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    /// Field with text content
    Value(String),
    /// Field present but empty or whitespace-only
    Blank,
    /// Field absent from the record (short row or added column)
    #[default]
    Missing,
}

impl Cell {
    /// Creates a cell from a parsed field.
    pub fn from_field(field: &str) -> Self {
        if field.trim().is_empty() {
            Cell::Blank
        } else {
            Cell::Value(field.to_string())
        }
    }

    /// Returns the text of the cell, or `""` for blank and missing cells.
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Value(text) => text,
            Cell::Blank | Cell::Missing => "",
        }
    }

    /// Returns true for blank and missing cells.
    pub fn is_empty(&self) -> bool {
        !matches!(self, Cell::Value(_))
    }

    /// Returns true for blank and missing cells and for the literal `nan` token.
    pub fn is_null_like(&self) -> bool {
        match self {
            Cell::Value(text) => text.trim() == NAN_TOKEN,
            Cell::Blank | Cell::Missing => true,
        }
    }
}

impl From<&str> for Cell {
    fn from(field: &str) -> Self {
        Cell::from_field(field)
    }
}
