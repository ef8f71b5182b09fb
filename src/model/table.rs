//! Tabular profile data.

use super::Cell;

/// A header plus rows of cells.
///
/// Every row has exactly one cell per header column; all mutators keep that
/// invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tabular {
    /// Column names, in file order
    headers: Vec<String>,
    /// Rows, each aligned with `headers`
    rows: Vec<Vec<Cell>>,
}

impl Tabular {
    /// Creates an empty table with the given header.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding it with missing cells or truncating it to the
    /// header width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Missing);
        self.rows.push(row);
    }

    /// Appends a row of text fields.
    pub fn push_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row = fields
            .into_iter()
            .map(|f| Cell::from_field(f.as_ref()))
            .collect();
        self.push_row(row);
    }

    /// Returns the column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns a row by index.
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Returns the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Returns true if the column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Gets a cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Returns the text of a cell, `""` when the row or column is absent.
    pub fn text(&self, row: usize, column: &str) -> &str {
        self.get(row, column).map(Cell::as_str).unwrap_or("")
    }

    /// Returns the first cell of a row.
    pub fn first_cell(&self, row: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.first())
    }

    /// Keeps only the first `len` rows.
    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
    }

    /// Keeps rows matching the predicate; returns how many were removed.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[Cell]) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    /// Removes a column; returns false if it does not exist.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(col) = self.column_index(name) else {
            return false;
        };
        self.headers.remove(col);
        for row in &mut self.rows {
            row.remove(col);
        }
        true
    }

    /// Renames a column in place; returns false if it does not exist.
    pub fn rename_column(&mut self, from: &str, to: impl Into<String>) -> bool {
        match self.column_index(from) {
            Some(col) => {
                self.headers[col] = to.into();
                true
            }
            None => false,
        }
    }

    /// Appends a column filled with `fill`.
    pub fn add_column(&mut self, name: impl Into<String>, fill: Cell) {
        self.headers.push(name.into());
        for row in &mut self.rows {
            row.push(fill.clone());
        }
    }

    /// Rewrites every cell of a column; returns false if it does not exist.
    pub fn map_column(&mut self, name: &str, mut f: impl FnMut(Cell) -> Cell) -> bool {
        let Some(col) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            let cell = std::mem::take(&mut row[col]);
            row[col] = f(cell);
        }
        true
    }

    /// Builds a table with the same header from a subset of rows.
    pub fn with_rows(&self, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(self.headers.iter().cloned());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Consumes the table and returns its header and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.headers, self.rows)
    }
}
