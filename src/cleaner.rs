//! # Cleaning Stage
//!
//! Turns a raw vendor export into a table the filter stage can rely on.
//!
//! ## Steps
//!
//! 1. **Delimiter** - `,` or `;`, detected from the first line
//! 2. **Parse** - quoted fields, leading spaces after a delimiter skipped
//! 3. **Footer** - cut the trailing vendor block (see [`crate::footer`])
//! 4. **Sweep** - drop stray rows mentioning footer phrases
//! 5. **Junk rows** - drop empty rows and rows without a first value
//! 6. **Columns** - drop noise columns, rename to `user_name`/`full_name`
//! 7. **Names** - blank out `"0"` and `"nan"` artifacts

use crate::detect::{detect_delimiter_from_bytes, Delimiter};
use crate::error::{Error, Result};
use crate::footer::{contains_footer_phrase, find_footer_start};
use crate::model::{Cell, CleanReport, Tabular, NAN_TOKEN};
use crate::options::CleanOptions;
use crate::output::write_table_to_path;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Column holding the account handle after cleaning.
pub const USER_NAME: &str = "user_name";

/// Column holding the display name after cleaning.
pub const FULL_NAME: &str = "full_name";

/// Output of the cleaning stage.
#[derive(Debug, Clone)]
pub struct Cleaned {
    /// The cleaned table
    pub table: Tabular,
    /// Delimiter of the input, reused for output
    pub delimiter: Delimiter,
    /// What cleaning changed
    pub report: CleanReport,
}

/// The cleaning stage.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    options: CleanOptions,
}

impl Cleaner {
    /// Creates a cleaner with the given options.
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    /// Returns the options in use.
    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// Cleans a file.
    pub fn clean_file(&self, path: impl AsRef<Path>) -> Result<Cleaned> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NoInputFile(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        debug!(path = %path.display(), bytes = data.len(), "cleaning file");
        self.clean_bytes(&data)
    }

    /// Cleans `input` and writes the cleaned table to `output`, keeping the
    /// input delimiter.
    pub fn write_cleaned(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Cleaned> {
        let cleaned = self.clean_file(input)?;
        write_table_to_path(&cleaned.table, cleaned.delimiter, output)?;
        Ok(cleaned)
    }

    /// Cleans raw file contents.
    pub fn clean_bytes(&self, data: &[u8]) -> Result<Cleaned> {
        let text = decode_input(data)?;
        self.clean_str(&text)
    }

    /// Cleans CSV text.
    pub fn clean_str(&self, text: &str) -> Result<Cleaned> {
        self.options.validate()?;

        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        let delimiter = detect_delimiter_from_bytes(text.as_bytes());
        debug!(%delimiter, "detected separator");

        let mut report = CleanReport {
            delimiter,
            ..Default::default()
        };
        let table = self.parse(text, delimiter, &mut report)?;

        Ok(self.clean_parsed(table, delimiter, report))
    }

    /// Runs the cleaning steps on an already parsed table.
    ///
    /// Cleaning is idempotent: a cleaned table comes back unchanged.
    pub fn clean_table(&self, table: Tabular, delimiter: Delimiter) -> Cleaned {
        let report = CleanReport {
            delimiter,
            ..Default::default()
        };
        self.clean_parsed(table, delimiter, report)
    }

    fn clean_parsed(&self, mut table: Tabular, delimiter: Delimiter, mut report: CleanReport) -> Cleaned {
        report.rows_parsed = table.row_count();

        if let Some(start) = find_footer_start(&table, &self.options) {
            report.footer_start = Some(start);
            report.footer_rows = table.row_count() - start;
            table.truncate(start);
            debug!(rows = report.footer_rows, "removed footer section");
        }

        report.swept_rows =
            table.retain_rows(|row| !row.first().is_some_and(contains_footer_phrase));

        let empty_rows = table.retain_rows(|row| !row.iter().all(Cell::is_null_like));
        let unnamed_rows = table.retain_rows(|row| !row.first().map_or(true, Cell::is_null_like));
        report.junk_rows = empty_rows + unnamed_rows;

        if report.swept_rows + report.junk_rows > 0 {
            debug!(
                swept = report.swept_rows,
                junk = report.junk_rows,
                "removed additional problematic rows"
            );
        }

        self.normalize_columns(&mut table, &mut report);

        if self.options.sanitize_names {
            for column in [USER_NAME, FULL_NAME] {
                table.map_column(column, sanitize_name);
            }
        }

        report.rows_remaining = table.row_count();
        debug!(
            rows = report.rows_remaining,
            columns = table.column_count(),
            "cleaning complete"
        );

        Cleaned {
            table,
            delimiter,
            report,
        }
    }

    fn normalize_columns(&self, table: &mut Tabular, report: &mut CleanReport) {
        for column in &self.options.drop_columns {
            if table.drop_column(column) {
                report.dropped_columns.push(column.clone());
            }
        }
        if !report.dropped_columns.is_empty() {
            debug!(columns = ?report.dropped_columns, "removed columns");
        }

        for (from, to) in &self.options.renames {
            if from == to || !table.has_column(from) {
                continue;
            }
            // Last rename onto a target wins
            if table.drop_column(to) {
                warn!(column = %to, source = %from, "column already present, replacing it");
            }
            table.rename_column(from, to.clone());
            report.renamed_columns.push((from.clone(), to.clone()));
        }
        if !report.renamed_columns.is_empty() {
            debug!(columns = ?report.renamed_columns, "renamed columns");
        }

        for required in [USER_NAME, FULL_NAME] {
            if !table.has_column(required) {
                table.add_column(required, Cell::Blank);
                report.added_columns.push(required.to_string());
                debug!(column = required, "added missing column");
            }
        }
    }

    fn parse(&self, text: &str, delimiter: Delimiter, report: &mut CleanReport) -> Result<Tabular> {
        let text = skip_initial_spaces(text, delimiter);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .quote(b'"')
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record?,
            None => return Err(Error::UnreadableHeader),
        };
        let headers: Vec<String> = header.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::UnreadableHeader);
        }

        let mut table = Tabular::new(name_columns(headers));
        let width = table.column_count();

        for record in records {
            let record = record?;
            if record.len() > width {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                if !self.options.is_lenient() {
                    return Err(Error::MalformedRow {
                        line,
                        expected: width,
                        found: record.len(),
                    });
                }
                warn!(line, expected = width, found = record.len(), "truncating over-long row");
                report.truncated_rows += 1;
            }
            table.push_fields(record.iter());
        }

        Ok(table)
    }
}

/// Returns the conventional output path for a cleaned file: `<stem>_cleaned.csv`.
pub fn default_cleaned_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    input.with_file_name(format!("{}_cleaned.csv", stem))
}

/// Decodes file contents as UTF-8.
#[cfg(not(feature = "cp1251"))]
fn decode_input(data: &[u8]) -> Result<Cow<'_, str>> {
    Ok(Cow::Borrowed(std::str::from_utf8(data)?))
}

/// Decodes file contents as UTF-8, falling back to Windows-1251.
#[cfg(feature = "cp1251")]
fn decode_input(data: &[u8]) -> Result<Cow<'_, str>> {
    match std::str::from_utf8(data) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(err) => {
            warn!(error = %err, "input is not UTF-8, decoding as Windows-1251");
            let (text, _) = encoding_rs::WINDOWS_1251.decode_without_bom_handling(data);
            Ok(Cow::Owned(text.into_owned()))
        }
    }
}

/// Drops spaces at the start of every field outside quotes, so that a
/// field like ` "Kowalska, Anna"` reaches the CSV reader as a quoted field.
fn skip_initial_spaces(text: &str, delimiter: Delimiter) -> Cow<'_, str> {
    if !text.contains(' ') {
        return Cow::Borrowed(text);
    }

    let delimiter = delimiter.as_char();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut field_start = true;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            out.push(c);
            if c == '"' {
                // "" is an escaped quote
                if chars.peek() == Some(&'"') {
                    out.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        if field_start && c == ' ' {
            continue;
        }
        if field_start && c == '"' {
            in_quotes = true;
        }
        field_start = c == delimiter || c == '\n' || c == '\r';
        out.push(c);
    }

    Cow::Owned(out)
}

/// Gives blank header cells a placeholder name and disambiguates duplicates.
fn name_columns(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = if name.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name
            };
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

fn sanitize_name(cell: Cell) -> Cell {
    match &cell {
        Cell::Value(text) if text == "0" || text == NAN_TOKEN => Cell::Blank,
        _ => cell,
    }
}
