//! CSV output.
//!
//! Tables are written with the delimiter of their input and minimal quoting.
//! File output goes through a temporary file in the destination directory
//! so a failed run never leaves a partial file behind.

use crate::detect::Delimiter;
use crate::error::Result;
use crate::model::{Cell, Tabular};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Writes a table to any writer.
pub fn write_table<W: Write>(table: &Tabular, delimiter: Delimiter, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(Cell::as_str))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a table to a file, replacing it atomically.
pub fn write_table_to_path(
    table: &Tabular,
    delimiter: Delimiter,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    write_table(table, delimiter, file.as_file_mut())?;
    file.persist(path)?;

    debug!(path = %path.display(), rows = table.row_count(), "wrote table");
    Ok(())
}

/// Renders a table to a string.
pub fn to_csv_string(table: &Tabular, delimiter: Delimiter) -> Result<String> {
    let mut buf = Vec::new();
    write_table(table, delimiter, &mut buf)?;
    Ok(String::from_utf8(buf).map_err(|e| e.utf8_error())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tabular {
        let mut table = Tabular::new(["user_name", "full_name"]);
        table.push_fields(["anna_k", "Kowalska, Anna"]);
        table.push_fields(["john_d", ""]);
        table
    }

    #[test]
    fn test_minimal_quoting() {
        let csv = to_csv_string(&sample(), Delimiter::Comma).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines, vec!["user_name,full_name", "anna_k,\"Kowalska, Anna\"", "john_d,"]);
    }

    #[test]
    fn test_semicolon_output() {
        let csv = to_csv_string(&sample(), Delimiter::Semicolon).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "user_name;full_name");
        assert_eq!(lines[1], "anna_k;Kowalska, Anna");
    }

    #[test]
    fn test_header_only_output() {
        let table = Tabular::new(["user_name", "full_name"]);
        let csv = to_csv_string(&table, Delimiter::Comma).unwrap();
        assert_eq!(csv.trim_end(), "user_name,full_name");
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        std::fs::write(&path, "stale").unwrap();
        write_table_to_path(&sample(), Delimiter::Comma, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("user_name,full_name"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
