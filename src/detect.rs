//! Delimiter detection for profile exports.

use crate::error::Result;
use std::io::BufRead;
use std::path::Path;

/// Field delimiters produced by the exporting tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// `,`
    #[default]
    Comma,
    /// `;`
    Semicolon,
}

impl Delimiter {
    /// Returns the delimiter as a byte, as the CSV reader and writer expect it.
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }

    /// Returns the delimiter as a character.
    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl serde::Serialize for Delimiter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Detect the delimiter of a file from its first line.
pub fn detect_delimiter_from_path(path: impl AsRef<Path>) -> Result<Delimiter> {
    let file = std::fs::File::open(path)?;
    detect_delimiter(&mut std::io::BufReader::new(file))
}

/// Detect the delimiter from the first line of a reader.
pub fn detect_delimiter<R: BufRead>(reader: &mut R) -> Result<Delimiter> {
    let mut first_line = Vec::new();
    reader.read_until(b'\n', &mut first_line)?;
    Ok(detect_delimiter_from_bytes(&first_line))
}

/// Detect the delimiter from raw bytes; only the first line is inspected.
///
/// The more frequent of `,` and `;` wins. Ties (including a line with
/// neither) resolve to a comma.
pub fn detect_delimiter_from_bytes(data: &[u8]) -> Delimiter {
    let first_line = data.split(|&b| b == b'\n').next().unwrap_or_default();

    let commas = first_line.iter().filter(|&&b| b == b',').count();
    let semicolons = first_line.iter().filter(|&&b| b == b';').count();

    if semicolons > commas {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_comma() {
        let data = b"userName,fullName,profileUrl\nanna,Anna,x\n";
        assert_eq!(detect_delimiter_from_bytes(data), Delimiter::Comma);
    }

    #[test]
    fn test_detect_semicolon() {
        let data = b"userName;fullName;profileUrl\nanna;Anna, K;x\n";
        assert_eq!(detect_delimiter_from_bytes(data), Delimiter::Semicolon);
    }

    #[test]
    fn test_tie_defaults_to_comma() {
        assert_eq!(detect_delimiter_from_bytes(b"a,b;c\n"), Delimiter::Comma);
        assert_eq!(detect_delimiter_from_bytes(b"single\n"), Delimiter::Comma);
        assert_eq!(detect_delimiter_from_bytes(b""), Delimiter::Comma);
    }

    #[test]
    fn test_only_first_line_counts() {
        // Later lines full of semicolons must not influence detection
        let data = b"a,b\n;;;;;;;;\n;;;;;;;;\n";
        assert_eq!(detect_delimiter_from_bytes(data), Delimiter::Comma);
    }

    #[test]
    fn test_detect_from_reader() {
        let mut reader = std::io::Cursor::new(b"x;y;z\r\n1;2;3\r\n".to_vec());
        assert_eq!(detect_delimiter(&mut reader).unwrap(), Delimiter::Semicolon);
    }

    #[test]
    fn test_display() {
        assert_eq!(Delimiter::Semicolon.to_string(), ";");
        assert_eq!(Delimiter::Comma.as_byte(), b',');
    }
}
