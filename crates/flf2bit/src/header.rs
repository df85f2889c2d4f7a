//! FLF header line interpretation.
use crate::error::{FontError, Result};

/// Minimum number of whitespace separated fields in a `flf2a` header.
const MIN_HEADER_FIELDS: usize = 6;
const DEFAULT_HARDBLANK: char = '$';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    hardblank: char,
    height: Option<usize>,
    comment_lines: usize,
    quoted_name: Option<String>,
}

impl Header {
    /// Parses the first line of an FLF file.
    ///
    /// The hardblank is the 6th literal character of the line (right after
    /// the `flf2a` signature), not a parsed field. The comment count comes from
    /// the 6th field and falls back to 0 when it does not parse.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_HEADER_FIELDS {
            return Err(FontError::InvalidHeader(format!(
                "expected at least {MIN_HEADER_FIELDS} fields, found {}",
                fields.len()
            )));
        }
        let hardblank = line.chars().nth(5).unwrap_or(DEFAULT_HARDBLANK);
        let height = fields[1].parse().ok();
        let comment_lines = fields[5].parse().unwrap_or(0);
        let quoted_name = line.split('"').nth(1).filter(|name| !name.is_empty());

        Ok(Self {
            hardblank,
            height,
            comment_lines,
            quoted_name: quoted_name.map(str::to_string),
        })
    }

    pub fn hardblank(&self) -> char {
        self.hardblank
    }

    /// Declared glyph height, `None` when the field is not a number.
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    pub fn comment_lines(&self) -> usize {
        self.comment_lines
    }

    /// Text after the first double quote, up to the next one or the end of
    /// the line.
    pub fn quoted_name(&self) -> Option<&str> {
        self.quoted_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let header = Header::parse("flf2a$ 6 5 20 15 3").unwrap();
        assert_eq!(header.hardblank(), '$');
        assert_eq!(header.height(), Some(6));
        assert_eq!(header.comment_lines(), 3);
        assert_eq!(header.quoted_name(), None);
    }

    #[test]
    fn test_header_full_layout() {
        let header = Header::parse("flf2a# 8 6 20 15 12 0 143 229").unwrap();
        assert_eq!(header.hardblank(), '#');
        assert_eq!(header.height(), Some(8));
        assert_eq!(header.comment_lines(), 12);
    }

    #[test]
    fn test_hardblank_is_literal_sixth_char() {
        // Field splitting would give "tlf2a", the literal 6th char is still the hardblank.
        let header = Header::parse("tlf2a\u{a0} 1 1 10 0 4").unwrap();
        assert_eq!(header.hardblank(), '\u{a0}');
        assert_eq!(header.height(), Some(1));
    }

    #[test]
    fn test_too_few_fields() {
        assert!(matches!(
            Header::parse("flf2a$ 6 5 20 15"),
            Err(FontError::InvalidHeader(_))
        ));
        assert!(matches!(Header::parse(""), Err(FontError::InvalidHeader(_))));
    }

    #[test]
    fn test_malformed_comment_count() {
        let header = Header::parse("flf2a$ 6 5 20 15 x").unwrap();
        assert_eq!(header.comment_lines(), 0);
    }

    #[test]
    fn test_unknown_height() {
        let header = Header::parse("flf2a$ ? 5 20 15 0").unwrap();
        assert_eq!(header.height(), None);
    }

    #[test]
    fn test_quoted_name() {
        let header = Header::parse("flf2a$ 6 5 20 15 1 \"Big Money\"").unwrap();
        assert_eq!(header.quoted_name(), Some("Big Money"));
        let unterminated = Header::parse("flf2a$ 6 5 20 15 1 \"Big").unwrap();
        assert_eq!(unterminated.quoted_name(), Some("Big"));
        let empty = Header::parse("flf2a$ 6 5 20 15 1 \"\"").unwrap();
        assert_eq!(empty.quoted_name(), None);
    }
}
