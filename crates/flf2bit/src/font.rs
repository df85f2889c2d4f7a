use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FontError, Result};

pub const DEFAULT_NAME: &str = "Converted Font";
pub const DEFAULT_AUTHOR: &str = "Converted from FLF";
pub const DEFAULT_LICENSE: &str = "Converted font, check original license";

/// First and last code point a glyph may be stored under.
pub const FIRST_CHAR: u32 = 32;
pub const LAST_CHAR: u32 = 126;

/// The `.bit` font record: metadata plus rows of text per printable ASCII char.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitFont {
    pub name: String,
    pub author: String,
    pub license: String,
    pub characters: BTreeMap<char, Vec<String>>,
}

/// A glyph whose rows are not all the same width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidthMismatch {
    pub ch: char,
    pub widths: Vec<usize>,
}

static ANSI_ESCAPE: OnceLock<Regex> = OnceLock::new();
fn ansi_escape() -> &'static Regex {
    ANSI_ESCAPE.get_or_init(|| {
        Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("static regex")
    })
}

/// Width of a row in characters, ignoring ANSI escape sequences.
pub fn visible_width(row: &str) -> usize {
    ansi_escape().replace_all(row, "").chars().count()
}

pub(crate) fn is_storable(ch: char) -> bool {
    (FIRST_CHAR..=LAST_CHAR).contains(&(ch as u32))
}

impl Default for BitFont {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_AUTHOR, DEFAULT_LICENSE)
    }
}

impl BitFont {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            license: license.into(),
            characters: BTreeMap::new(),
        }
    }

    /// Stores a glyph, replacing any earlier one. Characters outside
    /// printable ASCII are refused and `false` is returned.
    pub fn insert(&mut self, ch: char, rows: Vec<String>) -> bool {
        if !is_storable(ch) {
            return false;
        }
        self.characters.insert(ch, rows);
        true
    }

    pub fn glyph(&self, ch: char) -> Option<&[String]> {
        self.characters.get(&ch).map(Vec::as_slice)
    }

    pub fn has_char(&self, ch: char) -> bool {
        self.characters.contains_key(&ch)
    }

    pub fn glyph_count(&self) -> usize {
        self.characters.len()
    }

    /// Pretty JSON with two space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let font: BitFont = serde_json::from_str(json)?;
        if let Some(&ch) = font.characters.keys().find(|&&ch| !is_storable(ch)) {
            return Err(FontError::Parse(format!(
                "character {ch:?} outside printable ASCII"
            )));
        }
        Ok(font)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(FontError::InputUnreadable)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| FontError::OutputUnwritable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Glyphs whose rows differ in visible width.
    pub fn width_mismatches(&self) -> Vec<WidthMismatch> {
        self.characters
            .iter()
            .filter_map(|(&ch, rows)| {
                let widths: Vec<usize> = rows.iter().map(|r| visible_width(r)).collect();
                let first = *widths.first()?;
                widths
                    .iter()
                    .any(|&w| w != first)
                    .then_some(WidthMismatch { ch, widths })
            })
            .collect()
    }

    /// Renders `text` by placing glyphs side by side.
    ///
    /// Every glyph is padded to its widest row and to the tallest glyph used,
    /// so the returned rows line up.
    pub fn render(&self, text: &str) -> Result<Vec<String>> {
        let glyphs = text
            .chars()
            .map(|ch| self.glyph(ch).ok_or(FontError::UnknownChar(ch)))
            .collect::<Result<Vec<_>>>()?;
        let height = glyphs.iter().map(|g| g.len()).max().unwrap_or(0);
        let mut out = vec![String::new(); height];
        for glyph in glyphs {
            let width = glyph.iter().map(|r| visible_width(r)).max().unwrap_or(0);
            for (i, line) in out.iter_mut().enumerate() {
                let row = glyph.get(i).map(String::as_str).unwrap_or("");
                line.push_str(row);
                line.push_str(&" ".repeat(width - visible_width(row)));
            }
        }
        Ok(out)
    }
}
