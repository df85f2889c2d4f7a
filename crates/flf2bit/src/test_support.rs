//! Test support utilities for flf2bit.
//!
//! Helpers for building FLF input and capturing debug reports in tests. They
//! are not part of the conversion API.

use crate::{GlyphObserver, GlyphReport};

/// Owned copy of a [`GlyphReport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedGlyph {
    pub ch: char,
    pub code_point: u32,
    pub raw: Vec<String>,
    pub normalized: Vec<String>,
}

/// An observer that keeps every report it receives.
#[derive(Default)]
pub struct RecordingObserver {
    pub reports: Vec<RecordedGlyph>,
}

impl GlyphObserver for RecordingObserver {
    fn glyph(&mut self, report: &GlyphReport<'_>) {
        self.reports.push(RecordedGlyph {
            ch: report.ch,
            code_point: report.code_point,
            raw: report.raw.to_vec(),
            normalized: report.normalized.to_vec(),
        });
    }
}

/// Builds FLF text: a header, comment lines and glyph rows.
///
/// Each glyph's rows get `marker` appended, the last row gets it twice.
pub struct FlfBuilder {
    hardblank: char,
    height: usize,
    comments: Vec<String>,
    body: Vec<String>,
}

impl FlfBuilder {
    pub fn new(hardblank: char, height: usize) -> Self {
        Self {
            hardblank,
            height,
            comments: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn comment(mut self, line: &str) -> Self {
        self.comments.push(line.to_string());
        self
    }

    pub fn glyph(mut self, rows: &[&str], marker: char) -> Self {
        for (i, row) in rows.iter().enumerate() {
            let mut line = row.to_string();
            line.push(marker);
            if i + 1 == rows.len() {
                line.push(marker);
            }
            self.body.push(line);
        }
        self
    }

    /// Appends a raw line to the glyph section.
    pub fn line(mut self, line: &str) -> Self {
        self.body.push(line.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut out = format!(
            "flf2a{} {} {} 20 15 {}\n",
            self.hardblank,
            self.height,
            self.height.saturating_sub(1),
            self.comments.len()
        );
        for line in self.comments.iter().chain(&self.body) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
