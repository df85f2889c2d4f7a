//! Glyph block segmentation.
//!
//! Splits the line stream that follows the header and comments into glyph
//! blocks. FLF files disagree on their delimiters, so the line-end marker is
//! re-derived from the first line of every block: the last non-blank
//! character of that line. A single trailing marker continues the block, a
//! doubled one closes it.
use std::iter::Fuse;

use log::{trace, warn};

use crate::error::Result;

/// Raw stroke lines of one glyph, before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBlock {
    pub lines: Vec<String>,
}

impl GlyphBlock {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// How a single physical line relates to the block being read.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Decorative separator such as `@@@@`: one repeated character, no indent.
    PureDelimiter(char),
    /// Zero-length line.
    Empty,
    /// Ends with the doubled marker. `rest` holds glyph data packed after it.
    Closing {
        rows: Vec<&'a str>,
        rest: Option<&'a str>,
    },
    /// Ends with a single marker.
    Continuation(&'a str),
    /// Anything else, including whitespace-only lines.
    Unterminated,
}

fn trim_line(line: &str) -> &str {
    line.trim_end_matches([' ', '\t', '\r', '\n'])
}

/// The marker a block opened by `line` uses.
pub(crate) fn derive_marker(line: &str) -> Option<char> {
    trim_line(line).chars().next_back()
}

pub(crate) fn is_pure_delimiter(line: &str) -> Option<char> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if first.is_whitespace() || line.chars().count() < 2 {
        return None;
    }
    chars.all(|c| c == first).then_some(first)
}

pub(crate) fn classify(line: &str, marker: char) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Empty;
    }
    if let Some(c) = is_pure_delimiter(line) {
        return LineKind::PureDelimiter(c);
    }
    classify_terminator(line, marker)
}

/// Classifies `line` by its trailing markers alone.
///
/// Glyph data packed after a doubled marker is only recognized when the line
/// itself ends with a doubled marker; `a@@b@` is the single row `a@@b`.
pub(crate) fn classify_terminator(line: &str, marker: char) -> LineKind<'_> {
    let trimmed = trim_line(line);
    let double: String = [marker, marker].iter().collect();

    if trimmed.ends_with(double.as_str()) {
        let pos = trimmed.find(&double).unwrap_or(trimmed.len() - double.len());
        let after = &trimmed[pos + double.len()..];
        if after.chars().all(|c| c == marker) {
            let body = &trimmed[..trimmed.len() - double.len()];
            return LineKind::Closing {
                rows: body.split(marker).collect(),
                rest: None,
            };
        }
        return LineKind::Closing {
            rows: trimmed[..pos].split(marker).collect(),
            rest: Some(after),
        };
    }
    match trimmed.strip_suffix(marker) {
        Some(row) => LineKind::Continuation(row),
        None => LineKind::Unterminated,
    }
}

#[derive(Debug)]
enum State {
    SeekingBlockStart,
    AccumulatingBlock { marker: char, rows: Vec<String> },
    BlockComplete(Vec<String>),
    EndOfInput,
}

/// Iterator over the glyph blocks of an FLF body.
///
/// `height` is the declared glyph height; `Some(1)` switches to one glyph per
/// line, anything else uses terminator based segmentation.
pub struct Segmenter<I: Iterator<Item = Result<String>>> {
    lines: Fuse<I>,
    single_row: bool,
    state: State,
    pending: Option<String>,
}

impl<I: Iterator<Item = Result<String>>> Segmenter<I> {
    pub fn new(lines: I, height: Option<usize>) -> Self {
        Self {
            lines: lines.fuse(),
            single_row: height == Some(1),
            state: State::SeekingBlockStart,
            pending: None,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        self.lines.next().transpose()
    }

    fn advance(&mut self, state: State, line: Option<String>) -> State {
        let Some(line) = line else {
            return match state {
                State::AccumulatingBlock { rows, .. } if !rows.is_empty() => {
                    trace!("end of input inside a block, emitting {} rows", rows.len());
                    State::BlockComplete(rows)
                }
                _ => State::EndOfInput,
            };
        };

        match state {
            State::SeekingBlockStart => self.open_block(&line),
            State::AccumulatingBlock { marker, mut rows } => match classify(&line, marker) {
                // Inside a block a run of its own marker is a row, e.g. the
                // last row of a zero-width glyph.
                LineKind::PureDelimiter(c) if c == marker => {
                    if let LineKind::Closing { rows: tail, .. } =
                        classify_terminator(&line, marker)
                    {
                        rows.extend(tail.into_iter().map(str::to_string));
                    }
                    State::BlockComplete(rows)
                }
                LineKind::PureDelimiter(_) => State::AccumulatingBlock { marker, rows },
                LineKind::Empty if !rows.is_empty() => State::BlockComplete(rows),
                LineKind::Empty => State::AccumulatingBlock { marker, rows },
                LineKind::Closing { rows: tail, rest } => {
                    rows.extend(tail.into_iter().map(str::to_string));
                    self.stash(rest);
                    State::BlockComplete(rows)
                }
                LineKind::Continuation(row) => {
                    rows.push(row.to_string());
                    State::AccumulatingBlock { marker, rows }
                }
                LineKind::Unterminated => {
                    if !line.trim().is_empty() {
                        warn!("ignoring line without {marker:?} terminator: {line:?}");
                    }
                    State::AccumulatingBlock { marker, rows }
                }
            },
            State::BlockComplete(_) | State::EndOfInput => state,
        }
    }

    fn open_block(&mut self, line: &str) -> State {
        if is_pure_delimiter(line).is_some() {
            trace!("skipping separator {line:?}");
            return State::SeekingBlockStart;
        }
        let Some(marker) = derive_marker(line) else {
            return State::SeekingBlockStart;
        };
        let trimmed = trim_line(line);
        if self.single_row {
            let row = trimmed.strip_suffix(marker).unwrap_or(trimmed);
            return State::BlockComplete(vec![row.to_string()]);
        }
        match classify(line, marker) {
            LineKind::Closing { rows, rest } => {
                let rows = rows.into_iter().map(str::to_string).collect();
                self.stash(rest);
                State::BlockComplete(rows)
            }
            LineKind::Continuation(row) => State::AccumulatingBlock {
                marker,
                rows: vec![row.to_string()],
            },
            _ => State::SeekingBlockStart,
        }
    }

    fn stash(&mut self, rest: Option<&str>) {
        if let Some(rest) = rest {
            trace!("packed glyph data after terminator: {rest:?}");
            self.pending = Some(rest.to_string());
        }
    }
}

impl<I: Iterator<Item = Result<String>>> Iterator for Segmenter<I> {
    type Item = Result<GlyphBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, State::SeekingBlockStart) {
                State::BlockComplete(rows) => return Some(Ok(GlyphBlock::new(rows))),
                State::EndOfInput => {
                    self.state = State::EndOfInput;
                    return None;
                }
                state => {
                    let line = match self.next_line() {
                        Ok(line) => line,
                        Err(err) => {
                            self.state = State::EndOfInput;
                            return Some(Err(err));
                        }
                    };
                    self.state = self.advance(state, line);
                }
            }
        }
    }
}
