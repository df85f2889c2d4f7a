//! FLF -> BIT conversion.
//!
//! Reads the header and comment lines, segments the remaining lines into
//! glyph blocks and assigns them to ASCII code points in file order.
use std::collections::HashSet;
use std::io::{BufRead, Cursor};
use std::path::Path;

use log::debug;

use crate::{
    error::{FontError, Result},
    font::{BitFont, DEFAULT_AUTHOR, DEFAULT_LICENSE, DEFAULT_NAME, FIRST_CHAR, LAST_CHAR},
    header::Header,
    normalize::{normalize_block, CharMap},
    segment::{GlyphBlock, Segmenter},
    source::LineSource,
};

/// Which glyphs are reported to the [`GlyphObserver`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugSelection {
    pub enabled: bool,
    /// Characters to report; empty means all of them.
    pub chars: HashSet<char>,
}

impl DebugSelection {
    pub fn all() -> Self {
        Self {
            enabled: true,
            chars: HashSet::new(),
        }
    }

    pub fn only(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            enabled: true,
            chars: chars.into_iter().collect(),
        }
    }

    pub fn selects(&self, ch: char) -> bool {
        self.enabled && (self.chars.is_empty() || self.chars.contains(&ch))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Font name; `None` or empty derives it from the header.
    pub name: Option<String>,
    /// Author; `None` or empty derives it from the comments.
    pub author: Option<String>,
    pub license: Option<String>,
    pub char_map: CharMap,
    pub debug: DebugSelection,
    /// Glyph height; `None` uses the header's declared height.
    pub height: Option<usize>,
}

/// One glyph as seen by the assembler, before and after normalization.
#[derive(Debug)]
pub struct GlyphReport<'a> {
    pub ch: char,
    pub code_point: u32,
    pub raw: &'a [String],
    pub normalized: &'a [String],
}

/// Receives reports for the glyphs selected by [`DebugSelection`].
pub trait GlyphObserver {
    fn glyph(&mut self, report: &GlyphReport<'_>);
}

/// Observer forwarding reports to the `log` facade.
#[derive(Default)]
pub struct LogObserver;

impl GlyphObserver for LogObserver {
    fn glyph(&mut self, report: &GlyphReport<'_>) {
        debug!(
            "character {:?} (ASCII {}): {:?} -> {:?}",
            report.ch, report.code_point, report.raw, report.normalized
        );
    }
}

/// Assigns code points to blocks in the order they arrive.
///
/// The sequence index advances once per block whether or not the block ends
/// up in the font, so a missing glyph shifts everything after it instead of
/// being compacted away.
pub struct FontAssembler<'a, O: GlyphObserver + ?Sized> {
    font: BitFont,
    hardblank: char,
    char_map: &'a CharMap,
    debug: &'a DebugSelection,
    observer: &'a mut O,
    next_index: usize,
}

impl<'a, O: GlyphObserver + ?Sized> FontAssembler<'a, O> {
    pub fn new(
        font: BitFont,
        hardblank: char,
        options: &'a ConvertOptions,
        observer: &'a mut O,
    ) -> Self {
        Self {
            font,
            hardblank,
            char_map: &options.char_map,
            debug: &options.debug,
            observer,
            next_index: 0,
        }
    }

    /// Number of blocks consumed so far.
    pub fn sequence_index(&self) -> usize {
        self.next_index
    }

    /// Normalizes `block` and stores it under `32 + index`. Returns the
    /// character it was stored under, if any.
    pub fn push(&mut self, block: GlyphBlock) -> Option<char> {
        let index = self.next_index;
        self.next_index += 1;

        if block.is_empty() {
            debug!("discarding empty block #{index}");
            return None;
        }
        let code_point = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(FIRST_CHAR))
            .filter(|cp| *cp <= LAST_CHAR)?;
        let ch = char::from_u32(code_point)?;

        let rows = normalize_block(&block, self.hardblank, self.char_map);
        if self.debug.selects(ch) {
            self.observer.glyph(&GlyphReport {
                ch,
                code_point,
                raw: &block.lines,
                normalized: &rows,
            });
        }
        self.font.insert(ch, rows);
        Some(ch)
    }

    pub fn finish(self) -> BitFont {
        self.font
    }
}

/// Name, author and license, from the options or sniffed from the file.
fn resolve_metadata(options: &ConvertOptions, header: &Header, comments: &[String]) -> BitFont {
    fn given(value: &Option<String>) -> Option<String> {
        value.as_ref().filter(|s| !s.is_empty()).cloned()
    }
    let name = given(&options.name)
        .or_else(|| header.quoted_name().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let author = given(&options.author)
        .or_else(|| comments.iter().find(|line| line.contains("by")).cloned())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
    let license = given(&options.license).unwrap_or_else(|| DEFAULT_LICENSE.to_string());
    BitFont::new(name, author, license)
}

/// Header and comment lines of an FLF file.
#[derive(Debug)]
pub struct Preamble {
    pub header: Header,
    pub comments: Vec<String>,
}

fn read_preamble<R: BufRead>(source: &mut LineSource<R>) -> Result<Preamble> {
    let header_line = source
        .next_line()?
        .ok_or_else(|| FontError::InvalidHeader("missing header line".into()))?;
    let header = Header::parse(&header_line)?;
    debug!(
        "header: hardblank {:?}, height {:?}, {} comment lines",
        header.hardblank(),
        header.height(),
        header.comment_lines()
    );

    let expected = header.comment_lines();
    let mut comments = Vec::with_capacity(expected);
    while comments.len() < expected {
        match source.next_line()? {
            Some(line) => comments.push(line),
            None => {
                return Err(FontError::TruncatedComments {
                    expected,
                    found: comments.len(),
                })
            }
        }
    }
    Ok(Preamble { header, comments })
}

/// Converts the FLF data in `source`.
pub fn convert<R: BufRead>(
    mut source: LineSource<R>,
    options: &ConvertOptions,
    observer: &mut dyn GlyphObserver,
) -> Result<BitFont> {
    let Preamble { header, comments } = read_preamble(&mut source)?;
    let font = resolve_metadata(options, &header, &comments);
    let height = options.height.or(header.height());
    debug!(
        "glyph data starts after line {}, height {height:?}",
        source.line_no()
    );

    let mut assembler = FontAssembler::new(font, header.hardblank(), options, observer);
    for block in Segmenter::new(source, height) {
        assembler.push(block?);
    }
    debug!("{} blocks read", assembler.sequence_index());
    Ok(assembler.finish())
}

pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<BitFont> {
    convert(LineSource::open(path)?, options, &mut LogObserver)
}

pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> Result<BitFont> {
    convert(LineSource::from_bytes(bytes.to_vec())?, options, &mut LogObserver)
}

pub fn convert_str(content: &str, options: &ConvertOptions) -> Result<BitFont> {
    convert(
        LineSource::new(Cursor::new(content.as_bytes())),
        options,
        &mut LogObserver,
    )
}

/// Reads only the header and comments of an FLF file.
pub fn read_header(path: &Path) -> Result<Preamble> {
    read_preamble(&mut LineSource::open(path)?)
}

impl Preamble {
    /// Metadata the conversion would produce with `options`.
    pub fn metadata(&self, options: &ConvertOptions) -> BitFont {
        resolve_metadata(options, &self.header, &self.comments)
    }
}
