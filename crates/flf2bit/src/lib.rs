//! flf2bit: FIGlet (.flf) font to JSON bitmap (.bit) font conversion.
//!
//! The conversion is a single pass over the input lines: the header is
//! interpreted once, comment lines are skipped, and the remaining lines are
//! segmented into glyph blocks that map to ASCII 32..=126 in file order.

pub mod convert;
mod error;
mod font;
mod header;
mod normalize;
mod segment;
mod source;

pub use convert::{
    convert, convert_bytes, convert_file, convert_str, read_header, ConvertOptions,
    DebugSelection, FontAssembler, GlyphObserver, GlyphReport, LogObserver, Preamble,
};
pub use error::{FontError, Result};
pub use font::{
    visible_width, BitFont, WidthMismatch, DEFAULT_AUTHOR, DEFAULT_LICENSE, DEFAULT_NAME,
};
pub use header::Header;
pub use normalize::{normalize_block, normalize_line, CharMap};
pub use segment::{GlyphBlock, Segmenter};
pub use source::LineSource;

// Test utilities
pub mod test_support;
