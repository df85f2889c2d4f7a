//! Line source feeding the converter.
//!
//! Yields one decoded text line at a time. Plain `.flf` files are read
//! straight from disk; zipped fonts are unpacked in memory first.
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
#[cfg(feature = "zip")]
use std::io::Read;
use std::path::Path;

use crate::error::{FontError, Result};

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    /// Number of lines handed out so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads the next line without its terminator. `Ok(None)` signals end of input.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(FontError::InputUnreadable)?;
        if n == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        self.line_no += 1;
        Ok(Some(decode_line(&self.buf)))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

impl LineSource<Cursor<Vec<u8>>> {
    /// Builds a source over in-memory font data, unpacking zipped fonts.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.starts_with(GZIP_MAGIC) {
            return Err(FontError::Parse(
                "gzip compressed .flf not supported; provide .flf or zipped archive".into(),
            ));
        }
        if bytes.starts_with(ZIP_MAGIC) {
            return Ok(Self::new(Cursor::new(unzip_flf(bytes)?)));
        }
        Ok(Self::new(Cursor::new(bytes)))
    }
}

impl LineSource<Box<dyn BufRead>> {
    /// Opens a font file, sniffing the first bytes for archive signatures.
    pub fn open(path: &Path) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path).map_err(FontError::InputUnreadable)?);
        let head = reader.fill_buf().map_err(FontError::InputUnreadable)?;
        if head.starts_with(GZIP_MAGIC) || head.starts_with(ZIP_MAGIC) {
            let bytes = std::fs::read(path).map_err(FontError::InputUnreadable)?;
            let LineSource { reader, .. } = LineSource::from_bytes(bytes)?;
            return Ok(Self::new(Box::new(reader)));
        }
        Ok(Self::new(Box::new(reader)))
    }
}

/// UTF-8 when valid, otherwise one char per byte (ISO-8859-1).
fn decode_line(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(feature = "zip")]
fn unzip_flf(bytes: Vec<u8>) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| FontError::Parse(format!("zip open error: {e}")))?;
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| FontError::Parse(format!("zip entry error: {e}")))?;
        if file.name().ends_with(".flf") {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .map_err(|e| FontError::Parse(format!("zip read flf error: {e}")))?;
            return Ok(buf);
        }
    }
    Err(FontError::Parse("zip archive contained no .flf".into()))
}

#[cfg(not(feature = "zip"))]
fn unzip_flf(_bytes: Vec<u8>) -> Result<Vec<u8>> {
    Err(FontError::Parse(
        "zipped .flf requires the `zip` feature".into(),
    ))
}
