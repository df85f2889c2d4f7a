use flf2bit::{visible_width, BitFont, GlyphObserver, GlyphReport, WidthMismatch};
use std::path::Path;

/// Prints the before/after rows of selected glyphs to stdout.
pub struct ConsoleObserver;

impl GlyphObserver for ConsoleObserver {
    fn glyph(&mut self, report: &GlyphReport<'_>) {
        println!(
            "Processing character '{}' (ASCII {})",
            report.ch, report.code_point
        );
        println!("FLF input:");
        for line in report.raw {
            println!("  {line:?}");
        }
        println!("BIT output:");
        for line in report.normalized {
            println!("  {line:?}");
        }
        println!();
    }
}

const MAX_REPORTED: usize = 5;

pub fn print_width_report(path: &Path, font: &BitFont, mismatches: &[WidthMismatch]) {
    println!("Checking {}...", path.display());
    if mismatches.is_empty() {
        println!(
            "  OK: all {} characters have consistent widths",
            font.glyph_count()
        );
        return;
    }
    println!(
        "  Found {} characters with inconsistent widths:",
        mismatches.len()
    );
    for m in mismatches.iter().take(MAX_REPORTED) {
        println!(
            "    - '{}' (ASCII {}): widths {:?}",
            m.ch, m.ch as u32, m.widths
        );
        for (i, row) in font.glyph(m.ch).unwrap_or_default().iter().enumerate() {
            println!("      Row {i}: {row:?} (width {})", visible_width(row));
        }
    }
    if mismatches.len() > MAX_REPORTED {
        println!("    ... and {} more", mismatches.len() - MAX_REPORTED);
    }
}

pub fn print_render(rows: &[String]) {
    for row in rows {
        println!("{row}");
    }
}
