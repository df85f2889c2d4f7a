use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flf2bit::{convert, read_header, BitFont, CharMap, ConvertOptions, DebugSelection, LineSource};
use std::path::PathBuf;

use crate::console::{print_render, print_width_report, ConsoleObserver};
mod console;

#[derive(Parser)]
#[command(name = "flf2bit", version, about = "FIGlet (.flf) to bitmap (.bit) font converter")]
struct Cli {
    /// Log conversion details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Convert a FIGlet font to a .bit font
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Font name (default: quoted name in the header)
        #[arg(long)]
        name: Option<String>,
        /// Author (default: first comment line mentioning "by")
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        license: Option<String>,
        /// Map the first character to the second, e.g. "#█" (repeatable)
        #[arg(long = "map-chars", value_name = "PAIR", value_parser = parse_char_pair)]
        map_chars: Vec<(char, char)>,
        /// Print raw and converted rows for all glyphs, or only for CHARS
        #[arg(long, value_name = "CHARS", num_args = 0..=1, require_equals = true, default_missing_value = "")]
        debug: Option<String>,
        /// Glyph height (default: taken from the header; 1 = one glyph per line)
        #[arg(long)]
        height: Option<usize>,
    },
    /// Show header facts of a FIGlet font
    Inspect { font: PathBuf },
    /// Verify every glyph of .bit fonts has rows of equal width
    Check {
        #[arg(required = true)]
        fonts: Vec<PathBuf>,
    },
    /// Render text with a .bit font
    Render { font: PathBuf, text: String },
}

fn parse_char_pair(s: &str) -> std::result::Result<(char, char), String> {
    CharMap::parse_pair(s).ok_or_else(|| format!("expected two characters, got {s:?}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Cmd::Convert {
            input,
            output,
            name,
            author,
            license,
            map_chars,
            debug,
            height,
        } => {
            let options = ConvertOptions {
                name,
                author,
                license,
                char_map: map_chars.into_iter().collect(),
                debug: match debug {
                    Some(chars) => DebugSelection::only(chars.chars()),
                    None => DebugSelection::default(),
                },
                height,
            };
            let source = LineSource::open(&input)
                .with_context(|| format!("opening {}", input.display()))?;
            let font = convert(source, &options, &mut ConsoleObserver)
                .with_context(|| format!("converting {}", input.display()))?;
            font.save(&output)?;
            log::info!("{} glyphs written to {}", font.glyph_count(), output.display());
            println!(
                "Successfully converted {} to {}",
                input.display(),
                output.display()
            );
        }
        Cmd::Inspect { font } => {
            let preamble =
                read_header(&font).with_context(|| format!("reading {}", font.display()))?;
            let meta = preamble.metadata(&ConvertOptions::default());
            let converted = flf2bit::convert_file(&font, &ConvertOptions::default())?;
            let header = &preamble.header;
            println!("FIGlet font: {}", meta.name);
            println!("  Author: {}", meta.author);
            println!("  Hardblank: {:?}", header.hardblank());
            match header.height() {
                Some(h) => println!("  Height: {h}"),
                None => println!("  Height: unknown"),
            }
            println!("  Comment lines: {}", header.comment_lines());
            println!("  Converted characters: {}", converted.glyph_count());
        }
        Cmd::Check { fonts } => {
            let mut failed = Vec::new();
            for path in &fonts {
                let font =
                    BitFont::load(path).with_context(|| format!("loading {}", path.display()))?;
                let mismatches = font.width_mismatches();
                print_width_report(path, &font, &mismatches);
                if !mismatches.is_empty() {
                    failed.push(path.display().to_string());
                }
            }
            if !failed.is_empty() {
                bail!(
                    "{} fonts have inconsistent widths: {}",
                    failed.len(),
                    failed.join(", ")
                );
            }
            println!("All fonts have consistent character widths");
        }
        Cmd::Render { font, text } => {
            let font =
                BitFont::load(&font).with_context(|| format!("loading {}", font.display()))?;
            print_render(&font.render(&text)?);
        }
    }
    Ok(())
}
