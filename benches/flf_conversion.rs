//! Benchmark for converting a synthetic full-size FLF font.
//!
//! Builds a font with all 95 printable glyphs (plus a few extra blocks that
//! fall past `~`), then measures segmentation and assembly of the whole file.

use criterion::{criterion_group, criterion_main, Criterion};
use flf2bit::{convert_str, test_support::FlfBuilder, CharMap, ConvertOptions};
use std::hint::black_box;

const HEIGHT: usize = 8;

fn synthetic_font() -> String {
    let mut builder = FlfBuilder::new('$', HEIGHT)
        .comment("synthetic benchmark font")
        .comment("generated by flf2bit benches");
    for code in 0..100u32 {
        let marker = if code % 2 == 0 { '@' } else { '#' };
        let row = format!("$|{code:03}|$ ");
        let rows = vec![row.as_str(); HEIGHT];
        builder = builder.glyph(&rows, marker);
    }
    builder.build()
}

fn bench_convert(c: &mut Criterion) {
    let flf = synthetic_font();
    let plain = ConvertOptions::default();
    let mapped = ConvertOptions {
        char_map: [('|', '█'), ('0', 'O')].into_iter().collect::<CharMap>(),
        ..Default::default()
    };

    c.bench_function("convert_plain", |b| {
        b.iter(|| {
            let font = convert_str(black_box(&flf), &plain).expect("convert");
            black_box(font.glyph_count())
        })
    });

    c.bench_function("convert_char_map", |b| {
        b.iter(|| {
            let font = convert_str(black_box(&flf), &mapped).expect("convert");
            black_box(font.glyph_count())
        })
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
