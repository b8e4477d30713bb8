// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pagemill-convert layout hot paths: text
// pagination and image placement, both on synthetic inputs.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use pagemill_core::PaperSize;
use pagemill_convert::PdfWriter;

/// Benchmark text → PDF layout on a few thousand words.
///
/// Wrapping plus op-list construction dominate; printpdf serialisation is a
/// fixed tail. The input repeats a prose-shaped sentence so line lengths vary
/// the way real documents do.
fn bench_text_to_pdf(c: &mut Criterion) {
    let sentence = "The quick brown fox jumps over the lazy dog while the band plays on. ";
    let text = sentence.repeat(400);

    let writer = PdfWriter::new(PaperSize::A4);
    c.bench_function("text_to_pdf (28k chars)", |b| {
        b.iter(|| {
            let bytes = writer.text_to_pdf(black_box(&text)).unwrap();
            black_box(bytes);
        });
    });
}

/// Benchmark image → PDF on a 640x480 synthetic RGB image.
fn bench_image_to_pdf(c: &mut Criterion) {
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(640, 480, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }));

    let writer = PdfWriter::new(PaperSize::A4);
    c.bench_function("image_to_pdf (640x480)", |b| {
        b.iter(|| {
            let bytes = writer.image_to_pdf(black_box(&image)).unwrap();
            black_box(bytes);
        });
    });
}

criterion_group!(benches, bench_text_to_pdf, bench_image_to_pdf);
criterion_main!(benches);
