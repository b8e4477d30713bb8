// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — create new PDF documents from text or images using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use image::DynamicImage;
use pagemill_core::PaperSize;
use pagemill_core::error::{PagemillError, Result};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Margin around an embedded image, each side.
const IMAGE_MARGIN_MM: f32 = 10.0;
/// Margin around text content, each side.
const TEXT_MARGIN_MM: f32 = 20.0;
/// Body text size.
const FONT_SIZE_PT: f32 = 12.0;
/// Vertical distance between successive baselines.
const LINE_PITCH_MM: f32 = 7.0;
/// Nominal resolution for placed images.
const IMAGE_DPI: f32 = 150.0;

/// Creates new PDF documents from text content or raster images.
pub struct PdfWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Text to PDF ----------------------------------------------------------

    /// Create a PDF from plain text content.
    ///
    /// The text is word-wrapped to the printable width and laid out
    /// top-to-bottom in Helvetica at a fixed size. When the next line would
    /// cross the bottom margin a new page starts and the cursor resets to the
    /// top margin. Words are never split: an oversized word gets a line of
    /// its own.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn text_to_pdf(&self, text: &str) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Pagemill Document");

        info!(paper = ?self.paper_size, title, "creating text PDF");

        let margin_pt: f32 = Mm(TEXT_MARGIN_MM).into_pt().0;
        let usable_width_mm = page_w.0 - 2.0 * TEXT_MARGIN_MM;

        // Approximate characters per line for Helvetica at the body size.
        // Average glyph width is roughly 0.50 * font_size in pt; 1pt = 0.3528mm.
        let avg_char_width_mm: f32 = 0.50 * FONT_SIZE_PT * 0.3528;
        let max_chars_per_line = (usable_width_mm / avg_char_width_mm) as usize;

        let wrapped_lines = wrap_text(text, max_chars_per_line);
        let page_h_pt = page_h.into_pt().0;
        let line_pitch_pt = Mm(LINE_PITCH_MM).into_pt().0;
        let usable_height_pt = page_h_pt - 2.0 * margin_pt;
        let lines_per_page = (usable_height_pt / line_pitch_pt) as usize;

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::new();

        // Emit lines in chunks of `lines_per_page`.
        let mut line_iter = wrapped_lines.iter().peekable();
        while line_iter.peek().is_some() {
            let mut ops: Vec<Op> = Vec::new();

            let mut line_idx: usize = 0;
            while line_idx < lines_per_page {
                let line = match line_iter.next() {
                    Some(l) => l,
                    None => break,
                };

                // Baseline positions run downward from the top margin.
                let y_pt = page_h_pt - margin_pt - (line_idx as f32 * line_pitch_pt);

                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(margin_pt),
                        y: Pt(y_pt),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(FONT_SIZE_PT),
                    font: BuiltinFont::Helvetica,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(line.clone())],
                    font: BuiltinFont::Helvetica,
                });
                ops.push(Op::EndTextSection);

                line_idx += 1;
            }

            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        // If there were no lines at all, add a single blank page.
        if pages.is_empty() {
            pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        doc.with_pages(pages);

        debug!(
            total_lines = wrapped_lines.len(),
            pages = doc.pages.len(),
            "text layout complete"
        );

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        Ok(output)
    }

    // -- Image to PDF ---------------------------------------------------------

    /// Create a single-page PDF containing the given image.
    ///
    /// The image fills the printable area along its constrained axis and is
    /// centred on the page, preserving aspect ratio.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn image_to_pdf(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Pagemill Image");

        info!(paper = ?self.paper_size, title, "creating image PDF");

        let img_width = image.width();
        let img_height = image.height();
        if img_width == 0 || img_height == 0 {
            return Err(PagemillError::PdfCreate("image has zero size".into()));
        }

        // Convert to RGB8 for printpdf.
        let rgb_image = image.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: img_width as usize,
            height: img_height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        let placed = fit_to_page(img_width, img_height, page_w.0, page_h.0, IMAGE_MARGIN_MM);

        // The image's native size at the nominal DPI determines the transform
        // scale needed to reach the placed size.
        let img_w_pt = img_width as f32 / IMAGE_DPI * 72.0;
        let scale = Mm(placed.width_mm).into_pt().0 / img_w_pt;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Mm(placed.x_mm).into_pt()),
                translate_y: Some(Mm(placed.y_mm).into_pt()),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                rotate: None,
            },
        }];

        let page = PdfPage::new(page_w, page_h, ops);
        doc.with_pages(vec![page]);

        debug!(
            width_mm = placed.width_mm,
            height_mm = placed.height_mm,
            scale,
            "image placed on page"
        );

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        Ok(output)
    }
}

// -- Image placement ----------------------------------------------------------

/// Where an image lands on the page, in millimetres from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlacedImage {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Scale an image to fit within the page margins, preserving aspect ratio,
/// and centre it.
///
/// Whether the width or the height fills the printable area depends on how
/// the image's aspect ratio compares to the page's: images wider than the
/// page shape are width-constrained, the rest height-constrained. The result
/// is clamped so it never crosses a margin even when the two ratios are
/// nearly equal.
pub(crate) fn fit_to_page(
    img_w_px: u32,
    img_h_px: u32,
    page_w_mm: f32,
    page_h_mm: f32,
    margin_mm: f32,
) -> PlacedImage {
    let avail_w = page_w_mm - 2.0 * margin_mm;
    let avail_h = page_h_mm - 2.0 * margin_mm;
    let img_ratio = img_w_px as f32 / img_h_px as f32;
    let page_ratio = page_w_mm / page_h_mm;

    let (mut width_mm, mut height_mm) = if img_ratio > page_ratio {
        (avail_w, avail_w / img_ratio)
    } else {
        (avail_h * img_ratio, avail_h)
    };

    if height_mm > avail_h {
        height_mm = avail_h;
        width_mm = avail_h * img_ratio;
    }
    if width_mm > avail_w {
        width_mm = avail_w;
        height_mm = avail_w / img_ratio;
    }

    PlacedImage {
        x_mm: (page_w_mm - width_mm) / 2.0,
        y_mm: (page_h_mm - height_mm) / 2.0,
        width_mm,
        height_mm,
    }
}

// -- Text wrapping ------------------------------------------------------------

/// Wrap a multi-line string so that no line exceeds `max_width` characters,
/// breaking only between words.
///
/// Splits on existing newlines first, then word-wraps within each paragraph.
/// A word longer than `max_width` gets a line of its own rather than being
/// split mid-word.
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::with_capacity(max_width);

        for word in words {
            if current_line.is_empty() {
                current_line.push_str(word);
            } else if current_line.len() + 1 + word.len() <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push(current_line.clone());
                current_line.clear();
                current_line.push_str(word);
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- wrap_text ------------------------------------------------------------

    #[test]
    fn wrapping_preserves_every_word_in_order() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let lines = wrap_text(text, 16);

        for line in &lines {
            assert!(line.len() <= 16, "line too long: {line:?}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(),
                   text.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn oversized_word_is_never_split() {
        let lines = wrap_text("a Donaudampfschifffahrtsgesellschaft b", 10);
        assert!(lines.contains(&"Donaudampfschifffahrtsgesellschaft".to_string()));
    }

    #[test]
    fn newlines_start_fresh_lines() {
        let lines = wrap_text("one\ntwo three", 20);
        assert_eq!(lines, vec!["one", "two three"]);
    }

    #[test]
    fn blank_paragraphs_survive() {
        let lines = wrap_text("a\n\nb", 20);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    // -- fit_to_page ----------------------------------------------------------

    #[test]
    fn wide_image_is_width_constrained_on_a4() {
        // 4000x3000: ratio 1.33 against A4 portrait's 0.71.
        let placed = fit_to_page(4000, 3000, 210.0, 297.0, 10.0);
        assert!((placed.width_mm - 190.0).abs() < 0.01);
        assert!((placed.height_mm - 190.0 / (4000.0 / 3000.0)).abs() < 0.01);
    }

    #[test]
    fn tall_image_is_height_constrained_on_a4() {
        let placed = fit_to_page(1000, 3000, 210.0, 297.0, 10.0);
        assert!((placed.height_mm - 277.0).abs() < 0.01);
        assert!((placed.width_mm - 277.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn placement_is_centred() {
        let placed = fit_to_page(4000, 3000, 210.0, 297.0, 10.0);
        assert!((placed.x_mm - (210.0 - placed.width_mm) / 2.0).abs() < 0.01);
        assert!((placed.y_mm - (297.0 - placed.height_mm) / 2.0).abs() < 0.01);
    }

    #[test]
    fn placement_never_crosses_a_margin() {
        // Ratios close enough that the naive branch would overshoot the
        // vertical margin on a landscape page.
        let placed = fit_to_page(1510, 1000, 300.0, 200.0, 10.0);
        assert!(placed.width_mm <= 280.0 + 0.01);
        assert!(placed.height_mm <= 180.0 + 0.01);
        assert!(placed.x_mm >= 10.0 - 0.01);
        assert!(placed.y_mm >= 10.0 - 0.01);
    }

    // -- document output ------------------------------------------------------

    #[test]
    fn text_pdf_has_pdf_signature() {
        let writer = PdfWriter::a4();
        let bytes = writer.text_to_pdf("hello world").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_text_paginates() {
        // A4 with 20mm margins and 7mm pitch fits 36 lines; one word per line
        // forces a second page at line 37.
        let word = "x".repeat(60);
        let text = vec![word; 37].join("\n");

        let writer = PdfWriter::a4();
        let bytes = writer.text_to_pdf(&text).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn image_pdf_is_a_single_page() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            40,
            30,
            image::Rgb([10, 20, 30]),
        ));
        let writer = PdfWriter::a4();
        let bytes = writer.image_to_pdf(&img).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
