// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — parse existing documents with `lopdf` for structure and text,
// and rasterise pages with pdfium.
//
// lopdf handles everything that doesn't need a renderer: signature
// validation, page enumeration, per-page text extraction. Rasterisation goes
// through `pdfium-render`, which binds the pdfium C++ library at runtime.
// pdfium keeps thread-local state, so callers must run rendering on a
// blocking thread, one page at a time — the page loop here is strictly
// sequential by construction.

use image::DynamicImage;
use lopdf::Document;
use pagemill_core::PageImage;
use pagemill_core::error::{PagemillError, Result};
use pdfium_render::prelude::*;
use tracing::{debug, info, instrument, warn};

/// Reads and rasterises existing PDF files.
pub struct PdfReader {
    /// Upscaling factor applied when rasterising pages.
    render_scale: f32,
}

impl PdfReader {
    /// Create a reader with the given rasterisation scale factor.
    pub fn new(render_scale: f32) -> Self {
        Self { render_scale }
    }

    // -- Structure ------------------------------------------------------------

    /// Validate the PDF signature and return the number of pages.
    ///
    /// Malformed bytes and encrypted documents both fail here, before any
    /// per-page work starts.
    #[instrument(skip_all, fields(bytes_len = bytes.len()))]
    pub fn page_count(&self, bytes: &[u8]) -> Result<usize> {
        let document = load_document(bytes)?;
        let count = document.get_pages().len();
        debug!(pages = count, "PDF loaded");
        Ok(count)
    }

    // -- Text extraction ------------------------------------------------------

    /// Extract the text of every page, in page order.
    ///
    /// Each page's fragments are joined with single spaces in the order the
    /// library reports them, which for multi-column layouts may differ from
    /// visual reading order. A page that yields no text produces an empty
    /// string rather than failing the whole extraction.
    #[instrument(skip_all, fields(bytes_len = bytes.len()))]
    pub fn extract_page_texts(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let document = load_document(bytes)?;
        let pages = document.get_pages();

        let mut page_numbers: Vec<u32> = pages.keys().copied().collect();
        page_numbers.sort_unstable();

        let mut texts = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            let raw = match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(err) => {
                    warn!(page_number, %err, "page text extraction failed, treating as empty");
                    String::new()
                }
            };
            let joined = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            debug!(page_number, chars = joined.len(), "page text extracted");
            texts.push(joined);
        }

        info!(pages = texts.len(), "text extraction complete");
        Ok(texts)
    }

    // -- Rasterisation --------------------------------------------------------

    /// Render every page to a PNG bitmap at the configured scale, in page
    /// order, one page at a time.
    ///
    /// CPU-bound and not async-safe; run under `spawn_blocking`.
    #[instrument(skip_all, fields(bytes_len = bytes.len(), scale = self.render_scale))]
    pub fn render_pages(&self, bytes: &[u8]) -> Result<Vec<PageImage>> {
        let bindings = Pdfium::bind_to_system_library().map_err(|err| {
            PagemillError::Parse(format!("pdfium library unavailable: {err}"))
        })?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|err| parse_error_from_pdfium(&err))?;

        let pages = document.pages();
        let total = pages.len();
        info!(pages = total, "rasterising PDF");

        let render_config = PdfRenderConfig::new().scale_page_by_factor(self.render_scale);

        let mut results = Vec::with_capacity(total as usize);
        for (index, page) in pages.iter().enumerate() {
            let number = index as u32 + 1;

            // Each render must complete before the bitmap is read; the
            // drawing surface is not safe for concurrent use.
            let bitmap = page.render_with_config(&render_config).map_err(|err| {
                PagemillError::Parse(format!("failed to render page {number}: {err:?}"))
            })?;

            let image = bitmap.as_image();
            let png = encode_png(&image, number)?;

            debug!(
                number,
                width = image.width(),
                height = image.height(),
                "page rendered"
            );

            results.push(PageImage {
                number,
                width: image.width(),
                height: image.height(),
                png,
            });
        }

        Ok(results)
    }
}

// -- Helpers ------------------------------------------------------------------

/// Load a PDF from memory, rejecting encrypted documents up front.
fn load_document(bytes: &[u8]) -> Result<Document> {
    let document = Document::load_mem(bytes)
        .map_err(|err| PagemillError::Parse(format!("failed to load PDF: {err}")))?;

    if document.trailer.get(b"Encrypt").is_ok() {
        return Err(PagemillError::Parse(
            "document is password-protected".into(),
        ));
    }

    Ok(document)
}

/// Map a pdfium load failure onto the parse taxonomy, distinguishing
/// password-protected documents.
fn parse_error_from_pdfium(err: &PdfiumError) -> PagemillError {
    let detail = format!("{err:?}");
    if detail.contains("Password") || detail.contains("password") {
        PagemillError::Parse("document is password-protected".into())
    } else {
        PagemillError::Parse(format!("failed to load PDF: {detail}"))
    }
}

/// Encode a rendered page as PNG bytes.
fn encode_png(image: &DynamicImage, page_number: u32) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|err| {
            PagemillError::Parse(format!("PNG encoding failed for page {page_number}: {err}"))
        })?;
    Ok(buffer)
}

/// Build a small PDF with one page per entry of `page_texts`, each drawing its
/// text in Helvetica. Shared fixture for reader and converter tests.
#[cfg(test)]
pub(crate) fn test_pdf(page_texts: &[&str]) -> Vec<u8> {
    use lopdf::dictionary;
    use lopdf::{Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in page_texts {
        let content = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
        test_pdf(page_texts)
    }

    #[test]
    fn page_count_matches_document() {
        let bytes = build_pdf(&["one", "two", "three"]);
        let reader = PdfReader::new(2.0);
        assert_eq!(reader.page_count(&bytes).unwrap(), 3);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let reader = PdfReader::new(2.0);
        let err = reader.page_count(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PagemillError::Parse(_)));
    }

    #[test]
    fn extraction_returns_one_entry_per_page_in_order() {
        let bytes = build_pdf(&["alpha", "beta"]);
        let reader = PdfReader::new(2.0);
        let texts = reader.extract_page_texts(&bytes).unwrap();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("alpha"));
        assert!(texts[1].contains("beta"));
    }

    #[test]
    fn fragments_are_joined_with_single_spaces() {
        let bytes = build_pdf(&["spaced   out   words"]);
        let reader = PdfReader::new(2.0);
        let texts = reader.extract_page_texts(&bytes).unwrap();
        assert!(!texts[0].contains("  "), "runs of whitespace survived: {:?}", texts[0]);
    }

    #[test]
    fn encrypted_document_is_rejected() {
        let mut bytes = build_pdf(&["secret"]);
        // Re-open and mark the trailer as encrypted.
        let mut doc = Document::load_mem(&bytes).unwrap();
        let enc_id = doc.add_object(dictionary! { "Filter" => "Standard" });
        doc.trailer.set("Encrypt", enc_id);
        bytes.clear();
        doc.save_to(&mut bytes).unwrap();

        let reader = PdfReader::new(2.0);
        // Depending on how far lopdf gets, this fails either at load time or
        // at the explicit trailer check; both are parse errors.
        let err = reader.page_count(&bytes).unwrap_err();
        assert!(matches!(err, PagemillError::Parse(_)));
    }

    #[test]
    #[ignore = "requires the pdfium system library"]
    fn rendering_produces_one_png_per_page() {
        let bytes = build_pdf(&["first", "second"]);
        let reader = PdfReader::new(2.0);
        let pages = reader.render_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].number, 2);
        assert!(pages[0].png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
