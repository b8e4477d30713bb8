// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion facade — the four tools, from accepted upload to named artifact.
//
// The writer and reader collaborators are injected at construction; nothing
// here reaches for globals, so tests can build a Converter around whatever
// paper size and scale they need.

use chrono::Utc;
use pagemill_core::config::AppConfig;
use pagemill_core::error::{PagemillError, Result};
use pagemill_core::{ExtractedText, GeneratedArtifact, PageImage, ToolKind, UploadedFile};
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use crate::decode;
use crate::pdf::reader::PdfReader;
use crate::pdf::writer::PdfWriter;

/// Shown in place of extracted text when a document yields no fragments at all.
pub const SCANNED_PLACEHOLDER: &str =
    "No text found in this PDF file. The PDF may contain only images or scanned content.";

/// Orchestrates the four conversions.
pub struct Converter {
    writer: PdfWriter,
    reader: PdfReader,
}

impl Converter {
    /// Build a converter around explicit writer and reader collaborators.
    pub fn new(writer: PdfWriter, reader: PdfReader) -> Self {
        Self { writer, reader }
    }

    /// Build a converter from application settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            PdfWriter::new(config.paper_size),
            PdfReader::new(config.render_scale),
        )
    }

    // -- Image → document -----------------------------------------------------

    /// Convert an accepted image upload into a single-page PDF artifact.
    #[instrument(skip(self, file), fields(name = %file.name))]
    pub fn photo_to_pdf(&self, file: &UploadedFile) -> Result<GeneratedArtifact> {
        let image = decode::decode_image(file)?;
        let bytes = self.writer.image_to_pdf(&image)?;

        let artifact = GeneratedArtifact {
            bytes,
            filename: timestamped_filename(ToolKind::PhotoToPdf.artifact_prefix(), "pdf"),
            media_type: "application/pdf",
        };
        info!(output = %artifact.filename, bytes = artifact.bytes.len(), "photo converted");
        Ok(artifact)
    }

    // -- Text → document ------------------------------------------------------

    /// Convert text (typed, pasted, or decoded from an upload) into a PDF
    /// artifact. Empty input is rejected rather than producing a blank page.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub fn text_to_pdf(&self, text: &str) -> Result<GeneratedArtifact> {
        if text.trim().is_empty() {
            return Err(PagemillError::EmptyContent(
                "Please enter some text to convert.".into(),
            ));
        }

        let bytes = self.writer.text_to_pdf(text)?;
        let artifact = GeneratedArtifact {
            bytes,
            filename: timestamped_filename(ToolKind::TextToPdf.artifact_prefix(), "pdf"),
            media_type: "application/pdf",
        };
        info!(output = %artifact.filename, bytes = artifact.bytes.len(), "text converted");
        Ok(artifact)
    }

    // -- Document → images ----------------------------------------------------

    /// Rasterise every page of an accepted PDF upload, in page order.
    #[instrument(skip(self, file), fields(name = %file.name))]
    pub fn pdf_to_images(&self, file: &UploadedFile) -> Result<Vec<PageImage>> {
        let pages = self.reader.render_pages(&file.bytes)?;
        info!(pages = pages.len(), "PDF rasterised");
        Ok(pages)
    }

    // -- Document → text ------------------------------------------------------

    /// Extract the text of an accepted PDF upload, page-marked.
    ///
    /// Pages are prefixed with `--- Page N ---` and joined with blank lines.
    /// A document with no text at all gets the scanned-content placeholder.
    #[instrument(skip(self, file), fields(name = %file.name))]
    pub fn pdf_to_text(&self, file: &UploadedFile) -> Result<ExtractedText> {
        let page_texts = self.reader.extract_page_texts(&file.bytes)?;
        let page_count = page_texts.len();
        let has_text = page_texts.iter().any(|text| !text.trim().is_empty());

        let content = if has_text {
            page_texts
                .iter()
                .enumerate()
                .map(|(index, text)| format!("--- Page {} ---\n{}", index + 1, text))
                .collect::<Vec<_>>()
                .join("\n\n")
        } else {
            SCANNED_PLACEHOLDER.to_string()
        };

        info!(page_count, has_text, "text extracted");
        Ok(ExtractedText {
            page_count,
            content,
            has_text,
        })
    }

    /// Package an extraction as a downloadable plain-text artifact.
    pub fn extraction_artifact(&self, extraction: &ExtractedText) -> GeneratedArtifact {
        GeneratedArtifact {
            bytes: extraction.content.clone().into_bytes(),
            filename: timestamped_filename(ToolKind::PdfToText.artifact_prefix(), "txt"),
            media_type: "text/plain",
        }
    }
}

// -- Naming & integrity -------------------------------------------------------

/// `<prefix>-<UTC timestamp, seconds precision, colons as hyphens>.<ext>`.
fn timestamped_filename(prefix: &str, ext: &str) -> String {
    format!("{}-{}.{}", prefix, Utc::now().format("%Y-%m-%dT%H-%M-%S"), ext)
}

/// SHA-256 of source bytes, hex-encoded, recorded per conversion.
pub fn source_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemill_core::PaperSize;

    fn converter() -> Converter {
        Converter::new(PdfWriter::new(PaperSize::A4), PdfReader::new(2.0))
    }

    fn upload(name: &str, bytes: Vec<u8>) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            declared_media_type: None,
            bytes,
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut png = Vec::new();
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([128, 64, 32]));
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        png
    }

    #[test]
    fn timestamped_filenames_contain_no_colons() {
        let name = timestamped_filename("text-to-pdf", "pdf");
        assert!(name.starts_with("text-to-pdf-"));
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains(':'));
        // prefix + `-` + YYYY-MM-DDTHH-MM-SS + `.pdf`
        assert_eq!(name.len(), "text-to-pdf-".len() + 19 + ".pdf".len());
    }

    #[test]
    fn photo_conversion_yields_a_pdf_artifact() {
        let artifact = converter()
            .photo_to_pdf(&upload("photo.png", png_bytes(40, 30)))
            .unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.media_type, "application/pdf");
        assert!(artifact.filename.starts_with("photo-to-pdf-"));
    }

    #[test]
    fn empty_text_is_rejected_before_writing() {
        let err = converter().text_to_pdf("   \n ").unwrap_err();
        assert!(matches!(err, PagemillError::EmptyContent(_)));
    }

    #[test]
    fn extraction_has_one_marker_per_page_in_ascending_order() {
        let pdf = crate::pdf::reader::test_pdf(&["alpha", "beta", "gamma"]);
        let extraction = converter().pdf_to_text(&upload("doc.pdf", pdf)).unwrap();
        assert_eq!(extraction.page_count, 3);
        assert!(extraction.has_text);

        let markers: Vec<usize> = (1..=3)
            .map(|n| extraction.content.find(&format!("--- Page {n} ---")).unwrap())
            .collect();
        assert!(markers[0] < markers[1] && markers[1] < markers[2]);
        assert_eq!(extraction.content.matches("--- Page").count(), 3);
    }

    #[test]
    fn textless_document_gets_the_placeholder() {
        let pdf = crate::pdf::reader::test_pdf(&["", ""]);
        let extraction = converter().pdf_to_text(&upload("scan.pdf", pdf)).unwrap();
        assert_eq!(extraction.page_count, 2);
        assert!(!extraction.has_text);
        assert_eq!(extraction.content, SCANNED_PLACEHOLDER);
    }

    #[test]
    fn stripping_markers_reproduces_the_raw_extraction() {
        let pdf = crate::pdf::reader::test_pdf(&["alpha beta", "gamma"]);
        let file = upload("doc.pdf", pdf);

        let conv = converter();
        let raw = conv.reader.extract_page_texts(&file.bytes).unwrap();
        let extraction = conv.pdf_to_text(&file).unwrap();

        let without_markers: Vec<String> = extraction
            .content
            .split("\n\n")
            .map(|block| {
                block
                    .lines()
                    .skip(1) // marker line
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect();
        assert_eq!(without_markers, raw);
    }

    #[test]
    fn extraction_artifact_is_plain_text_with_the_right_prefix() {
        let extraction = ExtractedText {
            page_count: 1,
            content: "--- Page 1 ---\nhello".into(),
            has_text: true,
        };
        let artifact = converter().extraction_artifact(&extraction);
        assert_eq!(artifact.media_type, "text/plain");
        assert!(artifact.filename.starts_with("extracted-text-"));
        assert!(artifact.filename.ends_with(".txt"));
        assert_eq!(artifact.bytes, extraction.content.as_bytes());
    }

    #[test]
    fn source_hash_is_stable_hex_sha256() {
        let hash = source_hash(b"abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
