// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content decoding — raw upload bytes to a usable intermediate form.
//
// Images decode to an in-memory bitmap. Text-like files decode to a string,
// with a best-effort control-sequence strip for RTF. Word and spreadsheet
// formats are refused with a paste-instead message: parsing them properly is
// a deliberate feature boundary, not an oversight.

use image::DynamicImage;
use once_cell::sync::Lazy;
use pagemill_core::InputFormat;
use pagemill_core::UploadedFile;
use pagemill_core::error::{PagemillError, Result};
use regex::Regex;
use tracing::{debug, instrument};

/// Shown when a Word or spreadsheet file reaches the text decoder.
pub const PASTE_INSTEAD_MESSAGE: &str = "DOC, DOCX, XLS, and XLSX files need specialised \
parsing. Copy the content and paste it into the text box instead.";

/// Decode an uploaded image into a bitmap.
///
/// Malformed input fails whole: there is no partial output.
#[instrument(skip(file), fields(name = %file.name, bytes = file.bytes.len()))]
pub fn decode_image(file: &UploadedFile) -> Result<DynamicImage> {
    let img = image::load_from_memory(&file.bytes)
        .map_err(|err| PagemillError::Decode(format!("failed to decode image: {err}")))?;
    debug!(width = img.width(), height = img.height(), "image decoded");
    Ok(img)
}

/// Decode an uploaded text-like file into a string.
///
/// Plain text and CSV are read as UTF-8 (lossily, so odd platform encodings
/// still produce something usable). RTF gets the control-sequence strip.
/// Empty or whitespace-only results are rejected rather than silently
/// producing a trivial document.
#[instrument(skip(file), fields(name = %file.name, bytes = file.bytes.len()))]
pub fn decode_text(file: &UploadedFile) -> Result<String> {
    let format = file
        .extension()
        .as_deref()
        .and_then(InputFormat::from_extension);

    if format.is_some_and(|f| f.needs_manual_paste()) {
        return Err(PagemillError::Decode(PASTE_INSTEAD_MESSAGE.into()));
    }

    let raw = String::from_utf8_lossy(&file.bytes);
    let text = match format {
        Some(InputFormat::Rtf) => strip_rtf(&raw),
        _ => raw.into_owned(),
    };

    if text.trim().is_empty() {
        return Err(PagemillError::EmptyContent(
            "No text content found in the file.".into(),
        ));
    }

    debug!(chars = text.len(), rtf = matches!(format, Some(InputFormat::Rtf)), "text decoded");
    Ok(text)
}

// -- RTF stripping ------------------------------------------------------------

static RTF_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\rtf\d+").expect("valid regex"));
static RTF_CONTROL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-z]+\d*").expect("valid regex"));
static RTF_CONTROL_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[^a-z]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Best-effort RTF to plain text.
///
/// Removes the header token, backslash-prefixed control words and symbols,
/// and brace delimiters, then collapses whitespace. Explicitly lossy — escaped
/// characters and embedded objects are dropped, not reconstructed.
pub fn strip_rtf(content: &str) -> String {
    let text = RTF_HEADER.replace_all(content, "");
    let text = RTF_CONTROL_WORD.replace_all(&text, "");
    let text = RTF_CONTROL_SYMBOL.replace_all(&text, "");
    let text = text.replace(['{', '}'], "");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            declared_media_type: None,
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn plain_text_passes_through() {
        let text = decode_text(&upload("notes.txt", b"hello world\nline two")).unwrap();
        assert_eq!(text, "hello world\nline two");
    }

    #[test]
    fn rtf_control_words_are_stripped() {
        let rtf = br"{\rtf1\ansi\deff0 {\fonttbl {\f0 Times;}}\f0\fs24 Hello, World!}";
        let text = decode_text(&upload("doc.rtf", rtf)).unwrap();
        assert_eq!(text, "Times; Hello, World!");
    }

    #[test]
    fn rtf_strip_collapses_whitespace() {
        let out = strip_rtf("a   b\n\n  c");
        assert_eq!(out, "a b c");
    }

    #[test]
    fn word_document_is_refused_with_paste_message() {
        let err = decode_text(&upload("report.docx", b"PK...")).unwrap_err();
        match err {
            PagemillError::Decode(msg) => assert!(msg.contains("paste")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_text_is_empty_content() {
        let err = decode_text(&upload("blank.txt", b"  \n\t  ")).unwrap_err();
        assert!(matches!(err, PagemillError::EmptyContent(_)));
    }

    #[test]
    fn rtf_reduced_to_nothing_is_empty_content() {
        let err = decode_text(&upload("empty.rtf", br"{\rtf1\ansi}")).unwrap_err();
        assert!(matches!(err, PagemillError::EmptyContent(_)));
    }

    #[test]
    fn malformed_image_is_a_decode_error() {
        let err = decode_image(&upload("broken.png", b"not a png")).unwrap_err();
        assert!(matches!(err, PagemillError::Decode(_)));
    }

    #[test]
    fn valid_png_decodes() {
        // 1x1 white pixel, generated with the image crate.
        let mut png = Vec::new();
        let img = image::RgbImage::from_pixel(1, 1, image::Rgb([255, 255, 255]));
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&upload("dot.png", &png)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1, 1));
    }
}
