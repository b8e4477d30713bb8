// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pagemill conversion studio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a completed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionId(pub Uuid);

impl ConversionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four conversion tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    PhotoToPdf,
    TextToPdf,
    PdfToImages,
    PdfToText,
}

impl ToolKind {
    /// Display name shown in the UI.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PhotoToPdf => "Photo to PDF",
            Self::TextToPdf => "Text to PDF",
            Self::PdfToImages => "PDF to Images",
            Self::PdfToText => "PDF to Text",
        }
    }

    /// Filename prefix for delivered artifacts.
    ///
    /// The PDF-to-text tool names its download after what it contains rather
    /// than after the tool itself.
    pub fn artifact_prefix(&self) -> &'static str {
        match self {
            Self::PhotoToPdf => "photo-to-pdf",
            Self::TextToPdf => "text-to-pdf",
            Self::PdfToImages => "pdf-to-images",
            Self::PdfToText => "extracted-text",
        }
    }
}

/// Supported input formats across the four tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Tiff,
    Pdf,
    PlainText,
    Csv,
    Rtf,
    /// DOC/DOCX — accepted at intake, refused at decode with a paste-instead message.
    WordDocument,
    /// XLS/XLSX — same treatment as Word documents.
    Spreadsheet,
}

impl InputFormat {
    /// Canonical media type string.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Pdf => "application/pdf",
            Self::PlainText => "text/plain",
            Self::Csv => "text/csv",
            Self::Rtf => "application/rtf",
            Self::WordDocument => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Infer an input format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::PlainText),
            "csv" => Some(Self::Csv),
            "rtf" => Some(Self::Rtf),
            "doc" | "docx" => Some(Self::WordDocument),
            "xls" | "xlsx" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Whether this format can only be converted by pasting its text manually.
    pub fn needs_manual_paste(&self) -> bool {
        matches!(self, Self::WordDocument | Self::Spreadsheet)
    }
}

/// Standard paper sizes for generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// A user-supplied file that passed intake validation.
///
/// Created on selection or drop, consumed once by a conversion, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename as reported by the picker or drop event.
    pub name: String,
    /// Media type as declared by the source, if any. Native file dialogs do
    /// not report one, so intake also accepts by extension.
    pub declared_media_type: Option<String>,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lowercased extension: the text after the last `.` in the name.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Final output bytes ready for delivery to the user.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub media_type: &'static str,
}

/// One rasterised page of a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-indexed page number.
    pub number: u32,
    /// Bitmap width in pixels (after upscaling).
    pub width: u32,
    /// Bitmap height in pixels (after upscaling).
    pub height: u32,
    /// PNG-encoded bitmap.
    pub png: Vec<u8>,
}

impl PageImage {
    /// Download filename for this page.
    pub fn filename(&self) -> String {
        format!("page-{}.png", self.number)
    }
}

/// Result of a PDF text extraction.
///
/// Threaded explicitly from the extraction operation into the copy and
/// download actions via application state — there is no global buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Number of pages the source document had.
    pub page_count: usize,
    /// Page-marked extraction, or the scanned-images placeholder when the
    /// document yielded no text at all.
    pub content: String,
    /// Whether any page produced actual text fragments.
    pub has_text: bool,
}

/// Session-lifetime record of a completed conversion, shown on the home page.
/// History is in-memory only and discarded on exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub id: ConversionId,
    pub tool: ToolKind,
    pub source_name: String,
    /// SHA-256 of the source bytes.
    pub source_hash: String,
    pub output_name: String,
    pub output_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl ConversionRecord {
    pub fn new(
        tool: ToolKind,
        source_name: impl Into<String>,
        source_hash: impl Into<String>,
        output_name: impl Into<String>,
        output_bytes: u64,
    ) -> Self {
        Self {
            id: ConversionId::new(),
            tool,
            source_name: source_name.into(),
            source_hash: source_hash.into(),
            output_name: output_name.into(),
            output_bytes,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_tail() {
        let file = UploadedFile {
            name: "Holiday.Scan.JPG".into(),
            declared_media_type: None,
            bytes: Vec::new(),
        };
        assert_eq!(file.extension().as_deref(), Some("jpg"));
    }

    #[test]
    fn extension_absent_without_dot() {
        let file = UploadedFile {
            name: "README".into(),
            declared_media_type: None,
            bytes: Vec::new(),
        };
        assert_eq!(file.extension(), None);
    }

    #[test]
    fn office_formats_need_manual_paste() {
        assert!(InputFormat::from_extension("docx").unwrap().needs_manual_paste());
        assert!(InputFormat::from_extension("xls").unwrap().needs_manual_paste());
        assert!(!InputFormat::from_extension("rtf").unwrap().needs_manual_paste());
    }

    #[test]
    fn page_image_filename_is_indexed() {
        let page = PageImage {
            number: 3,
            width: 100,
            height: 100,
            png: Vec::new(),
        };
        assert_eq!(page.filename(), "page-3.png");
    }
}
