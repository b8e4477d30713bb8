// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File intake — allow-list validation for user-supplied files.
//
// A file is accepted if EITHER its declared media type matches OR its
// extension matches. The OR is deliberate: platforms and source applications
// report media types inconsistently, and native file dialogs often report
// none at all.

use pagemill_core::UploadedFile;
use pagemill_core::error::{PagemillError, Result};
use tracing::{debug, warn};

/// Allow-list for one tool's upload surface.
pub struct AcceptRule {
    /// Accepted media types. An entry ending in `/*` matches any subtype.
    pub media_types: &'static [&'static str],
    /// Accepted extensions, lowercase, without the leading dot.
    pub extensions: &'static [&'static str],
    /// Human-readable list of accepted formats, used in rejection messages.
    pub accepted_formats: &'static str,
}

/// Photo tool: any common raster image.
pub const PHOTO: AcceptRule = AcceptRule {
    media_types: &["image/*"],
    extensions: &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"],
    accepted_formats: "JPG, PNG, GIF, WEBP, BMP, TIFF",
};

/// Text tool: plain text and the text-adjacent office formats. Word and
/// spreadsheet files pass intake but are refused at decode with a
/// paste-instead message.
pub const TEXT: AcceptRule = AcceptRule {
    media_types: &[
        "text/plain",
        "text/csv",
        "application/rtf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ],
    extensions: &["txt", "csv", "rtf", "doc", "docx", "xls", "xlsx"],
    accepted_formats: "TXT, DOC, DOCX, RTF, CSV, XLS, XLSX",
};

/// PDF tools: PDF only.
pub const PDF: AcceptRule = AcceptRule {
    media_types: &["application/pdf"],
    extensions: &["pdf"],
    accepted_formats: "PDF",
};

impl AcceptRule {
    fn matches_media_type(&self, declared: &str) -> bool {
        self.media_types.iter().any(|allowed| {
            if let Some(prefix) = allowed.strip_suffix("/*") {
                declared
                    .split_once('/')
                    .is_some_and(|(major, _)| major == prefix)
            } else {
                *allowed == declared
            }
        })
    }

    fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.contains(&ext)
    }
}

/// Validate a candidate file against a tool's allow-list.
///
/// On rejection the error message names the accepted formats; no state is
/// touched, so the calling tool remains usable with whatever it already had.
pub fn accept(
    name: &str,
    declared_media_type: Option<&str>,
    bytes: Vec<u8>,
    rule: &AcceptRule,
) -> Result<UploadedFile> {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    let media_type_ok = declared_media_type
        .is_some_and(|declared| rule.matches_media_type(declared));
    let extension_ok = extension
        .as_deref()
        .is_some_and(|ext| rule.matches_extension(ext));

    if !media_type_ok && !extension_ok {
        warn!(
            name,
            media_type = declared_media_type,
            "file rejected by intake"
        );
        return Err(PagemillError::UnsupportedFileType(format!(
            "Please select a supported file ({}).",
            rule.accepted_formats
        )));
    }

    debug!(
        name,
        bytes = bytes.len(),
        via_media_type = media_type_ok,
        via_extension = extension_ok,
        "file accepted"
    );

    Ok(UploadedFile {
        name: name.to_string(),
        declared_media_type: declared_media_type.map(str::to_string),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_by_media_type_alone() {
        // No useful extension, but a trusted declared type.
        let file = accept("scan", Some("image/png"), vec![1, 2, 3], &PHOTO).unwrap();
        assert_eq!(file.name, "scan");
        assert_eq!(file.declared_media_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn accepts_by_extension_alone() {
        // Native dialogs report no media type.
        let file = accept("notes.TXT", None, b"hello".to_vec(), &TEXT).unwrap();
        assert_eq!(file.bytes, b"hello");
    }

    #[test]
    fn wildcard_matches_any_image_subtype() {
        assert!(accept("x", Some("image/x-obscure"), vec![], &PHOTO).is_ok());
    }

    #[test]
    fn rejection_names_the_accepted_formats() {
        let err = accept("movie.mp4", Some("video/mp4"), vec![], &PHOTO).unwrap_err();
        match err {
            PagemillError::UnsupportedFileType(msg) => {
                assert!(msg.contains("JPG, PNG, GIF, WEBP, BMP, TIFF"));
            }
            other => panic!("expected UnsupportedFileType, got {other:?}"),
        }
    }

    #[test]
    fn extension_comparison_is_case_insensitive() {
        assert!(accept("report.PDF", None, vec![], &PDF).is_ok());
    }

    #[test]
    fn mismatched_type_with_good_extension_still_passes() {
        // OR-semantics: a misreporting platform must not block a valid file.
        assert!(accept("table.csv", Some("application/octet-stream"), vec![], &TEXT).is_ok());
    }

    #[test]
    fn pdf_rule_rejects_images() {
        assert!(accept("photo.png", Some("image/png"), vec![], &PDF).is_err());
    }
}
