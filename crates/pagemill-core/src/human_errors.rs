// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The taxonomy uses three severity levels that drive UI presentation.

use crate::error::PagemillError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again without changing anything.
    Transient,
    /// User must do something (pick a different file, paste text, free disk space).
    ActionRequired,
    /// Cannot be fixed by retrying or user action — damaged file, wrong format.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `PagemillError` into a `HumanError` anyone can understand.
pub fn humanize_error(err: &PagemillError) -> HumanError {
    match err {
        PagemillError::UnsupportedFileType(detail) => HumanError {
            message: "This file type isn't supported here.".into(),
            suggestion: detail.clone(),
            severity: Severity::ActionRequired,
        },

        PagemillError::Decode(detail) => {
            if detail.contains("paste") {
                HumanError {
                    message: "This format needs to be pasted as text.".into(),
                    suggestion: detail.clone(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "This file couldn't be read.".into(),
                    suggestion: "The file may be damaged or in an unusual format. Try saving it again as a JPEG, PNG, or plain text file.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        PagemillError::Parse(detail) => {
            if detail.contains("password") || detail.contains("encrypt") {
                HumanError {
                    message: "This PDF is password-protected.".into(),
                    suggestion: "Remove the password from the PDF first, then try again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There's a problem with this PDF file.".into(),
                    suggestion: "The file may be damaged. Try opening it in another viewer to check it works, or try a different file.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        PagemillError::EmptyContent(detail) => HumanError {
            message: "There's nothing to convert yet.".into(),
            suggestion: detail.clone(),
            severity: Severity::ActionRequired,
        },

        PagemillError::PdfCreate(_) => HumanError {
            message: "The PDF couldn't be created.".into(),
            suggestion: "Try again. If this keeps happening with one file, the file itself may be the problem.".into(),
            severity: Severity::Transient,
        },

        PagemillError::Delivery(detail) => {
            if detail.contains("clipboard") {
                HumanError {
                    message: "The text couldn't be copied.".into(),
                    suggestion: "Try selecting the text and copying it manually.".into(),
                    severity: Severity::Transient,
                }
            } else {
                HumanError {
                    message: "The file couldn't be saved.".into(),
                    suggestion: "Check there's space on your disk and that the output folder still exists, then try again.".into(),
                    severity: Severity::ActionRequired,
                }
            }
        }

        PagemillError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or try copying the file somewhere else first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        PagemillError::Serialization(_) | PagemillError::Internal(_) => HumanError {
            message: "The app had an internal problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_is_action_required() {
        let err = PagemillError::UnsupportedFileType(
            "Please select a supported file (JPG, PNG, GIF, WEBP, BMP, TIFF).".into(),
        );
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("JPG"));
    }

    #[test]
    fn encrypted_pdf_is_action_required() {
        let err = PagemillError::Parse("document is password-protected".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn damaged_pdf_is_permanent() {
        let err = PagemillError::Parse("bad xref table".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn clipboard_failure_is_transient() {
        let err = PagemillError::Delivery("clipboard unavailable".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
    }

    #[test]
    fn empty_content_carries_the_detail() {
        let err = PagemillError::EmptyContent("Please enter some text to convert.".into());
        let human = humanize_error(&err);
        assert_eq!(human.suggestion, "Please enter some text to convert.");
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
