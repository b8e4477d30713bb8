// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagemill.

use thiserror::Error;

/// Top-level error type for all Pagemill operations.
#[derive(Debug, Error)]
pub enum PagemillError {
    // -- Intake errors --
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    // -- Decoding errors --
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("PDF parse failed: {0}")]
    Parse(String),

    #[error("no usable content: {0}")]
    EmptyContent(String),

    // -- Output errors --
    #[error("PDF generation failed: {0}")]
    PdfCreate(String),

    #[error("delivery failed: {0}")]
    Delivery(String),

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagemillError>;
