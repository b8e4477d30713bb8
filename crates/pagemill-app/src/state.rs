// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use pagemill_core::AppConfig;
use pagemill_core::{ConversionRecord, ExtractedText};

use crate::services::app_services::AppServices;

/// Lifecycle of one tool's in-progress conversion.
///
/// A failure during decoding or converting returns the image/text tools to
/// `FileAccepted` (or `Idle` when intake itself rejected the file); the PDF
/// tools stay on their preview with the loading indicator cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    /// Nothing uploaded yet — the upload prompt is showing.
    Idle,
    /// A file passed intake; preview is available.
    FileAccepted,
    /// Reading and decoding the upload.
    Decoding,
    /// Intermediate content ready; conversion can start.
    Ready,
    /// Producing the output artifact.
    Converting,
    /// Artifact delivered; acknowledgment showing.
    Delivered,
    /// The last operation failed.
    Failed,
}

impl ConversionStage {
    /// Whether a loading indicator should be visible.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Decoding | Self::Converting)
    }
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application settings.
    pub config: AppConfig,
    /// Completed conversions this session, newest first. In-memory only.
    pub history: Vec<ConversionRecord>,
    /// Most recent PDF text extraction, threaded into the copy and download
    /// actions. Last write wins.
    pub last_extraction: Option<ExtractedText>,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            config: svc.config(),
            history: Vec::new(),
            last_extraction: None,
            status_message: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            history: Vec::new(),
            last_extraction: None,
            status_message: None,
        }
    }
}
