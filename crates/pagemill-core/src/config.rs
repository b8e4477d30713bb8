// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Paper size for generated PDFs.
    pub paper_size: crate::PaperSize,
    /// Upscaling factor for PDF page rasterisation (2.0 gives print-quality PNGs).
    pub render_scale: f32,
    /// Where delivered files land. `None` means the app data downloads directory.
    pub output_dir: Option<String>,
    /// Seconds before the delivery acknowledgment dismisses itself.
    pub ack_dismiss_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paper_size: crate::PaperSize::A4,
            render_scale: 2.0,
            output_dir: None,
            ack_dismiss_secs: 3,
        }
    }
}
