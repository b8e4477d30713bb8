// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — wraps the conversion engine in async-friendly
// methods for the Dioxus UI to call.
//
// Conversions run under `tokio::task::spawn_blocking`: pdfium keeps
// thread-local state and PDF generation is CPU-bound, so neither belongs on
// the async worker threads. Pages are processed strictly in order inside the
// engine; nothing here parallelises page work.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pagemill_core::AppConfig;
use pagemill_core::error::{PagemillError, Result};
use pagemill_core::{
    ConversionRecord, ExtractedText, PageImage, ToolKind, UploadedFile,
};
use pagemill_convert::convert::{self, Converter};
use pagemill_convert::{deliver, intake};
use tracing::{info, warn};

use super::data_dir;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// Cheaply cloneable (Arc-wrapped) so the struct can be passed into closures
/// and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<Mutex<AppConfig>>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise services: resolve the data directory and load persisted
    /// settings (or defaults when there are none yet).
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();

        Self {
            config: Arc::new(Mutex::new(config)),
            data_dir: dir,
        }
    }

    // -- Config persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }

    /// Directory delivered files land in.
    pub fn output_dir(&self) -> PathBuf {
        match self.config().output_dir {
            Some(dir) => PathBuf::from(dir),
            None => data_dir::data_subdir("downloads"),
        }
    }

    /// Build a converter from the current settings.
    fn converter(&self) -> Converter {
        Converter::from_config(&self.config())
    }

    // -- Intake --------------------------------------------------------------

    /// Validate an image upload.
    pub fn accept_photo(
        &self,
        name: &str,
        media_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<UploadedFile> {
        intake::accept(name, media_type, bytes, &intake::PHOTO)
    }

    /// Validate a text-like upload.
    pub fn accept_text_file(
        &self,
        name: &str,
        media_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<UploadedFile> {
        intake::accept(name, media_type, bytes, &intake::TEXT)
    }

    /// Validate a PDF upload.
    pub fn accept_pdf(
        &self,
        name: &str,
        media_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<UploadedFile> {
        intake::accept(name, media_type, bytes, &intake::PDF)
    }

    /// Decode an accepted text-like upload into a string for the editor.
    pub fn decode_text_file(&self, file: &UploadedFile) -> Result<String> {
        pagemill_convert::decode::decode_text(file)
    }

    // -- Conversions ---------------------------------------------------------

    /// Convert an accepted image to a PDF and deliver it.
    pub async fn photo_to_pdf(
        &self,
        file: UploadedFile,
    ) -> Result<(ConversionRecord, PathBuf)> {
        let svc = self.clone();
        run_blocking(move || {
            let artifact = svc.converter().photo_to_pdf(&file)?;
            let path = deliver::deliver(&artifact, &svc.output_dir())?;
            let record = ConversionRecord::new(
                ToolKind::PhotoToPdf,
                &file.name,
                convert::source_hash(&file.bytes),
                &artifact.filename,
                artifact.bytes.len() as u64,
            );
            Ok((record, path))
        })
        .await
    }

    /// Convert editor text to a PDF and deliver it.
    pub async fn text_to_pdf(&self, text: String) -> Result<(ConversionRecord, PathBuf)> {
        let svc = self.clone();
        run_blocking(move || {
            let artifact = svc.converter().text_to_pdf(&text)?;
            let path = deliver::deliver(&artifact, &svc.output_dir())?;
            let record = ConversionRecord::new(
                ToolKind::TextToPdf,
                "text input",
                convert::source_hash(text.as_bytes()),
                &artifact.filename,
                artifact.bytes.len() as u64,
            );
            Ok((record, path))
        })
        .await
    }

    /// Rasterise every page of an accepted PDF, in page order.
    pub async fn pdf_to_images(&self, file: UploadedFile) -> Result<Vec<PageImage>> {
        let svc = self.clone();
        run_blocking(move || svc.converter().pdf_to_images(&file)).await
    }

    /// Extract the page-marked text of an accepted PDF.
    pub async fn pdf_to_text(&self, file: UploadedFile) -> Result<ExtractedText> {
        let svc = self.clone();
        run_blocking(move || svc.converter().pdf_to_text(&file)).await
    }

    // -- Per-result delivery -------------------------------------------------

    /// Save one rendered page as `page-N.png`.
    pub fn deliver_page(
        &self,
        page: &PageImage,
        source_name: &str,
    ) -> Result<(ConversionRecord, PathBuf)> {
        let artifact = pagemill_core::GeneratedArtifact {
            bytes: page.png.clone(),
            filename: page.filename(),
            media_type: "image/png",
        };
        let path = deliver::deliver(&artifact, &self.output_dir())?;
        let record = ConversionRecord::new(
            ToolKind::PdfToImages,
            source_name,
            convert::source_hash(&page.png),
            &artifact.filename,
            artifact.bytes.len() as u64,
        );
        Ok((record, path))
    }

    /// Save the current extraction as a text file.
    ///
    /// With no extraction available there is nothing to save — the caller
    /// gets an error rather than an empty file.
    pub fn deliver_extraction(
        &self,
        extraction: Option<&ExtractedText>,
        source_name: &str,
    ) -> Result<(ConversionRecord, PathBuf)> {
        let extraction = extraction.ok_or_else(|| {
            PagemillError::EmptyContent("No text available to download.".into())
        })?;

        let artifact = self.converter().extraction_artifact(extraction);
        let path = deliver::deliver(&artifact, &self.output_dir())?;
        let record = ConversionRecord::new(
            ToolKind::PdfToText,
            source_name,
            convert::source_hash(extraction.content.as_bytes()),
            &artifact.filename,
            artifact.bytes.len() as u64,
        );
        Ok((record, path))
    }

    /// Copy the current extraction to the system clipboard.
    pub fn copy_extraction(&self, extraction: Option<&ExtractedText>) -> Result<()> {
        let extraction = extraction.ok_or_else(|| {
            PagemillError::EmptyContent("No text available to copy.".into())
        })?;

        let mut clipboard = arboard::Clipboard::new().map_err(|err| {
            PagemillError::Delivery(format!("clipboard unavailable: {err}"))
        })?;
        clipboard
            .set_text(extraction.content.clone())
            .map_err(|err| PagemillError::Delivery(format!("clipboard write failed: {err}")))?;

        info!(chars = extraction.content.len(), "extraction copied to clipboard");
        Ok(())
    }
}

/// Run CPU-bound conversion work off the async threads.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PagemillError::Internal(format!("conversion task panicked: {err}")))?
}

// -- Config file persistence --------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &std::path::Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(%err, "config file unreadable, using defaults");
            None
        }
    }
}

fn persist_config(data_dir: &std::path::Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
