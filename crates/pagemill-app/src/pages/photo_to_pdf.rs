// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo to PDF page — upload an image, preview it, convert to a single-page
// PDF, download.

use dioxus::prelude::*;

use pagemill_core::UploadedFile;
use pagemill_core::human_errors::humanize_error;

use crate::components::{ThankYouModal, UploadArea, image_data_uri};
use crate::services::app_services::AppServices;
use crate::state::{AppState, ConversionStage};

#[component]
pub fn PhotoToPdf() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut file = use_signal(|| Option::<UploadedFile>::None);
    let mut stage = use_signal(|| ConversionStage::Idle);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut delivered_msg = use_signal(|| Option::<String>::None);

    let ack_secs = state.read().config.ack_dismiss_secs;
    let current = file.read().clone();

    rsx! {
        div {
            h1 { "Photo to PDF" }

            if let Some(accepted) = current {
                PhotoPreview {
                    file: accepted,
                    busy: stage.read().is_busy(),
                    on_convert: {
                        let svc = svc.clone();
                        move |upload: UploadedFile| {
                            stage.set(ConversionStage::Converting);
                            error_msg.set(None);
                            let svc = svc.clone();

                            spawn(async move {
                                match svc.photo_to_pdf(upload).await {
                                    Ok((record, path)) => {
                                        tracing::info!(path = %path.display(), "photo delivered");
                                        delivered_msg.set(Some(format!(
                                            "Your PDF was saved to {}",
                                            path.display()
                                        )));
                                        state.write().history.insert(0, record);
                                        stage.set(ConversionStage::Delivered);
                                    }
                                    Err(e) => {
                                        tracing::error!(error = %e, "photo conversion failed");
                                        let human = humanize_error(&e);
                                        error_msg.set(Some(format!(
                                            "{} {}",
                                            human.message, human.suggestion
                                        )));
                                        // Preview stays; the user can retry.
                                        stage.set(ConversionStage::FileAccepted);
                                    }
                                }
                            });
                        }
                    },
                    on_reset: move |_| {
                        file.set(None);
                        stage.set(ConversionStage::Idle);
                        error_msg.set(None);
                    },
                }
            } else {
                UploadArea {
                    prompt: "Drop a photo here or click to browse",
                    hint: "JPG, PNG, GIF, WEBP, BMP, TIFF",
                    filter_name: "Images",
                    extensions: &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"],
                    on_file: {
                        let svc = svc.clone();
                        move |(name, media_type, bytes): (String, Option<String>, Vec<u8>)| {
                            match svc.accept_photo(&name, media_type.as_deref(), bytes) {
                                Ok(accepted) => {
                                    file.set(Some(accepted));
                                    stage.set(ConversionStage::FileAccepted);
                                    error_msg.set(None);
                                }
                                Err(e) => {
                                    // A rejected file must not disturb the tool.
                                    tracing::warn!(error = %e, "photo rejected");
                                    error_msg.set(Some(humanize_error(&e).suggestion));
                                }
                            }
                        }
                    },
                }
            }

            if let Some(ref msg) = *error_msg.read() {
                p { style: "margin-top: 12px; padding: 12px; border-radius: 8px; background: #f8d7da; color: #721c24;",
                    "{msg}"
                }
            }

            if let Some(msg) = delivered_msg.read().clone() {
                ThankYouModal {
                    message: msg,
                    dismiss_secs: ack_secs,
                    on_close: move |_| delivered_msg.set(None),
                }
            }
        }
    }
}

/// Accepted-photo preview with convert and reset actions.
#[component]
fn PhotoPreview(
    file: UploadedFile,
    busy: bool,
    on_convert: EventHandler<UploadedFile>,
    on_reset: EventHandler<()>,
) -> Element {
    let media_type = file
        .declared_media_type
        .clone()
        .unwrap_or_else(|| "image/jpeg".into());
    let preview_src = image_data_uri(&media_type, &file.bytes);
    let name = file.name.clone();

    rsx! {
        div { style: "text-align: center;",
            p { style: "color: #666;", "{name}" }
            img {
                src: "{preview_src}",
                style: "max-width: 100%; max-height: 400px; border-radius: 8px; border: 1px solid #ddd;",
            }

            div { style: "display: flex; gap: 8px; margin-top: 16px; justify-content: center;",
                button {
                    style: "padding: 12px 32px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                    disabled: busy,
                    onclick: move |_| on_convert.call(file.clone()),
                    if busy { "Converting..." } else { "Convert to PDF" }
                }
                button {
                    style: "padding: 12px 24px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                    onclick: move |_| on_reset.call(()),
                    "Choose Another"
                }
            }
        }
    }
}
