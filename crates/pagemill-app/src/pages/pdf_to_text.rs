// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF to Text page — upload a PDF, extract page-marked text, copy it or save
// it as a .txt file.

use dioxus::prelude::*;

use pagemill_core::human_errors::humanize_error;

use crate::components::{ThankYouModal, UploadArea};
use crate::services::app_services::AppServices;
use crate::state::{AppState, ConversionStage};

#[component]
pub fn PdfToText() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut source_name = use_signal(|| Option::<String>::None);
    let mut stage = use_signal(|| ConversionStage::Idle);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut delivered_msg = use_signal(|| Option::<String>::None);
    let mut copied = use_signal(|| false);

    let ack_secs = state.read().config.ack_dismiss_secs;
    let display_name = source_name.read().clone().unwrap_or_default();
    let extracted = state.read().last_extraction.clone();

    rsx! {
        div {
            h1 { "PDF to Text" }

            if source_name.read().is_none() {
                UploadArea {
                    prompt: "Drop a PDF here or click to browse",
                    hint: "Text is pulled out page by page",
                    filter_name: "PDF documents",
                    extensions: &["pdf"],
                    on_file: {
                        let svc = svc.clone();
                        move |(name, media_type, bytes): (String, Option<String>, Vec<u8>)| {
                            let accepted = match svc.accept_pdf(&name, media_type.as_deref(), bytes) {
                                Ok(file) => file,
                                Err(e) => {
                                    tracing::warn!(error = %e, "PDF rejected");
                                    error_msg.set(Some(humanize_error(&e).suggestion));
                                    return;
                                }
                            };

                            source_name.set(Some(accepted.name.clone()));
                            stage.set(ConversionStage::Decoding);
                            error_msg.set(None);
                            let svc = svc.clone();

                            spawn(async move {
                                match svc.pdf_to_text(accepted).await {
                                    Ok(extraction) => {
                                        tracing::info!(
                                            pages = extraction.page_count,
                                            has_text = extraction.has_text,
                                            "extraction complete"
                                        );
                                        // Last write wins: the newest extraction
                                        // is what copy/download act on.
                                        state.write().last_extraction = Some(extraction);
                                        stage.set(ConversionStage::Ready);
                                    }
                                    Err(e) => {
                                        tracing::error!(error = %e, "extraction failed");
                                        let human = humanize_error(&e);
                                        error_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                        stage.set(ConversionStage::Failed);
                                    }
                                }
                            });
                        }
                    },
                }
            } else {
                div {
                    div { style: "display: flex; justify-content: space-between; align-items: center;",
                        p { style: "color: #666;", "{display_name}" }
                        button {
                            style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                            onclick: move |_| {
                                source_name.set(None);
                                stage.set(ConversionStage::Idle);
                                error_msg.set(None);
                                copied.set(false);
                            },
                            "Choose Another"
                        }
                    }

                    if stage.read().is_busy() {
                        p { style: "text-align: center; color: #007aff; padding: 24px;", "Extracting text..." }
                    }

                    if let Some(ref extraction) = extracted {
                        div {
                            textarea {
                                style: "width: 100%; min-height: 300px; padding: 12px; font-family: monospace; font-size: 13px; border: 1px solid #ccc; border-radius: 8px; box-sizing: border-box;",
                                readonly: true,
                                value: "{extraction.content}",
                            }
                            div { style: "display: flex; gap: 8px; margin-top: 12px;",
                                button {
                                    style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                                    onclick: {
                                        let svc = svc.clone();
                                        move |_| {
                                            let extraction = state.read().last_extraction.clone();
                                            match svc.copy_extraction(extraction.as_ref()) {
                                                Ok(()) => copied.set(true),
                                                Err(e) => {
                                                    let human = humanize_error(&e);
                                                    error_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                                }
                                            }
                                        }
                                    },
                                    if *copied.read() { "Copied!" } else { "Copy Text" }
                                }
                                button {
                                    style: "flex: 1; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white;",
                                    onclick: {
                                        let svc = svc.clone();
                                        move |_| {
                                            let extraction = state.read().last_extraction.clone();
                                            let name = source_name.read().clone().unwrap_or_default();
                                            match svc.deliver_extraction(extraction.as_ref(), &name) {
                                                Ok((record, path)) => {
                                                    delivered_msg.set(Some(format!(
                                                        "Your text file was saved to {}",
                                                        path.display()
                                                    )));
                                                    state.write().history.insert(0, record);
                                                    stage.set(ConversionStage::Delivered);
                                                }
                                                Err(e) => {
                                                    tracing::error!(error = %e, "text delivery failed");
                                                    let human = humanize_error(&e);
                                                    error_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                                }
                                            }
                                        }
                                    },
                                    "Download .txt"
                                }
                            }
                        }
                    }
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
