// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text to PDF page — type or paste text, or load it from a text-like file,
// then export a word-wrapped, paginated PDF.

use dioxus::prelude::*;

use pagemill_core::human_errors::humanize_error;

use crate::components::{ThankYouModal, UploadArea};
use crate::services::app_services::AppServices;
use crate::state::{AppState, ConversionStage};

#[component]
pub fn TextToPdf() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut text = use_signal(String::new);
    let mut stage = use_signal(|| ConversionStage::Idle);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut load_msg = use_signal(|| Option::<String>::None);
    let mut delivered_msg = use_signal(|| Option::<String>::None);

    let ack_secs = state.read().config.ack_dismiss_secs;

    rsx! {
        div {
            h1 { "Text to PDF" }

            UploadArea {
                prompt: "Drop a text file here to load it",
                hint: "TXT, DOC, DOCX, RTF, CSV, XLS, XLSX — or just type below",
                filter_name: "Text files",
                extensions: &["txt", "csv", "rtf", "doc", "docx", "xls", "xlsx"],
                on_file: {
                    let svc = svc.clone();
                    move |(name, media_type, bytes): (String, Option<String>, Vec<u8>)| {
                        let result = svc
                            .accept_text_file(&name, media_type.as_deref(), bytes)
                            .and_then(|file| svc.decode_text_file(&file));
                        match result {
                            Ok(content) => {
                                load_msg.set(Some(format!(
                                    "Loaded {} characters from {}",
                                    content.len(),
                                    name
                                )));
                                text.set(content);
                                error_msg.set(None);
                            }
                            Err(e) => {
                                // The editor keeps whatever was already typed.
                                tracing::warn!(error = %e, "text file not usable");
                                let human = humanize_error(&e);
                                error_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                            }
                        }
                    }
                },
            }

            textarea {
                style: "width: 100%; min-height: 260px; margin-top: 16px; padding: 12px; font-family: monospace; font-size: 14px; border: 1px solid #ccc; border-radius: 8px; box-sizing: border-box;",
                placeholder: "Type or paste text here...",
                value: "{text}",
                oninput: move |evt| {
                    text.set(evt.value().to_string());
                    load_msg.set(None);
                },
            }

            div { style: "display: flex; gap: 8px; margin-top: 12px;",
                button {
                    style: "flex: 1; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                    disabled: text.read().trim().is_empty() || stage.read().is_busy(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let content = text.read().clone();
                            stage.set(ConversionStage::Converting);
                            error_msg.set(None);
                            let svc = svc.clone();

                            spawn(async move {
                                match svc.text_to_pdf(content).await {
                                    Ok((record, path)) => {
                                        tracing::info!(path = %path.display(), "text delivered");
                                        delivered_msg.set(Some(format!(
                                            "Your PDF was saved to {}",
                                            path.display()
                                        )));
                                        state.write().history.insert(0, record);
                                        stage.set(ConversionStage::Delivered);
                                    }
                                    Err(e) => {
                                        tracing::error!(error = %e, "text conversion failed");
                                        let human = humanize_error(&e);
                                        error_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                        stage.set(ConversionStage::FileAccepted);
                                    }
                                }
                            });
                        }
                    },
                    if stage.read().is_busy() { "Converting..." } else { "Convert to PDF" }
                }
                button {
                    style: "padding: 12px 24px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                    onclick: move |_| {
                        text.set(String::new());
                        load_msg.set(None);
                        error_msg.set(None);
                        stage.set(ConversionStage::Idle);
                    },
                    "Clear"
                }
            }

            if let Some(ref msg) = *load_msg.read() {
                p { style: "margin-top: 8px; color: #155724; font-size: 14px;", "{msg}" }
            }
            if let Some(ref msg) = *error_msg.read() {
                p { style: "margin-top: 8px; padding: 12px; border-radius: 8px; background: #f8d7da; color: #721c24;",
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
