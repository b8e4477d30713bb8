// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF to Images page — upload a PDF, render every page to a PNG at 2x, show
// each inline with its own download.

use dioxus::prelude::*;

use pagemill_core::PageImage;
use pagemill_core::human_errors::humanize_error;

use crate::components::{ThankYouModal, UploadArea, image_data_uri};
use crate::services::app_services::AppServices;
use crate::state::{AppState, ConversionStage};

#[component]
pub fn PdfToImages() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut source_name = use_signal(|| Option::<String>::None);
    let mut pages = use_signal(Vec::<PageImage>::new);
    let mut stage = use_signal(|| ConversionStage::Idle);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut delivered_msg = use_signal(|| Option::<String>::None);

    let ack_secs = state.read().config.ack_dismiss_secs;
    let display_name = source_name.read().clone().unwrap_or_default();

    rsx! {
        div {
            h1 { "PDF to Images" }

            if source_name.read().is_none() {
                UploadArea {
                    prompt: "Drop a PDF here or click to browse",
                    hint: "Every page becomes a PNG at 2x resolution",
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
                                // Pages render strictly in order, one at a time.
                                match svc.pdf_to_images(accepted).await {
                                    Ok(rendered) => {
                                        tracing::info!(pages = rendered.len(), "PDF rendered");
                                        pages.set(rendered);
                                        stage.set(ConversionStage::Ready);
                                    }
                                    Err(e) => {
                                        tracing::error!(error = %e, "PDF rendering failed");
                                        let human = humanize_error(&e);
                                        error_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                        // Preview panel stays up with the
                                        // loading indicator cleared.
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
                                pages.set(Vec::new());
                                stage.set(ConversionStage::Idle);
                                error_msg.set(None);
                            },
                            "Choose Another"
                        }
                    }

                    if stage.read().is_busy() {
                        p { style: "text-align: center; color: #007aff; padding: 24px;", "Rendering pages..." }
                    }

                    for page in pages.read().iter().cloned() {
                        PageCard {
                            key: "{page.number}",
                            page: page.clone(),
                            on_download: {
                                let svc = svc.clone();
                                move |page: PageImage| {
                                    let name = source_name.read().clone().unwrap_or_default();
                                    match svc.deliver_page(&page, &name) {
                                        Ok((record, path)) => {
                                            delivered_msg.set(Some(format!(
                                                "Page {} was saved to {}",
                                                page.number,
                                                path.display()
                                            )));
                                            state.write().history.insert(0, record);
                                        }
                                        Err(e) => {
                                            tracing::error!(error = %e, "page delivery failed");
                                            let human = humanize_error(&e);
                                            error_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                        }
                                    }
                                }
                            },
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

/// One rendered page with its own download action.
#[component]
fn PageCard(page: PageImage, on_download: EventHandler<PageImage>) -> Element {
    let preview_src = image_data_uri("image/png", &page.png);
    let number = page.number;

    rsx! {
        div {
            style: "margin: 16px 0; padding: 16px; border: 1px solid #ddd; border-radius: 12px; text-align: center;",
            h4 { style: "margin: 0 0 8px 0;", "Page {number}" }
            img {
                src: "{preview_src}",
                style: "max-width: 100%; border: 1px solid #eee;",
            }
            div {
                button {
                    style: "margin-top: 16px; padding: 8px 24px; border-radius: 8px; border: none; background: #007aff; color: white;",
                    onclick: move |_| on_download.call(page.clone()),
                    "Download PNG"
                }
            }
        }
    }
}
