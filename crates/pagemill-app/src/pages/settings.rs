// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — paper size, render scale, and output directory.

use dioxus::prelude::*;

use pagemill_core::PaperSize;
use pagemill_core::human_errors::humanize_error;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut status_msg = use_signal(|| Option::<String>::None);

    let config = state.read().config.clone();
    let output_dir_label = config
        .output_dir
        .clone()
        .unwrap_or_else(|| "App downloads folder (default)".into());

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Generated PDFs" }
                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 8px; align-items: center;",
                    label { "Paper size:" }
                    select {
                        style: "padding: 4px; border: 1px solid #ccc; border-radius: 4px;",
                        onchange: move |evt| {
                            let val = evt.value().to_string();
                            state.write().config.paper_size = match val.as_str() {
                                "A5" => PaperSize::A5,
                                "Letter" => PaperSize::Letter,
                                "Legal" => PaperSize::Legal,
                                _ => PaperSize::A4,
                            };
                        },
                        option { value: "A4", "A4" }
                        option { value: "A5", "A5" }
                        option { value: "Letter", "Letter" }
                        option { value: "Legal", "Legal" }
                    }

                    label { "Page image scale:" }
                    input {
                        r#type: "number",
                        value: "{config.render_scale}",
                        min: "1",
                        max: "4",
                        step: "0.5",
                        style: "padding: 4px; border: 1px solid #ccc; border-radius: 4px;",
                        onchange: move |evt| {
                            if let Ok(scale) = evt.value().parse::<f32>() {
                                state.write().config.render_scale = scale.clamp(1.0, 4.0);
                            }
                        },
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Output" }
                p { style: "color: #666; font-size: 14px;", "Files are saved to: {output_dir_label}" }
                div { style: "display: flex; gap: 8px;",
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                        onclick: move |_| {
                            if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                                state.write().config.output_dir =
                                    Some(dir.to_string_lossy().to_string());
                            }
                        },
                        "Choose Folder"
                    }
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| {
                            state.write().config.output_dir = None;
                        },
                        "Use Default"
                    }
                }
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 16px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                status_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "settings save failed");
                                status_msg.set(Some(humanize_error(&e).message));
                            }
                        }
                    }
                },
                "Save Settings"
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 8px; color: #666; font-size: 14px; text-align: center;",
                    "{msg}"
                }
            }
        }
    }
}
