// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — tool grid and this session's conversion history.

use dioxus::prelude::*;

use crate::Route;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let state = use_context::<Signal<AppState>>();

    rsx! {
        div {
            h1 { "Pagemill" }
            p { style: "color: #666;",
                "Convert files entirely on this device. Nothing is uploaded anywhere."
            }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin: 16px 0;",
                ToolCard {
                    to: Route::PhotoToPdf {},
                    title: "Photo to PDF",
                    blurb: "Turn a photo into a single-page PDF",
                }
                ToolCard {
                    to: Route::TextToPdf {},
                    title: "Text to PDF",
                    blurb: "Type, paste, or load text and export a PDF",
                }
                ToolCard {
                    to: Route::PdfToImages {},
                    title: "PDF to Images",
                    blurb: "Save every page as a high-quality PNG",
                }
                ToolCard {
                    to: Route::PdfToText {},
                    title: "PDF to Text",
                    blurb: "Pull the text out of a PDF",
                }
            }

            // Session history
            h3 { "This session" }
            if state.read().history.is_empty() {
                p { style: "color: #888;", "No conversions yet." }
            } else {
                ul { style: "list-style: none; padding: 0; margin: 0;",
                    for record in state.read().history.iter().cloned() {
                        HistoryRow { key: "{record.id}", record: record.clone() }
                    }
                }
            }

            // Informational sections
            footer { style: "margin-top: 32px; display: flex; gap: 16px; font-size: 13px;",
                Link { to: Route::About {}, "About" }
                Link { to: Route::Privacy {}, "Privacy" }
                Link { to: Route::Terms {}, "Terms" }
                Link { to: Route::Faq {}, "FAQ" }
            }
        }
    }
}

#[component]
fn HistoryRow(record: pagemill_core::ConversionRecord) -> Element {
    let summary = format!(
        "{}: {} → {}",
        record.tool.title(),
        record.source_name,
        record.output_name
    );
    let size = format!("{} KB", record.output_bytes.div_ceil(1024));

    rsx! {
        li {
            style: "display: flex; justify-content: space-between; padding: 8px 4px; border-bottom: 1px solid #eee; font-size: 14px;",
            span { "{summary}" }
            span { style: "color: #888;", "{size}" }
        }
    }
}

#[component]
fn ToolCard(to: Route, title: &'static str, blurb: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: block; padding: 20px 16px; border: 1px solid #ddd; border-radius: 12px; text-decoration: none; color: inherit;",
            h3 { style: "margin: 0 0 4px 0; color: #007aff;", "{title}" }
            p { style: "margin: 0; color: #666; font-size: 14px;", "{blurb}" }
        }
    }
}
