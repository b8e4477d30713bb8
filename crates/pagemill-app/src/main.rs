// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagemill — on-device file conversion studio.
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod components;
mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::home::Home;
use pages::info::{About, Faq, Privacy, Terms};
use pages::pdf_to_images::PdfToImages;
use pages::pdf_to_text::PdfToText;
use pages::photo_to_pdf::PhotoToPdf;
use pages::settings::Settings;
use pages::text_to_pdf::TextToPdf;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Diagnostic-only fallback for anything unanticipated; no corrective action.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "unhandled panic");
    }));

    tracing::info!("Pagemill starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    Home {},
    #[route("/photo")]
    PhotoToPdf {},
    #[route("/text")]
    TextToPdf {},
    #[route("/pdf-images")]
    PdfToImages {},
    #[route("/pdf-text")]
    PdfToText {},
    #[route("/settings")]
    Settings {},
    #[route("/about")]
    About {},
    #[route("/privacy")]
    Privacy {},
    #[route("/terms")]
    Terms {},
    #[route("/faq")]
    Faq {},
}

/// Root component.
fn app() -> Element {
    // Initialise backend services (data dir, persisted settings)
    let svc = use_hook(|| {
        let s = AppServices::init();
        tracing::info!("backend services initialised");
        s
    });

    // Provide services and state as context for all pages
    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent bottom tab layout wrapping all pages.
///
/// The router shows exactly one page at a time; switching tabs swaps the
/// whole content area.
#[component]
fn TabLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            // Page content
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Outlet::<Route> {}
            }

            // Bottom tab bar
            nav { class: "tab-bar",
                style: "display: flex; justify-content: space-around; padding: 8px 0; border-top: 1px solid #e0e0e0; background: #fafafa;",
                TabButton { to: Route::Home {}, label: "Home", icon: "H" }
                TabButton { to: Route::PhotoToPdf {}, label: "Photo", icon: "P" }
                TabButton { to: Route::TextToPdf {}, label: "Text", icon: "T" }
                TabButton { to: Route::PdfToImages {}, label: "Pages", icon: "G" }
                TabButton { to: Route::PdfToText {}, label: "Extract", icon: "X" }
                TabButton { to: Route::Settings {}, label: "Settings", icon: "S" }
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; flex-direction: column; align-items: center; text-decoration: none; color: #333; font-size: 12px;",
            span { style: "font-size: 20px;", "{icon}" }
            span { "{label}" }
        }
    }
}
