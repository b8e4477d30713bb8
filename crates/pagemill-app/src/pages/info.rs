// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Informational sections — About, Privacy, Terms, FAQ. Static copy only.

use dioxus::prelude::*;

use crate::Route;

#[component]
fn InfoPage(title: &'static str, children: Element) -> Element {
    rsx! {
        div { style: "max-width: 640px;",
            h1 { "{title}" }
            {children}
            p { style: "margin-top: 24px;",
                Link { to: Route::Home {}, "← Back to the tools" }
            }
        }
    }
}

#[component]
pub fn About() -> Element {
    rsx! {
        InfoPage { title: "About",
            p {
                "Pagemill converts files entirely on this device: photos and text "
                "into PDFs, and PDFs into page images or plain text. The heavy "
                "lifting is done by well-established document libraries; Pagemill "
                "is the thin workshop around them."
            }
            p {
                "There is no account, no upload, and no network involved in any "
                "conversion."
            }
        }
    }
}

#[component]
pub fn Privacy() -> Element {
    rsx! {
        InfoPage { title: "Privacy",
            p {
                "Your files never leave your device. Conversions run locally and "
                "the results are written only where you choose to save them."
            }
            p {
                "The session history on the home page lives in memory and is gone "
                "when you close the app. The only thing stored on disk is your "
                "settings."
            }
        }
    }
}

#[component]
pub fn Terms() -> Element {
    rsx! {
        InfoPage { title: "Terms of Use",
            p {
                "Pagemill is provided as-is, without warranty of any kind. "
                "Conversion output quality depends on the input file; always check "
                "the result before relying on it."
            }
            p {
                "You are responsible for having the right to convert the files "
                "you process."
            }
        }
    }
}

#[component]
pub fn Faq() -> Element {
    rsx! {
        InfoPage { title: "FAQ",
            h3 { "Why can't I convert DOC or XLSX files directly?" }
            p {
                "Those formats need specialised parsing that is out of scope here. "
                "Open the file in its own application, copy the text, and paste it "
                "into the Text to PDF tool."
            }
            h3 { "Why did my scanned PDF produce no text?" }
            p {
                "Scanned PDFs contain pictures of text, not text. Text extraction "
                "only finds real text; try PDF to Images for scans."
            }
            h3 { "Where do my files go?" }
            p {
                "Into the output folder shown in Settings. By default that's the "
                "app's own downloads folder."
            }
        }
    }
}
