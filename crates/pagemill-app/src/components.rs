// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared components — the upload surface used by all four tools and the
// delivery acknowledgment modal.

use base64::Engine;
use dioxus::prelude::*;
use pagemill_core::InputFormat;

/// Drop-zone plus file-picker upload surface.
///
/// Both input modes funnel into the same `on_file` handler, so selection and
/// drag-and-drop are equivalent. Dragover/drop are `prevent_default`ed to
/// suppress the webview's native file-open behaviour, and the border doubles
/// as the drag affordance.
#[component]
pub fn UploadArea(
    prompt: &'static str,
    hint: &'static str,
    filter_name: &'static str,
    extensions: &'static [&'static str],
    on_file: EventHandler<(String, Option<String>, Vec<u8>)>,
) -> Element {
    let mut dragging = use_signal(|| false);

    let border = if *dragging.read() { "#b347d9" } else { "#007aff" };
    let background = if *dragging.read() {
        "rgba(179, 71, 217, 0.08)"
    } else {
        "rgba(0, 122, 255, 0.03)"
    };

    rsx! {
        div {
            style: "border: 2px dashed {border}; background: {background}; border-radius: 12px; padding: 40px 16px; text-align: center; cursor: pointer;",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                dragging.set(false);
            },
            ondrop: move |evt| {
                evt.prevent_default();
                dragging.set(false);
                if let Some(engine) = evt.files() {
                    spawn(async move {
                        // Only the first dropped file is taken, like a
                        // single-file picker.
                        if let Some(path) = engine.files().into_iter().next() {
                            match engine.read_file(&path).await {
                                Some(bytes) => {
                                    let name = base_name(&path);
                                    let media_type = media_type_for(&name);
                                    on_file.call((name, media_type, bytes));
                                }
                                None => {
                                    tracing::warn!(path = %path, "dropped file could not be read");
                                }
                            }
                        }
                    });
                }
            },
            onclick: move |_| {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter(filter_name, extensions)
                    .pick_file()
                {
                    let name = path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "unknown".into());
                    match std::fs::read(&path) {
                        Ok(bytes) => {
                            tracing::info!(file = %name, bytes = bytes.len(), "file picked");
                            let media_type = media_type_for(&name);
                            on_file.call((name, media_type, bytes));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to read picked file");
                        }
                    }
                }
            },

            p { style: "font-size: 18px; margin: 0 0 8px 0;", "{prompt}" }
            p { style: "color: #888; font-size: 13px; margin: 0;", "{hint}" }
        }
    }
}

/// Transient acknowledgment after a delivery.
///
/// Dismisses itself after `dismiss_secs`, on the close button, on Escape, or
/// on a click outside the card.
#[component]
pub fn ThankYouModal(message: String, dismiss_secs: u64, on_close: EventHandler<()>) -> Element {
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(std::time::Duration::from_secs(dismiss_secs)).await;
            on_close.call(());
        });
    });

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 100;",
            tabindex: "0",
            autofocus: true,
            onclick: move |_| on_close.call(()),
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    on_close.call(());
                }
            },

            div {
                style: "background: white; border-radius: 12px; padding: 24px 32px; max-width: 360px; text-align: center; box-shadow: 0 8px 32px rgba(0,0,0,0.2);",
                onclick: move |evt| evt.stop_propagation(),

                h3 { style: "margin: 0 0 8px 0;", "Thank you!" }
                p { style: "color: #555; margin: 0 0 16px 0;", "{message}" }
                button {
                    style: "padding: 8px 24px; border-radius: 8px; border: none; background: #007aff; color: white;",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }
        }
    }
}

/// Inline preview `src` for raw image bytes.
pub fn image_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Media type inferred from a filename, for platforms that report none.
pub fn media_type_for(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .and_then(|(_, ext)| InputFormat::from_extension(ext))
        .map(|format| format.media_type().to_string())
}

/// Final path component of a dropped path, which may arrive fully qualified.
fn base_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
