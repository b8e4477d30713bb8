// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagemill-convert — File conversion engine for the Pagemill studio.
//
// Provides file intake (allow-list validation), content decoding (images,
// plain text, best-effort RTF), the four conversions (image→PDF, text→PDF,
// PDF→images, PDF→text), and artifact delivery to disk.

pub mod convert;
pub mod decode;
pub mod deliver;
pub mod intake;
pub mod pdf;

// Re-export the primary structs so callers can use `pagemill_convert::Converter` etc.
pub use convert::Converter;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
