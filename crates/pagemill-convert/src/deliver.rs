// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artifact delivery — write generated bytes into the output directory.
//
// Bytes go through a named temporary file in the target directory and are
// persisted to the final name in one rename, so a failure mid-write leaves
// nothing behind. Existing files are never overwritten; collisions get a
// numeric suffix.

use std::io::Write;
use std::path::{Path, PathBuf};

use pagemill_core::GeneratedArtifact;
use pagemill_core::error::{PagemillError, Result};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

/// Write an artifact into `dir`, returning the path it landed at.
#[instrument(skip(artifact), fields(filename = %artifact.filename, bytes = artifact.bytes.len()))]
pub fn deliver(artifact: &GeneratedArtifact, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|err| {
        PagemillError::Delivery(format!("cannot create {}: {}", dir.display(), err))
    })?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|err| PagemillError::Delivery(format!("cannot create temp file: {err}")))?;
    tmp.write_all(&artifact.bytes)
        .map_err(|err| PagemillError::Delivery(format!("write failed: {err}")))?;

    let target = unique_path(dir, &artifact.filename);
    tmp.persist(&target)
        .map_err(|err| PagemillError::Delivery(format!("cannot finalise file: {err}")))?;

    info!(path = %target.display(), "artifact delivered");
    Ok(target)
}

/// First non-existing path for `filename` in `dir`: the name itself, then
/// `name-1.ext`, `name-2.ext`, ...
fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (filename, None),
    };

    let mut counter = 1u32;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem}-{counter}.{ext}"),
            None => format!("{stem}-{counter}"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(filename: &str, bytes: &[u8]) -> GeneratedArtifact {
        GeneratedArtifact {
            bytes: bytes.to_vec(),
            filename: filename.into(),
            media_type: "application/octet-stream",
        }
    }

    #[test]
    fn delivers_bytes_to_the_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = deliver(&artifact("out.pdf", b"%PDF-fake"), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "out.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-fake");
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = deliver(&artifact("out.txt", b"x"), &nested).unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn collisions_get_a_numeric_suffix_instead_of_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let first = deliver(&artifact("page-1.png", b"one"), dir.path()).unwrap();
        let second = deliver(&artifact("page-1.png", b"two"), dir.path()).unwrap();

        assert_eq!(first.file_name().unwrap(), "page-1.png");
        assert_eq!(second.file_name().unwrap(), "page-1-1.png");
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }
}
