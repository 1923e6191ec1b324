// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Plain text documents on disk

use std::path::{Path, PathBuf};

/// Errors produced while reading or writing a document.
#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a UTF-8 text file. Windows line endings become `\n`.
pub fn load(path: &Path) -> Result<String, DocumentError> {
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_newlines(text))
}

/// Write `text` to `path`, replacing its contents.
pub fn save(path: &Path, text: &str) -> Result<(), DocumentError> {
    std::fs::write(path, text).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

/// Display name for a document path (file name, or the whole path).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sagger-document-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("round.txt");
        save(&path, "first\nsecond\n").unwrap();
        assert_eq!(load(&path).unwrap(), "first\nsecond\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_crlf_is_normalized() {
        let path = temp_path("crlf.txt");
        std::fs::write(&path, "a\r\nb\rc").unwrap();
        assert_eq!(load(&path).unwrap(), "a\nb\nc");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_path("missing.txt");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let path = temp_path("no-such-dir").join("file.txt");
        let err = save(&path, "x").unwrap_err();
        assert!(matches!(err, DocumentError::Write { .. }));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/notes.txt")), "notes.txt");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
