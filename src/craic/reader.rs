//! Reading uploads into memory.
//!
//! A file is accepted when either its MIME type or its extension is on the
//! allow list. Acceptance is checked before any bytes are read, and content
//! must decode as UTF-8 text.

use crate::error::{CraicError, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

pub const ACCEPTED_MIME_TYPES: &[&str] = &["text/markdown", "text/plain"];

/// A file that passed validation and was read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub content: String,
}

pub fn is_accepted(name: &str, mime: Option<&str>, extensions: &[String]) -> bool {
    let mime_ok = mime.is_some_and(|m| ACCEPTED_MIME_TYPES.contains(&m.trim()));
    mime_ok || extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

pub fn check_accepted(name: &str, mime: Option<&str>, extensions: &[String]) -> Result<()> {
    if is_accepted(name, mime, extensions) {
        return Ok(());
    }
    tracing::warn!(name, ?mime, "rejected upload");
    Err(CraicError::UnsupportedFileType {
        name: name.to_string(),
        accepted: extensions.join(","),
    })
}

/// Validate and read a file from disk. `name` defaults to the file name.
pub fn read_file(
    path: &Path,
    name: Option<&str>,
    mime: Option<&str>,
    extensions: &[String],
) -> Result<Upload> {
    let name = match name {
        Some(n) => n.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CraicError::Api(format!("Not a file: {}", path.display())))?,
    };
    check_accepted(&name, mime, extensions)?;

    let bytes = fs::read(path).map_err(|e| CraicError::FileRead {
        name: name.clone(),
        reason: e.to_string(),
    })?;
    let content = decode(&name, bytes)?;
    Ok(Upload { name, content })
}

/// Validate `name` and read content from any reader (e.g. stdin).
pub fn read_from<R: Read>(
    mut reader: R,
    name: &str,
    mime: Option<&str>,
    extensions: &[String],
) -> Result<Upload> {
    check_accepted(name, mime, extensions)?;

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| CraicError::FileRead {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    let content = decode(name, bytes)?;
    Ok(Upload {
        name: name.to_string(),
        content,
    })
}

fn decode(name: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| CraicError::FileRead {
        name: name.to_string(),
        reason: "Failed to read file content as text.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec![".md".to_string(), ".txt".to_string()]
    }

    #[test]
    fn accepts_by_extension_or_mime() {
        assert!(is_accepted("notes.md", None, &exts()));
        assert!(is_accepted("notes.txt", None, &exts()));
        assert!(is_accepted("README", Some("text/plain"), &exts()));
        assert!(is_accepted("draft", Some("text/markdown"), &exts()));
        assert!(!is_accepted("image.png", Some("image/png"), &exts()));
        assert!(!is_accepted("archive.md.gz", None, &exts()));
    }

    #[test]
    fn rejection_message_lists_accepted_types() {
        let err = check_accepted("photo.jpg", None, &exts()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file type. Please upload .md,.txt."
        );
    }

    #[test]
    fn reads_file_with_its_own_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.md");
        fs::write(&path, "# hello").unwrap();

        let upload = read_file(&path, None, None, &exts()).unwrap();
        assert_eq!(upload.name, "a.md");
        assert_eq!(upload.content, "# hello");
    }

    #[test]
    fn name_override_is_validated_instead_of_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("download.bin");
        fs::write(&path, "text").unwrap();

        let upload = read_file(&path, Some("chapter.txt"), None, &exts()).unwrap();
        assert_eq!(upload.name, "chapter.txt");

        assert!(matches!(
            read_file(&path, None, None, &exts()),
            Err(CraicError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let err = read_file(&temp.path().join("gone.md"), None, None, &exts()).unwrap_err();
        assert!(matches!(err, CraicError::FileRead { ref name, .. } if name == "gone.md"));
    }

    #[test]
    fn non_utf8_content_is_a_read_error() {
        let err = read_from(&[0xff, 0xfe, 0x00][..], "bad.txt", None, &exts()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error reading bad.txt: Failed to read file content as text."
        );
    }

    #[test]
    fn reads_from_any_reader() {
        let upload = read_from("piped".as_bytes(), "stdin.md", None, &exts()).unwrap();
        assert_eq!(upload.content, "piped");
    }
}
