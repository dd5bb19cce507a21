//! File selection: descriptors and drop/paste parsing.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::InputError;

/// Immutable description of the file being validated, captured at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    #[serde(skip)]
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Extension-based MIME guess; empty when nothing matches
    pub media_type_hint: String,
}

impl FileDescriptor {
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let metadata = std::fs::metadata(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(InputError::NotAFile { path: path.to_path_buf() });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let media_type_hint = mime_guess::from_path(path)
            .first_raw()
            .map(|s| s.to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            media_type_hint,
        })
    }
}

/// Split pasted/dropped text into candidate paths, in order.
///
/// Terminals deliver a drag-and-drop as pasted text: paths separated by
/// whitespace, possibly quoted, with spaces backslash-escaped, or as
/// `file://` URIs.
pub fn paths_from_drop(text: &str) -> Vec<PathBuf> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => quote = Some(c),
                '\\' => match chars.peek() {
                    // Only unescape what a shell would have escaped; keep Windows separators
                    Some(&next) if next == ' ' || next == '\'' || next == '"' || next == '\\' => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push(c),
                },
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(c),
            },
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.into_iter().map(|t| token_to_path(&t)).collect()
}

/// Only the first dropped file is used; the rest are ignored.
pub fn first_dropped(text: &str) -> Option<PathBuf> {
    paths_from_drop(text).into_iter().next()
}

fn token_to_path(token: &str) -> PathBuf {
    if token.starts_with("file://") {
        if let Ok(path) = url::Url::parse(token).and_then(|u| {
            u.to_file_path().map_err(|_| url::ParseError::RelativeUrlWithoutBase)
        }) {
            return path;
        }
    }
    PathBuf::from(token)
}
