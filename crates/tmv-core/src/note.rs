//! Note handle — a markdown file identified by its vault path.

use std::fmt;

use crate::path::normalize_path;

/// A note in the vault.
///
/// `path` is vault-relative with `/` separators; `name` is its final
/// segment including the extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Note {
    pub path: String,
    pub name: String,
}

impl Note {
    /// Build a note handle from a vault-relative path.
    #[must_use]
    pub fn new(path: &str) -> Self {
        let path = normalize_path(path);
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, name }
    }

    /// The folder holding this note (`""` for the vault root).
    #[must_use]
    pub fn folder(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(folder, _)| folder)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
