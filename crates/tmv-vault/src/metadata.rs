//! Metadata lookup for notes.

use tracing::debug;

use tmv_core::{Metadata, Note};

use crate::frontmatter::parse_metadata;
use crate::storage::LocalVault;

/// Supplies the parsed frontmatter of a note.
pub trait MetadataSource {
    /// Frontmatter of `note`, or `None` if it has none (or cannot be read).
    fn metadata(&self, note: &Note) -> Option<Metadata>;
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn metadata(&self, note: &Note) -> Option<Metadata> {
        (**self).metadata(note)
    }
}

/// Reads frontmatter straight from the note files of a [`LocalVault`].
#[derive(Debug, Clone)]
pub struct FrontmatterSource {
    vault: LocalVault,
}

impl FrontmatterSource {
    #[must_use]
    pub fn new(vault: LocalVault) -> Self {
        Self { vault }
    }
}

impl MetadataSource for FrontmatterSource {
    fn metadata(&self, note: &Note) -> Option<Metadata> {
        let content = match self.vault.read(&note.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(note = %note, error = %e, "note not readable");
                return None;
            }
        };
        match parse_metadata(&content) {
            Ok(meta) => meta,
            Err(e) => {
                debug!(note = %note, error = %e, "frontmatter not parsable");
                None
            }
        }
    }
}
