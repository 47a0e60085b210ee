//! Vault storage operations.
//!
//! All paths handed to a [`Storage`] are vault-relative, `/`-separated and
//! canonical (see [`tmv_core::normalize_path`]).

use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use tmv_core::error::{Result, TmvError};
use tmv_core::{normalize_path, Note};

/// What lives at a vault path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    File,
    Folder,
}

/// The storage primitives the mover needs.
pub trait Storage {
    /// Look up the entry at `path`, if any.
    fn resolve(&self, path: &str) -> Option<Entry>;

    /// Create a folder and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created.
    fn create_folder(&self, path: &str) -> Result<()>;

    /// Move a file. Never overwrites an existing destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing, the destination exists or
    /// the rename fails.
    fn rename(&self, from: &str, to: &str) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn resolve(&self, path: &str) -> Option<Entry> {
        (**self).resolve(path)
    }

    fn create_folder(&self, path: &str) -> Result<()> {
        (**self).create_folder(path)
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        (**self).rename(from, to)
    }
}

/// A vault on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    /// Open the vault rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`TmvError::Storage`] if `root` is not a directory.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(TmvError::Storage(format!(
                "vault root {} is not a directory",
                root.display()
            )));
        }
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a vault path to an absolute path, refusing anything that
    /// would leave the vault.
    ///
    /// # Errors
    ///
    /// Returns [`TmvError::InvalidPath`] for `..` escapes or drive prefixes.
    pub fn absolute(&self, path: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        let mut depth = 0usize;
        for component in Path::new(&normalize_path(path)).components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir if depth > 0 => {
                    resolved.pop();
                    depth -= 1;
                }
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(TmvError::InvalidPath(path.to_string()));
                }
            }
        }
        Ok(resolved)
    }

    /// Map an absolute path (e.g. from the watcher) back to a vault path.
    #[must_use]
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rel = match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_path_buf(),
            // Watch backends may report paths through a different prefix
            // (symlinked temp dirs); retry via the canonical parent.
            Err(_) => {
                let parent = path.parent()?.canonicalize().ok()?;
                parent.strip_prefix(&self.root).ok()?.join(path.file_name()?)
            }
        };
        let joined = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        (!joined.is_empty()).then_some(joined)
    }

    /// Every markdown note in the vault, skipping hidden directories.
    #[must_use]
    pub fn notes(&self) -> Vec<Note> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
            .filter_map(|entry| self.relative(entry.path()))
            .map(|rel| Note::new(&rel))
            .collect()
    }

    /// Read a note's contents.
    ///
    /// # Errors
    ///
    /// Returns [`TmvError::Io`] if the note cannot be read.
    pub fn read(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.absolute(path)?)?)
    }
}

impl Storage for LocalVault {
    fn resolve(&self, path: &str) -> Option<Entry> {
        let meta = fs::metadata(self.absolute(path).ok()?).ok()?;
        if meta.is_dir() {
            Some(Entry::Folder)
        } else {
            Some(Entry::File)
        }
    }

    fn create_folder(&self, path: &str) -> Result<()> {
        fs::create_dir_all(self.absolute(path)?)?;
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        let source = self.absolute(from)?;
        let dest = self.absolute(to)?;
        if !source.is_file() {
            return Err(TmvError::Storage(format!("{from} does not exist")));
        }
        if dest.exists() {
            return Err(TmvError::Storage(format!("{to} already exists")));
        }
        fs::rename(&source, &dest)?;
        Ok(())
    }
}

pub(crate) fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

pub(crate) fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
