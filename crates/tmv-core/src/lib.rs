//! # tmv-core
//!
//! Core types and pure transforms for topic-mover.
//!
//! This crate holds everything that does not touch the vault:
//! - [`Settings`] and its on-disk [`SettingsStore`]
//! - [`normalize_folder_name`] — metadata value to folder segment
//! - [`build_target_path`] and the [`normalize_path`] canonicalizer
//! - [`PropertyValue`] / [`Metadata`] — frontmatter values as seen by the mover
//! - [`Note`] — a vault-relative note handle
//! - Error hierarchy ([`TmvError`])

pub mod error;
pub mod normalize;
pub mod note;
pub mod path;
pub mod settings;
pub mod value;

pub use error::{Result, TmvError};
pub use normalize::{is_usable_folder_name, normalize_folder_name};
pub use note::Note;
pub use path::{build_target_path, join_path, normalize_path};
pub use settings::{SettingKey, Settings, SettingsStore};
pub use value::{Metadata, PropertyValue};
