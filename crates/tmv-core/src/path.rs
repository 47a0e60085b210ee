//! Vault path canonicalization and target path building.
//!
//! Vault paths are always relative to the vault root and use `/` as the
//! separator, whatever the host platform. The vault root itself is `""`.

use crate::normalize::{is_usable_folder_name, normalize_folder_name};

/// Canonicalize a vault path.
///
/// Backslashes become `/`, separator runs collapse, leading and trailing
/// separators are stripped and no-break spaces become plain spaces.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '/' | '\\' => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
            }
            '\u{a0}' | '\u{202f}' => out.push(' '),
            c => out.push(c),
        }
    }
    if out.ends_with('/') {
        out.pop();
    }
    out
}

/// Join a folder and a file name into a canonical vault path.
#[must_use]
pub fn join_path(folder: &str, name: &str) -> String {
    normalize_path(&format!("{folder}/{name}"))
}

/// Compose the folder a note belongs in.
///
/// `main_folder` and `subfolder` are expected to be normalized already; the
/// subfolder is only used when `use_subfolders` is set and it survives
/// normalization. `base_folder` is the user-configured prefix: it is kept
/// as written (it may span several folders) and skipped when it normalizes
/// to nothing. Subfolder and base values made only of dots are skipped too.
#[must_use]
pub fn build_target_path(
    main_folder: &str,
    subfolder: Option<&str>,
    base_folder: &str,
    use_subfolders: bool,
    normalize: bool,
) -> String {
    let mut target = main_folder.to_string();

    if use_subfolders {
        if let Some(sub) = subfolder.map(|s| normalize_folder_name(s, normalize)) {
            if is_usable_folder_name(&sub) {
                target = format!("{target}/{sub}");
            }
        }
    }

    if is_usable_folder_name(&normalize_folder_name(base_folder, normalize)) {
        target = format!("{}/{target}", base_folder.trim());
    }

    normalize_path(&target)
}
