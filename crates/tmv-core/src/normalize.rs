//! Folder-name normalization.
//!
//! Turns an arbitrary frontmatter value into a single folder segment that is
//! safe on every filesystem the vault may live on.

/// Characters that are illegal in a path segment on at least one platform.
const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Normalize a raw property value into a folder name.
///
/// With `enabled == false` the value is only trimmed. Otherwise it is
/// lowercased and trimmed, illegal and control characters are dropped,
/// whitespace runs become a single `-`, hyphen runs collapse and outer
/// hyphens are stripped.
///
/// The result may be empty, which callers treat as "no usable folder name".
/// See [`is_usable_folder_name`].
#[must_use]
pub fn normalize_folder_name(raw: &str, enabled: bool) -> String {
    if !enabled {
        return raw.trim().to_string();
    }

    let lowered = raw.to_lowercase();
    let cleaned: String = lowered
        .trim()
        .chars()
        .filter(|c| !c.is_control() && !ILLEGAL.contains(c))
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    let mut pending_hyphen = false;
    for c in cleaned.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
            continue;
        }
        if pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        pending_hyphen = false;
        out.push(c);
    }

    out
}

/// Whether a normalized name can stand as a folder segment.
///
/// Empty names and names made only of dots (`.`, `..`) would resolve to the
/// parent folder or above, so they never count.
#[must_use]
pub fn is_usable_folder_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().all(|c| c == '.')
}
