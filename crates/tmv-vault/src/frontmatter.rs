//! YAML frontmatter extraction.
//!
//! Handles the `---` delimited YAML block at the top of a note:
//! ```markdown
//! ---
//! topic: sports
//! subtopic: soccer
//! ---
//!
//! Match report...
//! ```

use serde_yaml::Value;

use tmv_core::error::{Result, TmvError};
use tmv_core::Metadata;

/// Split a note into its raw frontmatter YAML and body.
///
/// Returns `None` when the note does not open with a closed `---` block.
#[must_use]
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let after_first = content.strip_prefix("---")?;
    if !after_first.starts_with(['\r', '\n']) {
        return None;
    }
    let after_first = after_first.trim_start_matches(['\r', '\n']);

    // An empty block closes straight away.
    if let Some(rest) = after_first.strip_prefix("---") {
        return Some(("", strip_line_break(rest)));
    }

    let close_pos = after_first.find("\n---")?;
    let yaml = &after_first[..close_pos];
    let rest = &after_first[close_pos + 4..]; // skip \n---

    Some((yaml, strip_line_break(rest)))
}

fn strip_line_break(rest: &str) -> &str {
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n').unwrap_or(rest)
}

/// Parse the frontmatter of a note.
///
/// Returns `Ok(None)` when the note has no frontmatter or the block is
/// empty.
///
/// # Errors
///
/// Returns [`TmvError::Serialization`] if the block is not valid YAML or is
/// not a mapping.
pub fn parse_metadata(content: &str) -> Result<Option<Metadata>> {
    let Some((yaml, _body)) = split_frontmatter(content) else {
        return Ok(None);
    };
    if yaml.trim().is_empty() {
        return Ok(None);
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| TmvError::Serialization(e.to_string()))?;
    match value {
        Value::Mapping(mapping) => Ok(Some(Metadata::new(mapping))),
        Value::Null => Ok(None),
        _ => Err(TmvError::Serialization(
            "frontmatter is not a key/value mapping".to_string(),
        )),
    }
}
