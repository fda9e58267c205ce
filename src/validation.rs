// ✅ Input validation for the text interface
// Checks run before user input reaches the agency.

use crate::loader::has_extension;
use std::path::Path;

pub fn has_whitespace(text: &str) -> bool {
    text.chars().any(char::is_whitespace)
}

/// A load path must have no whitespace, exist, and be a directory or a
/// file ending in `.{extension}`
pub fn is_valid_load_path(path: &str, extension: &str) -> bool {
    if path.is_empty() || has_whitespace(path) {
        return false;
    }

    let path = Path::new(path);
    if !path.exists() {
        return false;
    }

    path.is_dir() || has_extension(path, extension)
}

/// Talent names: not blank, letters and spaces only (accented letters allowed)
pub fn is_valid_talent_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_alphabetic() || c == ' ')
}
