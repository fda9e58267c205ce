// 🔤 Name Normalizer - canonical comparison keys for talent names
//
// "José Álvarez", " jose alvarez ", "JOSÉ ÁLVAREZ" → all the same talent key.
// Only case, surrounding whitespace and the accented vowels below are folded.
// Internal whitespace and every other character are left untouched.

const ACCENTED: &str = "áàäâãéèëêíìïîóòöôõúùüû";
const PLAIN: &str = "aaaaaeeeeiiiiooooouuuu";

/// Fold a display name into its normalized key.
///
/// - Lowercase
/// - Trim leading/trailing whitespace
/// - Strip accents from vowels (á → a, ü → u, ...)
///
/// # Examples:
/// ```
/// use conectar::normalize;
/// assert_eq!(normalize(" José Álvarez "), "jose alvarez");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    ACCENTED
        .chars()
        .position(|accented| accented == c)
        .and_then(|idx| PLAIN.chars().nth(idx))
        .unwrap_or(c)
}

// ============================================================================
// TESTS
// ============================================================================
