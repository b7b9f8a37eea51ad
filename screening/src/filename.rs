//! Client filename sanitization.
//!
//! Stored names must never be usable for path traversal: the sanitizer
//! keeps only the final path component, strips control characters, and
//! maps anything outside a conservative character set to `_`.

const MAX_NAME_LEN: usize = 120;

/// Sanitize a client-supplied filename for storage and display.
///
/// The result contains no path separators, no control characters, no
/// leading dots, is at most `MAX_NAME_LEN` bytes, and is never empty.
pub fn sanitize_file_name(name: &str) -> String {
    // Keep only the last path component, whichever separator style the
    // client used.
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let mut cleaned: String = last
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A name of only dots (".", "..") or with a leading dot would be a
    // hidden / relative path on most filesystems.
    while cleaned.starts_with('.') {
        cleaned.remove(0);
    }

    if cleaned.len() > MAX_NAME_LEN {
        cleaned.truncate(MAX_NAME_LEN);
    }

    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
