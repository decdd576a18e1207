//! Upload boundary helpers: filename sanitization and extension checks.

use crate::extraction::SUPPORTED_EXTENSIONS;

/// Reduces a client-supplied filename to a safe basename.
///
/// Directory components are dropped, anything outside `[A-Za-z0-9._-]`
/// becomes `_`, and leading dots are stripped so the result is never hidden
/// or a traversal segment. May return an empty string.
pub fn sanitize_filename(raw: &str) -> String {
    let basename = raw.rsplit(&['/', '\\'][..]).next().unwrap_or("");
    let cleaned: String = basename
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Lowercase extension of `filename` if it is one the extractor supports.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
