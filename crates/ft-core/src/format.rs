//! Duration and path formatting shared by every view.

/// Formats seconds as `MM:SS`.
///
/// Minutes are zero-padded to at least two digits and are not capped, so
/// 6000 seconds renders as `100:00`.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Returns the last path segment, splitting on both `/` and `\`.
///
/// Falls back to the full path when the last segment is empty.
pub fn display_name(path: &str) -> &str {
    match path.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}
