/// Folder name for a backed-up thing: every character outside `[A-Za-z0-9]`
/// is dropped and the rest is lower-cased.
pub fn normalize_folder_name(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Local filename for a downloaded asset. Only the final component of the
/// display name is kept so it cannot escape the target directory.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let name = name.trim().rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}
