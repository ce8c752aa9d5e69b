/// Trimmed name, or `None` when nothing is left.
pub fn clean_display_name(input: Option<&str>) -> Option<String> {
    let trimmed = input?.trim();

    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Slugs arrive from URLs; surrounding whitespace and slashes are ignored.
pub fn normalize_slug(input: &str) -> String {
    input.trim().trim_matches('/').to_string()
}
