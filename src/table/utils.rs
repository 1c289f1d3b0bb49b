/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Cleaned field value, `None` when nothing is left.
pub fn clean_field(raw: &str) -> Option<&str> {
    let cleaned = clean_str(raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Header names sometimes carry a UTF-8 byte-order mark on the first cell.
pub fn clean_header(raw: &str) -> String {
    clean_str(raw.trim_start_matches('\u{feff}')).to_string()
}
