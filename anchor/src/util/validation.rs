// src/util/validation.rs

/// Checks that `name` can be used as an anchor name.
///
/// Names are passed around as bare shell words by the shell integration, so they must be
/// non-empty and free of whitespace and path separators.
pub fn validate_anchor_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("anchor name must not be empty".to_string());
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_whitespace() || *c == '/' || *c == std::path::MAIN_SEPARATOR)
    {
        return Err(format!(
            "anchor name '{}' must not contain {:?}",
            name, c
        ));
    }
    if name.starts_with('-') {
        return Err(format!("anchor name '{}' must not start with '-'", name));
    }
    Ok(())
}
