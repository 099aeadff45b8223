//! Upload validation: content-type allowlists and size ceilings.
//!
//! Pure functions, no I/O. Content-type comparison strips parameters
//! (`image/png; charset=binary` matches `image/png`) so parameter
//! variations cannot bypass the allowlist.

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Content-Type header is missing or empty")]
    MissingContentType,

    #[error("Unsupported media type: {content_type} (accepted: {accepted})")]
    UnsupportedMediaType {
        content_type: String,
        accepted: String,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,
}

/// Strip parameters from a MIME type (`image/jpeg; q=1` -> `image/jpeg`).
fn normalize_media_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate a raw Content-Type header value against an accepted set.
///
/// Returns the normalized media type on success. A missing or empty
/// header is a distinct error from an unparseable or unaccepted one.
pub fn validate_media_type(
    raw: Option<&str>,
    accepted: &[&str],
) -> Result<String, ValidationError> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(ValidationError::MissingContentType),
    };

    let normalized = normalize_media_type(raw).to_lowercase();

    let well_formed = matches!(
        normalized.split_once('/'),
        Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty()
    );

    if !well_formed || !accepted.iter().any(|ct| *ct == normalized) {
        return Err(ValidationError::UnsupportedMediaType {
            content_type: raw.to_string(),
            accepted: accepted.join(", "),
        });
    }

    Ok(normalized)
}

/// Validate a payload size against a ceiling. Empty payloads are rejected.
pub fn validate_size(size: usize, max: usize) -> Result<(), ValidationError> {
    if size == 0 {
        return Err(ValidationError::EmptyFile);
    }

    if size > max {
        return Err(ValidationError::FileTooLarge { size, max });
    }

    Ok(())
}
