use stubby_core::ShortenerError;
use url::Url;

/// Longest URL accepted for shortening, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Checks that `url` is an absolute URL with a scheme and a host.
///
/// Surrounding whitespace is ignored; the returned slice is what gets
/// stored, so resolving the token yields exactly that string.
pub fn validate_url(url: &str) -> Result<&str, ShortenerError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ShortenerError::InvalidUrl(
            "URL cannot be empty".to_string(),
        ));
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must be at most {} bytes, got {}",
            MAX_URL_LENGTH,
            url.len()
        )));
    }

    // the parser strips tab and newlines silently, the stored string would keep them
    if url.chars().any(char::is_control) {
        return Err(ShortenerError::InvalidUrl(
            "URL must not contain control characters".to_string(),
        ));
    }

    let parsed = Url::parse(url)
        .map_err(|e| ShortenerError::InvalidUrl(format!("{}: {}", e, url)))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ShortenerError::InvalidUrl(format!(
            "URL must have a host: {}",
            url
        ))),
    }
}
