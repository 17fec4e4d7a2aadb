use crate::error::PortalError;

/// Search terms are cut to this many characters.
pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_SUBTITLE_ID_LENGTH: usize = 64;

/// Turn control characters and whitespace runs into single spaces, trim, and
/// keep at most `max_chars` characters. Errors only when nothing is left.
pub fn sanitize_text(input: &str, max_chars: usize) -> Result<String, PortalError> {
    let collapsed = input
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let sanitized = collapsed
        .chars()
        .take(max_chars)
        .collect::<String>()
        .trim_end()
        .to_string();
    if sanitized.is_empty() {
        return Err(PortalError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Normalise a search term before it is sent upstream.
pub fn validate_search(input: &str) -> Result<String, PortalError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a YTS movie id: a positive decimal integer.
pub fn validate_movie_id(input: &str) -> Result<u64, PortalError> {
    let trimmed = input.trim();
    match trimmed.parse::<u64>() {
        Ok(id) if id > 0 && trimmed.bytes().all(|b| b.is_ascii_digit()) => Ok(id),
        _ => Err(PortalError::InvalidInput(format!(
            "invalid movie id '{}'. Expected a positive integer",
            input
        ))),
    }
}

/// Validate an IMDb title code such as `tt0133093`. Case-insensitive prefix; returns lowercase.
pub fn validate_imdb_code(input: &str) -> Result<String, PortalError> {
    let lower = input.trim().to_lowercase();
    let valid = lower
        .strip_prefix("tt")
        .map(|digits| {
            !digits.is_empty() && digits.len() <= 12 && digits.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap_or(false);
    if valid {
        Ok(lower)
    } else {
        Err(PortalError::InvalidInput(format!(
            "invalid IMDb id '{}'. Expected 'tt' followed by digits (e.g. tt0133093)",
            input
        )))
    }
}

/// Validate a Subsource subtitle id: ASCII letters, digits, `-` and `_` only.
pub fn validate_subtitle_id(input: &str) -> Result<String, PortalError> {
    let trimmed = input.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_SUBTITLE_ID_LENGTH
        || !trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(PortalError::InvalidInput(format!(
            "invalid subtitle id '{}'",
            input
        )));
    }
    Ok(trimmed.to_string())
}

/// Lenient positive integer: `None` for absent, zero, negative, or non-numeric input.
pub fn parse_positive(input: Option<&str>) -> Option<u32> {
    input
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_whitespace_is_collapsed() {
        assert_eq!(validate_search("  the\tmatrix \n").unwrap(), "the matrix");
        assert_eq!(validate_search("blade\r\n\u{7}runner").unwrap(), "blade runner");
        assert_eq!(validate_search("in   the   mood").unwrap(), "in the mood");
        assert!(validate_search(" \u{7} ").is_err());
    }

    #[test]
    fn long_search_is_cut_on_a_char_boundary() {
        let title = "千と千尋の神隠し".repeat(5);
        assert_eq!(validate_search(&title).unwrap(), title);

        let long = "千".repeat(MAX_SEARCH_LENGTH + 20);
        let cut = validate_search(&long).unwrap();
        assert_eq!(cut.chars().count(), MAX_SEARCH_LENGTH);
    }

    #[test]
    fn movie_ids() {
        assert_eq!(validate_movie_id("3175").unwrap(), 3175);
        assert_eq!(validate_movie_id(" 42 ").unwrap(), 42);
        assert!(validate_movie_id("0").is_err());
        assert!(validate_movie_id("+5").is_err());
        assert!(validate_movie_id("-5").is_err());
        assert!(validate_movie_id("12abc").is_err());
        assert!(validate_movie_id("../etc").is_err());
    }

    #[test]
    fn imdb_codes() {
        assert_eq!(validate_imdb_code("tt0133093").unwrap(), "tt0133093");
        assert_eq!(validate_imdb_code("TT0133093").unwrap(), "tt0133093");
        assert!(validate_imdb_code("tt").is_err());
        assert!(validate_imdb_code("nm0000206").is_err());
        assert!(validate_imdb_code("tt01/../x").is_err());
    }

    #[test]
    fn subtitle_ids() {
        assert_eq!(validate_subtitle_id("abc-123_X").unwrap(), "abc-123_X");
        assert!(validate_subtitle_id("").is_err());
        assert!(validate_subtitle_id("a/b").is_err());
        assert!(validate_subtitle_id(&"a".repeat(MAX_SUBTITLE_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn positive_numbers() {
        assert_eq!(parse_positive(Some("3")), Some(3));
        assert_eq!(parse_positive(Some(" 20 ")), Some(20));
        assert_eq!(parse_positive(Some("0")), None);
        assert_eq!(parse_positive(Some("-1")), None);
        assert_eq!(parse_positive(Some("ten")), None);
        assert_eq!(parse_positive(None), None);
    }
}
