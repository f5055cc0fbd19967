// Marker-based extraction from device HTML and headers.
//
// The switch's firmware emits fixed markup; a two-marker substring
// scan matches its contract exactly.

/// Return the substring of `haystack` strictly between `start` and `end`.
///
/// `end` is searched only after the first occurrence of `start`.
/// Returns `None` when either marker is absent.
pub(crate) fn between<'a>(haystack: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = haystack.find(start)? + start.len();
    let rest = &haystack[from..];
    let to = rest.find(end)?;
    Some(&rest[..to])
}

/// Extract the login challenge token from login page markup.
pub(crate) fn extract_challenge(page: &str) -> Option<String> {
    between(page, "name=\"Challenge\" value=\"", "\">").map(str::to_owned)
}

/// Extract the `DLILPC` session cookie value from a `Set-Cookie` header.
pub(crate) fn extract_session_cookie(header: &str) -> Option<String> {
    between(header, "DLILPC=\"", "\"").map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn between_returns_inner_substring() {
        assert_eq!(between("a[inner]b", "[", "]"), Some("inner"));
    }

    #[test]
    fn between_missing_start_marker() {
        assert_eq!(between("no markers here", "[", "]"), None);
    }

    #[test]
    fn between_missing_end_marker() {
        assert_eq!(between("a[inner b", "[", "]"), None);
    }

    #[test]
    fn between_end_marker_only_searched_after_start() {
        // The `]` before `[` must not terminate the scan early.
        assert_eq!(between("]x[inner]", "[", "]"), Some("inner"));
    }

    #[test]
    fn between_empty_match() {
        assert_eq!(between("[]", "[", "]"), Some(""));
    }

    #[test]
    fn challenge_extracted_from_login_page() {
        let page = r#"<form><input type="hidden" name="Challenge" value="XYZ123"></form>"#;
        assert_eq!(extract_challenge(page).as_deref(), Some("XYZ123"));
    }

    #[test]
    fn challenge_absent_when_marker_missing() {
        assert_eq!(extract_challenge("<html>no challenge</html>"), None);
        // Start marker present, closing `">` absent.
        assert_eq!(extract_challenge(r#"name="Challenge" value="XYZ"#), None);
    }

    #[test]
    fn session_cookie_extracted_from_header() {
        assert_eq!(
            extract_session_cookie(r#"DLILPC="abc456"; Path=/"#).as_deref(),
            Some("abc456")
        );
    }

    #[test]
    fn session_cookie_absent_for_other_cookies() {
        assert_eq!(extract_session_cookie("SESSIONID=abc456; Path=/"), None);
    }
}
