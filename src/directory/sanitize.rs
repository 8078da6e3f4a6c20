//! File-name sanitization for resource names.

/// Longest file stem, in characters, that [`sanitize`] produces.
pub const MAX_NAME_LENGTH: usize = 200;

/// Turns a resource name into a file stem that is safe on common
/// filesystems.
///
/// Alphanumerics, `-`, `_` and `.` are kept, every other character is
/// dropped. Whitespace runs collapse to a single space, and leading or
/// trailing dots and spaces are trimmed. Sanitizing a sanitized name returns
/// it unchanged.
pub fn sanitize(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_' | '.'))
        .collect();

    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(MAX_NAME_LENGTH).collect();

    truncated
        .trim_matches(|c: char| c == '.' || c == ' ')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("My Client", "My Client")]
    #[case("My Client!", "My Client")]
    #[case("  spaced \t out\n name ", "spaced out name")]
    #[case("a/b\\c:d*e?f\"g<h>i|j", "abcdefghij")]
    #[case("..hidden", "hidden")]
    #[case("trailing. . ", "trailing")]
    #[case("Ünïcödé app", "Ünïcödé app")]
    #[case("v1.2_api-client", "v1.2_api-client")]
    #[case("!!!", "")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "x".repeat(MAX_NAME_LENGTH + 50);
        assert_eq!(sanitize(&long).chars().count(), MAX_NAME_LENGTH);
    }

    #[rstest]
    #[case("My Client!")]
    #[case("  a . b  ")]
    #[case(". .x")]
    #[case("name with   spaces and / slashes")]
    fn test_sanitize_is_idempotent(#[case] input: &str) {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_sanitize_is_idempotent_across_truncation() {
        let name = format!("{} tail", "y".repeat(MAX_NAME_LENGTH - 1));
        let once = sanitize(&name);
        assert_eq!(sanitize(&once), once);
    }
}
