/// Splits a raw phone field on runs of the delimiters seen in hand-entered
/// records: whitespace, comma, semicolon, vertical bar. Consecutive
/// delimiters collapse; an empty or all-delimiter field yields nothing.
pub fn split_field(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(is_delimiter).filter(|token| !token.is_empty())
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, ',' | ';' | '|')
}

/// Strips every non-ASCII-digit character from a token. May return an empty
/// string; callers skip those.
pub fn extract_digits(token: &str) -> String {
    token.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::{extract_digits, split_field};

    fn tokens(raw: &str) -> Vec<&str> {
        split_field(raw).collect()
    }

    #[test]
    fn split_field_collapses_delimiter_runs() {
        assert_eq!(tokens("a,,b ;; c || d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn split_field_drops_leading_and_trailing_delimiters() {
        assert_eq!(tokens("  , 123 ; "), vec!["123"]);
    }

    #[test]
    fn split_field_handles_empty_and_all_delimiter_input() {
        assert!(tokens("").is_empty());
        assert!(tokens(" ,;| \t ").is_empty());
    }

    #[test]
    fn split_field_treats_tabs_as_delimiters() {
        assert_eq!(tokens("12\t34"), vec!["12", "34"]);
    }

    #[test]
    fn extract_digits_strips_formatting() {
        assert_eq!(extract_digits("+375 (29) 123-45-67"), "375291234567");
        assert_eq!(extract_digits("8-029"), "8029");
    }

    #[test]
    fn extract_digits_keeps_leading_zeros() {
        assert_eq!(extract_digits("029"), "029");
    }

    #[test]
    fn extract_digits_can_be_empty() {
        assert_eq!(extract_digits("тел."), "");
    }
}
