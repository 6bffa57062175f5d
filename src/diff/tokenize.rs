/// Splits text into alternating runs of whitespace and non-whitespace.
///
/// Joining the tokens reproduces the input byte for byte; no token is empty.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0usize;
    let mut in_space: Option<bool> = None;

    for (index, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if let Some(previous) = in_space {
            if previous != space {
                tokens.push(&text[start..index]);
                start = index;
            }
        }
        in_space = Some(space);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_whitespace_runs_as_tokens() {
        assert_eq!(
            tokenize("  hello\tbig \n world"),
            vec!["  ", "hello", "\t", "big", " \n ", "world"]
        );
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn multibyte_characters_stay_intact() {
        assert_eq!(tokenize("ship it 🚀 #AI"), vec!["ship", " ", "it", " ", "🚀", " ", "#AI"]);
    }
}
