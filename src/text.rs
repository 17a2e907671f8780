//! Sentence and word tokenization for the readability statistics.

/// Split text into sentences on terminal punctuation (`.`, `!`, `?`).
/// Runs of terminators count as one boundary; empty fragments are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    fn clean(fragment: &str) -> &str {
        fragment.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '!' | '?'))
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut in_terminator = false;

    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            in_terminator = true;
        } else if in_terminator {
            let sentence = clean(&text[start..i]);
            if sentence.chars().any(char::is_alphanumeric) {
                sentences.push(sentence);
            }
            start = i;
            in_terminator = false;
        }
    }

    let tail = clean(&text[start..]);
    if tail.chars().any(char::is_alphanumeric) {
        sentences.push(tail);
    }

    sentences
}

/// Split text into words: maximal runs of alphanumeric characters,
/// apostrophes and hyphens kept inside a word.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("This is one. This is two! Is this three?");
        assert_eq!(s, vec!["This is one", "This is two", "Is this three"]);
    }

    #[test]
    fn test_split_sentences_run_of_terminators() {
        let s = split_sentences("Wait... what? Yes.");
        assert_eq!(s, vec!["Wait", "what", "Yes"]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  ...  ").is_empty());
    }

    #[test]
    fn test_split_words() {
        let w = split_words("It's a well-known fact, isn't it?");
        assert_eq!(w, vec!["It's", "a", "well-known", "fact", "isn't", "it"]);
    }

    #[test]
    fn test_split_words_skips_punctuation_only() {
        assert!(split_words("-- ... ''").is_empty());
    }
}
