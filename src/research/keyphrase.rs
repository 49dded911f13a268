//! Word tokenization and keyphrase matching

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’-][\p{L}\p{N}]+)*").expect("valid word regex")
});

/// Lowercased words of a plain-text string, in order
pub fn words(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase().replace('’', "'"))
        .collect()
}

/// A keyphrase (or synonym) reduced to its lowercased words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyphrase {
    words: Vec<String>,
}

impl Keyphrase {
    pub fn new(phrase: &str) -> Self {
        Self {
            words: words(phrase),
        }
    }

    /// The keyphrase plus every synonym, skipping empty ones
    pub fn topic(keyword: &str, synonyms: &[&str]) -> Vec<Self> {
        std::iter::once(keyword)
            .chain(synonyms.iter().copied())
            .map(Self::new)
            .filter(|k| !k.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Start positions (word indices) of every exact occurrence in `tokens`
    pub fn positions_in(&self, tokens: &[String]) -> Vec<usize> {
        let n = self.words.len();
        if n == 0 || tokens.len() < n {
            return Vec::new();
        }
        (0..=tokens.len() - n)
            .filter(|&i| tokens[i..i + n] == self.words[..])
            .collect()
    }

    /// Number of exact occurrences in plain text
    pub fn count_in(&self, text: &str) -> usize {
        self.positions_in(&words(text)).len()
    }

    /// Whether the exact phrase occurs in plain text
    pub fn occurs_in(&self, text: &str) -> bool {
        self.count_in(text) > 0
    }

    /// Whether every word of the keyphrase occurs somewhere in plain text
    pub fn all_words_in(&self, text: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        let tokens = words(text);
        self.words.iter().all(|w| tokens.contains(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(
            words("It’s a well-known, tried & tested fact: 42 apples."),
            vec!["it's", "a", "well-known", "tried", "tested", "fact", "42", "apples"]
        );
        assert!(words(" -- ... ").is_empty());
    }

    #[test]
    fn test_positions() {
        let tokens = words("This is a keyword and a keyword. Keyword planner");
        let keyphrase = Keyphrase::new("Keyword");
        assert_eq!(keyphrase.positions_in(&tokens), vec![3, 6, 7]);

        let multi = Keyphrase::new("keyword planner");
        assert_eq!(multi.positions_in(&tokens), vec![7]);
    }

    #[test]
    fn test_no_partial_word_match() {
        assert_eq!(Keyphrase::new("key").count_in("keyword keys key"), 1);
    }

    #[test]
    fn test_topic_skips_empty() {
        let topic = Keyphrase::topic("seo tips", &["", "search tips", "--"]);
        assert_eq!(topic.len(), 2);
        assert_eq!(topic[1].words(), &["search".to_string(), "tips".to_string()]);
    }

    #[test]
    fn test_all_words_in() {
        let keyphrase = Keyphrase::new("red shoes");
        assert!(keyphrase.all_words_in("Shoes that are red"));
        assert!(!keyphrase.all_words_in("Red boots"));
        assert!(!Keyphrase::new("").all_words_in("anything"));
    }
}
