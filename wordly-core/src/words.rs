use rand::seq::SliceRandom;

/// Word used when no candidate pool is available.
pub const FALLBACK_WORD: &str = "CRATE";

/// Uppercase a raw word and strip every non-letter character. Returns
/// `None` when nothing remains.
pub fn sanitize_word(raw: &str) -> Option<String> {
    let word: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(|c| c.to_uppercase())
        .collect();
    if word.is_empty() { None } else { Some(word) }
}

/// Pool of candidate `(word, definition)` pairs for new games, parsed
/// from `WORD<space>definition` lines.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    candidates: Vec<(String, String)>,
}

impl WordPool {
    /// Parse candidate lines. Blank lines and lines whose word sanitizes
    /// to nothing are skipped.
    pub fn parse(text: &str) -> Self {
        let candidates = text
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() {
                    return None;
                }
                let (raw_word, definition) = match line.split_once(' ') {
                    Some((word, rest)) => (word, rest.trim()),
                    None => (line, ""),
                };
                sanitize_word(raw_word).map(|word| (word, definition.to_string()))
            })
            .collect();
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Pick a uniform-random candidate. An empty pool falls back to
    /// [`FALLBACK_WORD`] with an empty definition so the game can always
    /// start.
    pub fn choose(&self) -> (String, String) {
        match self.candidates.choose(&mut rand::thread_rng()) {
            Some((word, definition)) => (word.clone(), definition.clone()),
            None => {
                tracing::warn!("candidate word pool is empty, using fallback word");
                (FALLBACK_WORD.to_string(), String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_word_and_definition() {
        let pool = WordPool::parse("crate A storage container.\n");
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.choose(), ("CRATE".to_string(), "A storage container.".to_string()));
    }

    #[test]
    fn word_without_definition_is_accepted() {
        let pool = WordPool::parse("spore");
        assert_eq!(pool.choose(), ("SPORE".to_string(), String::new()));
    }

    #[test]
    fn sanitizes_words_to_uppercase_letters() {
        assert_eq!(sanitize_word("  c++ "), Some("C".to_string()));
        assert_eq!(sanitize_word("don't"), Some("DONT".to_string()));
        assert_eq!(sanitize_word("1234"), None);
        assert_eq!(sanitize_word("   "), None);
    }

    #[test]
    fn skips_lines_with_no_letters() {
        let pool = WordPool::parse("123 not a word\n\n   \nvalid A real word.\n");
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.choose().0, "VALID");
    }

    #[test]
    fn empty_pool_falls_back_to_default() {
        let pool = WordPool::parse("");
        assert!(pool.is_empty());
        assert_eq!(pool.choose(), (FALLBACK_WORD.to_string(), String::new()));
    }

    #[test]
    fn choose_only_returns_pool_members() {
        let pool = WordPool::parse("alpha first\nbravo second\ndelta third\n");
        for _ in 0..20 {
            let (word, _) = pool.choose();
            assert!(["ALPHA", "BRAVO", "DELTA"].contains(&word.as_str()));
        }
    }
}
