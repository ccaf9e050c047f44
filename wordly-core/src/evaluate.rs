use std::collections::HashMap;

use wordly_types::LetterStatus;

/// Score one guess against the secret word.
///
/// Two passes: exact position matches first, then left-to-right presence
/// checks against a per-letter count of the secret's unmatched letters. A
/// duplicated guess letter is marked `Present` only as many times as it
/// remains unmatched in the secret.
///
/// The caller guarantees `guess` and `secret` have the same length.
pub fn evaluate(guess: &str, secret: &str) -> Vec<LetterStatus> {
    let guess: Vec<char> = guess.chars().collect();
    let secret: Vec<char> = secret.chars().collect();
    debug_assert_eq!(guess.len(), secret.len());

    let mut statuses = vec![LetterStatus::Absent; guess.len()];
    let mut remaining: HashMap<char, u32> = HashMap::new();

    for (i, (&g, &s)) in guess.iter().zip(secret.iter()).enumerate() {
        if g == s {
            statuses[i] = LetterStatus::Correct;
        } else {
            *remaining.entry(s).or_insert(0) += 1;
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if statuses[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&g) {
            if *count > 0 {
                statuses[i] = LetterStatus::Present;
                *count -= 1;
            }
        }
    }

    statuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordly_types::LetterStatus::{Absent, Correct, Present};

    #[test]
    fn exact_match_is_all_correct() {
        assert_eq!(evaluate("CRATE", "CRATE"), vec![Correct; 5]);
    }

    #[test]
    fn disjoint_letters_are_all_absent() {
        assert_eq!(evaluate("BUMPY", "CRATE"), vec![Absent; 5]);
    }

    #[test]
    fn off_position_letters_are_present() {
        // CRATE reordered: every letter exists, none line up
        assert_eq!(evaluate("REACT", "CRATE"), vec![Present; 5]);
    }

    #[test]
    fn duplicate_letters_consume_remaining_counts() {
        // SPEED holds two off-position Es, so both Es in ERASE are
        // present; the lone S matches once and R/A never appear.
        assert_eq!(
            evaluate("ERASE", "SPEED"),
            vec![Present, Absent, Absent, Present, Present]
        );
    }

    #[test]
    fn positional_match_spends_the_letter_first() {
        // CRATE has a single E, already matched in place at the end, so
        // the two leading Es score nothing.
        assert_eq!(
            evaluate("EERIE", "CRATE"),
            vec![Absent, Absent, Present, Absent, Correct]
        );
    }

    #[test]
    fn guess_with_more_duplicates_than_secret() {
        // HELLO has two Ls; only the first two Ls of LLAMA can be present.
        assert_eq!(
            evaluate("LLAMA", "HELLO"),
            vec![Present, Present, Absent, Absent, Absent]
        );
    }
}
