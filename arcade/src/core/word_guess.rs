//! Word list and candidate narrowing for the word game.

/// Words the player may choose from.
pub const WORDS: [&str; 20] = [
    "apple", "banana", "car", "dog", "elephant", "flower", "guitar", "house", "island", "jungle",
    "kite", "lion", "mountain", "notebook", "ocean", "piano", "queen", "robot", "sunset", "tree",
];

/// Questions asked before the guess, in order.
pub const QUESTIONS: [&str; 5] = [
    "Is it a living thing?",
    "Is it bigger than a breadbox?",
    "Can you hold it in your hand?",
    "Is it found in nature?",
    "Does it make sound?",
];

const LIVING: [&str; 5] = ["dog", "elephant", "flower", "lion", "tree"];

const NOT_LIVING: [&str; 14] = [
    "car", "guitar", "house", "island", "mountain", "notebook", "ocean", "piano", "queen", "robot",
    "sunset", "apple", "banana", "kite",
];

pub fn is_known_word(word: &str) -> bool {
    WORDS.contains(&word)
}

/// Words still worth guessing given the answers so far.
///
/// Only the first ("living thing?") answer narrows the field; a missing or
/// non yes/no answer leaves every word in play.
pub fn candidates(answers: &[String]) -> &'static [&'static str] {
    match answers.first().map(String::as_str) {
        Some("yes") => &LIVING,
        Some("no") => &NOT_LIVING,
        _ => &WORDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_answer_narrows_candidates() {
        assert_eq!(candidates(&["yes".to_string()]), &LIVING);
        assert_eq!(candidates(&["no".to_string(), "yes".to_string()]), &NOT_LIVING);
        assert_eq!(candidates(&["maybe".to_string()]), &WORDS);
        assert_eq!(candidates(&[]), &WORDS);
    }

    #[test]
    fn every_candidate_is_a_known_word() {
        for word in LIVING.iter().chain(NOT_LIVING.iter()) {
            assert!(is_known_word(word), "{word}");
        }
        assert!(!is_known_word("zebra"));
    }
}
