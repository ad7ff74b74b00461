//! Binary-search guesser for the number game.

use crate::core::session::CheckpointData;

/// Player feedback on a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Higher,
    Lower,
}

impl Feedback {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "yes" => Some(Feedback::Correct),
            "higher" => Some(Feedback::Higher),
            "lower" => Some(Feedback::Lower),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Feedback::Correct => "yes",
            Feedback::Higher => "higher",
            Feedback::Lower => "lower",
        }
    }
}

/// Outcome of applying feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Found { guess: u32, attempts: u32 },
    Continue,
    /// Bounds crossed: the answers were inconsistent.
    Exhausted,
}

/// Search state over the closed range `[low, high]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSearch {
    low: u32,
    high: u32,
    attempts: u32,
    last_guess: Option<u32>,
    last_feedback: Option<Feedback>,
}

impl NumberSearch {
    pub fn new(low: u32, high: u32) -> Self {
        Self {
            low,
            high,
            attempts: 0,
            last_guess: None,
            last_feedback: None,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.low, self.high)
    }

    /// Midpoint of the remaining range, or `None` once the range is empty.
    ///
    /// Counts as an attempt only the first time a given guess is offered, so
    /// re-prompting after an unreadable answer is free.
    pub fn next_guess(&mut self) -> Option<u32> {
        if self.low > self.high {
            return None;
        }
        let guess = self.low + (self.high - self.low) / 2;
        if self.last_guess != Some(guess) || self.last_feedback.is_some() {
            self.attempts += 1;
            self.last_guess = Some(guess);
            self.last_feedback = None;
        }
        Some(guess)
    }

    /// Narrow the range around the current guess.
    pub fn apply(&mut self, feedback: Feedback) -> SearchStatus {
        let Some(guess) = self.last_guess else {
            return SearchStatus::Continue;
        };
        self.last_feedback = Some(feedback);
        match feedback {
            Feedback::Correct => {
                return SearchStatus::Found {
                    guess,
                    attempts: self.attempts,
                };
            }
            Feedback::Higher => match guess.checked_add(1) {
                Some(low) => self.low = low,
                None => return SearchStatus::Exhausted,
            },
            Feedback::Lower => match guess.checked_sub(1) {
                Some(high) => self.high = high,
                None => return SearchStatus::Exhausted,
            },
        }
        if self.low > self.high {
            SearchStatus::Exhausted
        } else {
            SearchStatus::Continue
        }
    }

    /// Progress record for `checkpoint_data`.
    pub fn checkpoint(&self) -> CheckpointData {
        CheckpointData::NumberGame {
            min_num: self.low,
            max_num: self.high,
            attempts: self.attempts,
            last_guess: self.last_guess.unwrap_or(self.low),
            last_response: self.last_feedback.map(|f| f.as_str().to_string()),
        }
    }
}
