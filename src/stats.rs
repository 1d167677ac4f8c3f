/// Immutable snapshot of a finished session, derived once at session end
/// and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Results {
    pub total_words: usize,
    pub correct_words: usize,
    pub incorrect_words: usize,
    pub accuracy_percent: f64,
}

/// Derive results from the session counters. Pure; an empty transcript is
/// defined as 100% accurate rather than dividing by zero.
pub fn summarize(total_words: usize, correct: usize, incorrect: usize) -> Results {
    let accuracy_percent = if total_words == 0 {
        100.0
    } else {
        correct as f64 / total_words as f64 * 100.0
    };

    Results {
        total_words,
        correct_words: correct,
        incorrect_words: incorrect,
        accuracy_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript_is_fully_accurate() {
        let results = summarize(0, 0, 0);

        assert_eq!(results.total_words, 0);
        assert_eq!(results.accuracy_percent, 100.0);
    }

    #[test]
    fn all_correct() {
        let results = summarize(4, 4, 0);

        assert_eq!(results.correct_words, 4);
        assert_eq!(results.incorrect_words, 0);
        assert_eq!(results.accuracy_percent, 100.0);
    }

    #[test]
    fn mixed_outcomes() {
        let results = summarize(4, 3, 1);

        assert_eq!(results.accuracy_percent, 75.0);
    }

    #[test]
    fn forced_append_dilutes_accuracy() {
        // One correct, one incorrect, plus the unclassified end-of-timer
        // append: three total words but only one correct.
        let results = summarize(3, 1, 1);

        assert_eq!(results.total_words, 3);
        assert!((results.accuracy_percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn all_incorrect() {
        let results = summarize(2, 0, 2);

        assert_eq!(results.accuracy_percent, 0.0);
    }
}
