use crate::clock::{ClockEvent, SessionClock};
use crate::stats::{summarize, Results};
use crate::words::WordList;
use thiserror::Error;

/// Fixed test length; there is no way to configure it at launch.
pub const DEFAULT_DURATION_SECS: u32 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no words available to start a test")]
    EmptySource,
    #[error("operation is not valid in the current session phase")]
    InvalidState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// The test-session state machine: Idle -> Running -> Finished, with
/// `start` always resetting back to Running.
///
/// The session owns the transcript, the correct/incorrect counters, and
/// the pending input buffer. The word list stays with the caller and is
/// borrowed only by the operations that draw a word.
#[derive(Debug)]
pub struct TypingSession {
    phase: Phase,
    clock: SessionClock,
    current_word: String,
    input: String,
    transcript: Vec<String>,
    correct: usize,
    incorrect: usize,
    remaining_secs: u32,
    results: Option<Results>,
}

impl Default for TypingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TypingSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            clock: SessionClock::new(),
            current_word: String::new(),
            input: String::new(),
            transcript: Vec::new(),
            correct: 0,
            incorrect: 0,
            remaining_secs: DEFAULT_DURATION_SECS,
            results: None,
        }
    }

    /// Begin a fresh test run. Valid from any phase; a start while Running
    /// cancels the previous clock before any state is reset, so a stale
    /// tick can never leak into the new run.
    ///
    /// Fails with `EmptySource` when the word list has nothing to draw
    /// from, leaving the session untouched.
    ///
    /// Returns the clock generation the caller must stamp tick events
    /// with (see `runtime::spawn_session_clock`).
    pub fn start(
        &mut self,
        duration_secs: u32,
        words: &WordList,
    ) -> Result<u64, SessionError> {
        if words.is_empty() {
            return Err(SessionError::EmptySource);
        }

        self.clock.cancel();
        self.transcript.clear();
        self.correct = 0;
        self.incorrect = 0;
        self.input.clear();
        self.results = None;
        self.remaining_secs = duration_secs;
        self.current_word = self.draw(words)?;

        let generation = self.clock.start(duration_secs);
        self.phase = Phase::Running;
        Ok(generation)
    }

    /// Append a character to the pending input. The input control is
    /// disabled outside Running, so this is a no-op in other phases.
    pub fn type_char(&mut self, c: char) {
        if self.phase == Phase::Running {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.phase == Phase::Running {
            self.input.pop();
        }
    }

    /// Submit the pending input as one typed word (the Enter key).
    ///
    /// The typed text is trimmed, recorded in the transcript, and compared
    /// against the last whitespace-separated token of the displayed text.
    /// The display is treated as possibly multi-token on purpose; matching
    /// against its last token is the original rule, kept as-is.
    pub fn submit(&mut self, words: &WordList) -> Result<(), SessionError> {
        if self.phase != Phase::Running {
            return Err(SessionError::InvalidState);
        }

        let typed = self.input.trim().to_string();
        let expected = self
            .current_word
            .split_whitespace()
            .last()
            .unwrap_or_default();

        if typed == expected {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.transcript.push(typed);
        self.input.clear();

        if self.remaining_secs > 0 {
            self.current_word = self.draw(words)?;
        } else {
            self.end_of_time();
        }
        Ok(())
    }

    /// Feed one raw tick from the runtime's clock thread. Stale ticks
    /// (older generation, or arriving after the session finished) are
    /// discarded by the clock.
    pub fn on_clock_tick(&mut self, generation: u64) {
        if self.phase != Phase::Running {
            return;
        }

        match self.clock.on_tick(generation) {
            Some(ClockEvent::Tick(remaining)) => self.remaining_secs = remaining,
            Some(ClockEvent::Expired) => {
                self.remaining_secs = 0;
                self.end_of_time();
            }
            None => {}
        }
    }

    /// End-of-timer path: whatever sits unsubmitted in the input buffer is
    /// recorded in the transcript without being counted as correct or
    /// incorrect. The original behaved this way; kept unchanged.
    fn end_of_time(&mut self) {
        let leftover = std::mem::take(&mut self.input);
        self.transcript.push(leftover);
        self.finish();
    }

    /// Running -> Finished: stop the clock and freeze the results.
    fn finish(&mut self) {
        self.clock.cancel();
        self.results = Some(summarize(
            self.transcript.len(),
            self.correct,
            self.incorrect,
        ));
        self.phase = Phase::Finished;
    }

    fn draw(&self, words: &WordList) -> Result<String, SessionError> {
        let mut rng = rand::thread_rng();
        words
            .pick_random(&mut rng)
            .map(str::to_string)
            .map_err(|_| SessionError::EmptySource)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    /// Present only once the session has finished.
    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }
}
