use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Endpoint returning the full word list as a JSON array of lowercase strings.
pub const WORD_API_URL: &str = "https://random-word-api.herokuapp.com/all";

const FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum WordsError {
    #[error("failed to retrieve words from API: {reason}")]
    SourceUnavailable { reason: String },
    #[error("no words available")]
    EmptySource,
}

/// Immutable word collection fetched once at startup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// The degraded list used when the fetch fails; picks against it
    /// always fail with `EmptySource`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Uniform random pick. Repeats across calls are allowed; each pick is
    /// independent of the ones before it.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, WordsError> {
        self.words
            .choose(rng)
            .map(|w| w.as_str())
            .ok_or(WordsError::EmptySource)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

/// Source of candidate words for a test.
pub trait WordSource {
    fn fetch(&self) -> Result<WordList, WordsError>;
}

/// Production source: one-shot blocking GET against the word API.
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    endpoint: String,
}

impl HttpWordSource {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            endpoint: WORD_API_URL.to_string(),
        }
    }

    pub fn with_endpoint<S: Into<String>>(endpoint: S) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl WordSource for HttpWordSource {
    fn fetch(&self) -> Result<WordList, WordsError> {
        let unavailable = |reason: String| WordsError::SourceUnavailable { reason };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| unavailable(e.to_string()))?;

        let response = client
            .get(&self.endpoint)
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!(
                "server returned {}",
                response.status()
            )));
        }

        response
            .json::<WordList>()
            .map_err(|e| unavailable(e.to_string()))
    }
}
