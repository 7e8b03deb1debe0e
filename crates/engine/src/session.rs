use crate::error::{EngineError, Result};
use crate::similarity::cosine_similarity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference similarity bounds for the target word's distribution, supplied
/// by the external service when the round starts. `top` is the similarity of
/// the closest known neighbor, `rest` the typical similarity of unrelated
/// words; the formatter rescales raw cosine values against this interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoryStats {
    pub top: f32,
    pub rest: f32,
}

/// What the external similarity lookup returns for one word: its vector and,
/// when the service has one precomputed, its percentile rank from the target
/// (1–1000, 1 = closest). Absence of a rank means "too dissimilar to rank".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResult {
    pub vector: Vec<f32>,
    pub percentile: Option<u16>,
}

/// Cached result for one distinct guessed word within a session.
///
/// `vector`, `similarity` and `percentile` are computed exactly once, when
/// the word is first guessed; later duplicate guesses reuse them untouched.
/// `by` names the first player credited with the guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: String,
    pub vector: Vec<f32>,
    pub similarity: f32,
    pub percentile: Option<u16>,
    pub by: Option<String>,
}

/// Live game state for one channel: the hidden target word, every word
/// guessed so far, and the story stats drawn when the round started.
///
/// `target` and `story` are immutable for the session's lifetime; the guess
/// map only grows and individual records are write-once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    target: String,
    guesses: HashMap<String, GuessRecord>,
    story: StoryStats,
}

impl Session {
    /// Start a round. The target's own record is seeded here with the
    /// self-similarity maximum of 1.0 rather than recomputed on a later
    /// guess; its percentile is whatever the service reported for the word
    /// against itself.
    pub fn new(target: impl Into<String>, seed: LookupResult, story: StoryStats) -> Self {
        let target = target.into();
        let record = GuessRecord {
            word: target.clone(),
            vector: seed.vector,
            similarity: 1.0,
            percentile: seed.percentile,
            by: None,
        };
        let mut guesses = HashMap::new();
        guesses.insert(target.clone(), record);
        Self {
            target,
            guesses,
            story,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn story(&self) -> &StoryStats {
        &self.story
    }

    pub fn guess(&self, word: &str) -> Option<&GuessRecord> {
        self.guesses.get(word)
    }

    pub fn is_guessed(&self, word: &str) -> bool {
        self.guesses.contains_key(word)
    }

    pub fn is_win(&self, word: &str) -> bool {
        self.target == word
    }

    /// Number of distinct words scored so far, the target included.
    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &GuessRecord> {
        self.guesses.values()
    }

    /// Record a freshly looked-up word. Duplicate guesses are a no-op: the
    /// cached record keeps its similarity and percentile, so calling this
    /// twice for the same word never changes what the first call computed.
    pub fn add_guess(&mut self, word: &str, result: LookupResult) -> Result<()> {
        if self.guesses.contains_key(word) {
            return Ok(());
        }

        let target_record = self
            .guesses
            .get(&self.target)
            .ok_or_else(|| EngineError::UnknownWord(self.target.clone()))?;
        let similarity = cosine_similarity(&target_record.vector, &result.vector)?;

        log::debug!("scored '{word}': similarity={similarity:.4} percentile={:?}", result.percentile);

        self.guesses.insert(
            word.to_string(),
            GuessRecord {
                word: word.to_string(),
                vector: result.vector,
                similarity,
                percentile: result.percentile,
                by: None,
            },
        );
        Ok(())
    }

    /// Credit `actor` with the guess if nobody has claimed it yet. The first
    /// claim wins; later duplicate guesses by other players leave it alone.
    pub fn claim(&mut self, word: &str, actor: &str) -> Result<()> {
        let record = self
            .guesses
            .get_mut(word)
            .ok_or_else(|| EngineError::UnknownWord(word.to_string()))?;
        if record.by.is_none() {
            record.by = Some(actor.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn story() -> StoryStats {
        StoryStats {
            top: 0.9,
            rest: 0.3,
        }
    }

    fn session() -> Session {
        Session::new(
            "kite",
            LookupResult {
                vector: vec![1.0, 0.0],
                percentile: Some(1000),
            },
            story(),
        )
    }

    #[test]
    fn test_target_seeded_at_max_similarity() {
        let s = session();
        let target = s.guess("kite").unwrap();
        assert_eq!(target.similarity, 1.0);
        assert_eq!(target.percentile, Some(1000));
        assert_eq!(target.by, None);
        assert!(s.is_guessed("kite"));
        assert!(s.is_win("kite"));
    }

    #[test]
    fn test_add_guess_computes_similarity_against_target() {
        let mut s = session();
        s.add_guess(
            "string",
            LookupResult {
                vector: vec![0.0, 1.0],
                percentile: Some(900),
            },
        )
        .unwrap();
        let rec = s.guess("string").unwrap();
        assert!(rec.similarity.abs() < 1e-6);
        assert_eq!(rec.percentile, Some(900));
    }

    #[test]
    fn test_duplicate_guess_is_write_once() {
        let mut s = session();
        s.add_guess(
            "string",
            LookupResult {
                vector: vec![1.0, 1.0],
                percentile: Some(700),
            },
        )
        .unwrap();
        let first = s.guess("string").unwrap().clone();

        // A second lookup result for the same word must not overwrite anything.
        s.add_guess(
            "string",
            LookupResult {
                vector: vec![-1.0, 0.0],
                percentile: Some(2),
            },
        )
        .unwrap();
        let second = s.guess("string").unwrap();
        assert_eq!(second.similarity, first.similarity);
        assert_eq!(second.percentile, first.percentile);
        assert_eq!(second.vector, first.vector);
    }

    #[test]
    fn test_claim_is_first_writer_wins() {
        let mut s = session();
        s.add_guess(
            "string",
            LookupResult {
                vector: vec![1.0, 1.0],
                percentile: None,
            },
        )
        .unwrap();

        s.claim("string", "alice").unwrap();
        s.claim("string", "bob").unwrap();
        assert_eq!(s.guess("string").unwrap().by.as_deref(), Some("alice"));
    }

    #[test]
    fn test_claim_unknown_word() {
        let mut s = session();
        assert!(matches!(
            s.claim("zeppelin", "alice"),
            Err(EngineError::UnknownWord(_))
        ));
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let mut s = session();
        s.add_guess(
            "string",
            LookupResult {
                vector: vec![0.6, 0.8],
                percentile: Some(950),
            },
        )
        .unwrap();
        s.claim("string", "alice").unwrap();

        let raw = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.target(), "kite");
        assert_eq!(back.guess_count(), 2);
        assert_eq!(back.guess("string").unwrap().by.as_deref(), Some("alice"));
    }
}
