//! # Semantle Client
//!
//! Narrow async interfaces to the external word-similarity service, plus the
//! HTTP implementation against a Semantle-compatible server.
//!
//! The engine never talks to the network directly; everything goes through
//! [`WordService`], so tests can substitute a canned implementation.

mod error;
mod http;

pub use error::{ClientError, Result};
pub use http::{SemantleClient, DEFAULT_BASE_URL};

use async_trait::async_trait;
use semantle_engine::{LookupResult, StoryStats};

/// The three lookups a game round needs.
#[async_trait]
pub trait WordService: Send + Sync {
    /// Vector and optional percentile rank for `guess` relative to `target`.
    /// Fails with [`ClientError::InvalidWord`] when the service does not
    /// recognize the guess.
    async fn fetch_vector(&self, target: &str, guess: &str) -> Result<LookupResult>;

    /// Reference similarity bounds for `target`'s neighborhood.
    async fn fetch_story_stats(&self, target: &str) -> Result<StoryStats>;

    /// The word at percentile `rank` from `target` (1 = closest neighbor).
    async fn fetch_nth_nearby(&self, target: &str, rank: u16) -> Result<String>;
}
