//! # Semantle Engine
//!
//! Per-channel game state for a Semantle-style word-guessing game.
//!
//! ## Features
//!
//! - **Cosine similarity** between word vectors supplied by an external
//!   similarity service
//! - **Write-once guess records** with first-guesser attribution
//! - **Leaderboard ranking** ordered by similarity to the hidden target
//! - **Hint narrowing** that converges repeated hints toward the target
//! - **Fixed-width presentation** with hot/cold tier symbols
//!
//! ## Architecture
//!
//! ```text
//! LookupResult (vector, percentile)
//!     │
//!     ├──> Session::add_guess
//!     │      └─> cosine_similarity(target, guess)
//!     │
//!     ├──> Session::leaderboard / next_hint_rank
//!     │
//!     └──> format::guess_line / win_line / top_block
//! ```
//!
//! The engine is pure: all I/O (similarity lookups, persistence, chat
//! transport) lives in the surrounding crates.

mod error;
mod rank;
mod session;
mod similarity;
mod words;

pub mod format;

pub use error::{EngineError, Result};
pub use session::{GuessRecord, LookupResult, Session, StoryStats};
pub use similarity::cosine_similarity;
pub use words::WordList;

/// Synthetic actor credited with guesses produced by the hint flow.
pub const HINT_ACTOR: &str = "hint";
