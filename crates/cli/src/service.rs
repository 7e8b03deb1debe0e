use crate::command::Command;
use rand::rngs::StdRng;
use rand::SeedableRng;
use semantle_client::{ClientError, WordService};
use semantle_engine::{format, EngineError, Session, WordList, HINT_ACTOR};
use semantle_store::{Coordinator, SessionDb, StoreError};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Leaderboard depth revealed when a round is discarded with `!new`.
const FINAL_TOP_N: usize = 20;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Lookup(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("The secret word list is empty")]
    EmptyWordList,
}

/// One game per channel, every command a single unit of work.
///
/// All session access goes through the coordinator, so the whole
/// read–fetch–merge–write sequence of a command holds the channel's
/// exclusive guard; two guesses racing on one channel both land.
pub struct GameService<D, W> {
    sessions: Coordinator<D>,
    service: Arc<W>,
    words: WordList,
    rng: Mutex<StdRng>,
}

impl<D: SessionDb, W: WordService> GameService<D, W> {
    pub fn new(db: D, service: Arc<W>, words: WordList, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_entropy(),
        };
        Self {
            sessions: Coordinator::new(db),
            service,
            words,
            rng: Mutex::new(rng),
        }
    }

    /// Handle one inbound message. Returns the outbound replies, empty when
    /// the text is not a game command. Failures never escape: every error
    /// becomes a single user-visible line and the session keeps its
    /// pre-command state.
    pub async fn handle(&self, channel: &str, author: &str, text: &str) -> Vec<String> {
        let Some(command) = Command::parse(text) else {
            return Vec::new();
        };

        let outcome = match command {
            Command::New => self.new_game(channel).await,
            Command::Guess(word) => self.guess(channel, author, &word).await,
            Command::Hint => self.hint(channel).await,
            Command::Top(n) => self.top(channel, n).await,
        };

        match outcome {
            Ok(replies) => replies,
            Err(err) => vec![error_reply(&err)],
        }
    }

    /// Start a round: draw a target, seed its self record, fetch its story
    /// stats.
    async fn seed_session(&self) -> Result<Session> {
        let target = {
            let mut rng = self.rng.lock().expect("rng mutex poisoned");
            self.words
                .choose(&mut *rng)
                .ok_or(GameError::EmptyWordList)?
                .to_string()
        };
        let seed = self.service.fetch_vector(&target, &target).await?;
        let story = self.service.fetch_story_stats(&target).await?;
        log::debug!("target word is '{target}'");
        Ok(Session::new(target, seed, story))
    }

    /// Score a word inside the channel guard and credit the actor. Cached
    /// words skip the lookup entirely; only a brand-new word suspends.
    async fn play(&self, session: &mut Session, author: &str, word: &str) -> Result<Vec<String>> {
        if !session.is_guessed(word) {
            let result = self.service.fetch_vector(session.target(), word).await?;
            session.add_guess(word, result)?;
        }
        session.claim(word, author)?;

        let record = session
            .guess(word)
            .ok_or_else(|| EngineError::UnknownWord(word.to_string()))?;
        let mut replies = vec![fenced(&format::guess_line(record, session.story()))];
        if session.is_win(word) {
            replies.push(format::win_line(record));
        }
        Ok(replies)
    }

    async fn guess(&self, channel: &str, author: &str, word: &str) -> Result<Vec<String>> {
        let word = word.to_string();
        let author = author.to_string();
        self.sessions
            .with_session(
                channel,
                || self.seed_session(),
                move |mut session| async move {
                    let replies = self.play(&mut session, &author, &word).await?;
                    Ok((session, replies))
                },
            )
            .await
    }

    async fn hint(&self, channel: &str) -> Result<Vec<String>> {
        self.sessions
            .with_session(
                channel,
                || self.seed_session(),
                |mut session| async move {
                    let rank = session.next_hint_rank();
                    let hint_word = self
                        .service
                        .fetch_nth_nearby(session.target(), rank)
                        .await?;
                    log::debug!("hint at rank {rank} is '{hint_word}'");
                    let replies = self.play(&mut session, HINT_ACTOR, &hint_word).await?;
                    Ok((session, replies))
                },
            )
            .await
    }

    async fn top(&self, channel: &str, n: usize) -> Result<Vec<String>> {
        self.sessions
            .with_session(
                channel,
                || self.seed_session(),
                move |session| async move {
                    let block = fenced(&format::top_block(&session, n));
                    Ok((session, vec![block]))
                },
            )
            .await
    }

    /// Reveal the board and the old target, then leave the channel empty so
    /// the next command draws a fresh word.
    async fn new_game(&self, channel: &str) -> Result<Vec<String>> {
        match self.sessions.take(channel).await? {
            Some(old) => Ok(vec![
                fenced(&format::top_block(&old, FINAL_TOP_N)),
                format!("old word was {}. choosing a new word", old.target()),
            ]),
            None => Ok(vec![
                "no round in progress here. guess a word to start one".to_string(),
            ]),
        }
    }
}

/// Formatted lines travel in code fences so chat clients keep the columns
/// monospaced.
fn fenced(text: &str) -> String {
    format!("```{text} ```")
}

/// The single user-visible line for a failed command.
fn error_reply(err: &GameError) -> String {
    match err {
        GameError::Lookup(ClientError::InvalidWord(word)) => format!("{word} is invalid"),
        _ => {
            log::error!("command failed: {err}");
            "something went wrong, please try again".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_word_reply() {
        let err = GameError::Lookup(ClientError::InvalidWord("qzxv".to_string()));
        assert_eq!(error_reply(&err), "qzxv is invalid");
    }

    #[test]
    fn test_transient_failure_reply_is_generic() {
        let err = GameError::Store(StoreError::Other("disk on fire".to_string()));
        assert_eq!(error_reply(&err), "something went wrong, please try again");
    }

    #[test]
    fn test_fenced_wraps_for_monospace() {
        assert_eq!(fenced("a  b"), "```a  b ```");
    }
}
