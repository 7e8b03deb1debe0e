use once_cell::sync::Lazy;
use regex::Regex;

/// Guess words are reduced to letters only before they reach the service.
static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-zA-Z]").expect("static pattern"));

pub const DEFAULT_TOP_N: usize = 10;

/// The platform-agnostic command surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!new` — reveal the board, discard the round.
    New,
    /// `!guess <word>` or the `$<word>` shorthand.
    Guess(String),
    /// `!hint` — reveal a word at the next narrowing rank.
    Hint,
    /// `!top [n]` — the first `n` leaderboard lines.
    Top(usize),
}

impl Command {
    /// Parse one inbound chat line; `None` for anything that is not a game
    /// command (ordinary conversation is ignored).
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(rest) = text.strip_prefix("!guess") {
            let word = sanitize(rest);
            return (!word.is_empty()).then_some(Command::Guess(word));
        }
        if let Some(rest) = text.strip_prefix('$') {
            let word = sanitize(rest);
            return (!word.is_empty()).then_some(Command::Guess(word));
        }
        if text.starts_with("!new") {
            return Some(Command::New);
        }
        if text.starts_with("!hint") {
            return Some(Command::Hint);
        }
        if text.starts_with("!top") {
            let n = text
                .split_whitespace()
                .nth(1)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_TOP_N);
            return Some(Command::Top(n));
        }
        None
    }
}

fn sanitize(raw: &str) -> String {
    NON_ALPHA.replace_all(raw, "").into_owned()
}
