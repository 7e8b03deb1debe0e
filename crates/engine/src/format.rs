//! Fixed-width presentation of guesses, wins and leaderboards.
//!
//! Guess lines are meant for monospaced chat blocks: word, rank indicator,
//! rescaled score, truncated attribution, each in a fixed column.

use crate::session::{GuessRecord, Session, StoryStats};

/// Attribution names are cut to this many characters to keep the last column
/// aligned.
const NAME_WIDTH: usize = 6;

fn tier_symbol(percentile: u16) -> char {
    if percentile > 990 {
        '\u{1F534}' // large red circle
    } else if percentile > 900 {
        '\u{1F7E0}' // large orange circle
    } else if percentile > 750 {
        '\u{1F7E1}' // large yellow circle
    } else if percentile > 500 {
        '\u{1F7E2}' // large green circle
    } else {
        '\u{1F535}' // large blue circle
    }
}

/// Remap raw cosine similarity from `[rest, top]` onto `[0.2, 0.9]`, as a
/// percentage rounded to two decimals. Guesses below `rest` read noticeably
/// cold and the target itself lands near 90.
pub fn rescaled_score(similarity: f32, story: &StoryStats) -> f32 {
    let s = 0.2 + 0.7 * (similarity - story.rest) / (story.top - story.rest);
    (100.0 * s * 100.0).round() / 100.0
}

/// One leaderboard line for a guess.
///
/// The rank column shows the percentile with its tier symbol when the
/// service ranked the word, an "unranked but close" marker when the raw
/// similarity still clears `story.rest`, and a cold marker otherwise.
pub fn guess_line(record: &GuessRecord, story: &StoryStats) -> String {
    let rank = match record.percentile {
        Some(p) => format!("{p}{}", tier_symbol(p)),
        None if record.similarity >= story.rest => "????\u{2753}".to_string(),
        None => "cold\u{2744}".to_string(),
    };

    let by: String = record
        .by
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(NAME_WIDTH)
        .collect();

    format!(
        "{:<15} {:>5} {:>6.2} {:>6}",
        record.word,
        rank,
        rescaled_score(record.similarity, story),
        by
    )
}

/// Celebratory line for the record that hit the target.
pub fn win_line(record: &GuessRecord) -> String {
    let by = record.by.as_deref().unwrap_or("someone");
    format!("\u{1F38A} {by} got the correct word `{}`", record.word)
}

/// The first `n` leaderboard lines, newline-joined.
pub fn top_block(session: &Session, n: usize) -> String {
    let story = session.story();
    let lines: Vec<String> = session
        .leaderboard()
        .into_iter()
        .take(n)
        .map(|record| guess_line(record, story))
        .collect();
    lines.join("\n")
}
