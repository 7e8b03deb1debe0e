use crate::session::{GuessRecord, Session};
use std::cmp::Ordering;

/// Ranks at or above this are treated as "already near-maximal" by the hint
/// narrowing: the next hint walks down the revealed neighbors instead of
/// taking a midpoint.
const NEAR_MAXIMAL_RANK: u16 = 999;

impl Session {
    /// Attributed guesses ordered by descending similarity to the target.
    ///
    /// Only records somebody has claimed appear; the seeded target record
    /// stays hidden until someone actually guesses it. Ties order ascending
    /// by word so the ranking is deterministic.
    pub fn leaderboard(&self) -> Vec<&GuessRecord> {
        let mut entries: Vec<&GuessRecord> = self.records().filter(|r| r.by.is_some()).collect();
        entries.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.word.cmp(&b.word))
        });
        entries
    }

    /// Which percentile rank to ask the nearby-word service for next.
    ///
    /// - No ranked leaderboard entry yet: rank 1, the closest neighbor.
    /// - Best guess already at 999/1000: walk down the revealed neighbors,
    ///   skipping every rank the players already hold, and return the first
    ///   free one below them.
    /// - Otherwise: the midpoint between 1000 and the best rank, so each
    ///   hint halves the remaining distance to the target.
    pub fn next_hint_rank(&self) -> u16 {
        let top = self.leaderboard();
        let Some(first) = top.first() else {
            return 1;
        };
        let Some(best) = first.percentile else {
            return 1;
        };

        if best >= NEAR_MAXIMAL_RANK {
            let mut candidate = best.saturating_sub(1);
            for entry in &top[1..] {
                let Some(rank) = entry.percentile else {
                    break;
                };
                if candidate > rank {
                    break;
                }
                candidate = rank.saturating_sub(1);
            }
            candidate
        } else {
            (1000 + best) / 2
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::session::{LookupResult, Session, StoryStats};

    fn session() -> Session {
        Session::new(
            "kite",
            LookupResult {
                vector: vec![1.0, 0.0],
                percentile: Some(1000),
            },
            StoryStats {
                top: 1.0,
                rest: 0.3,
            },
        )
    }

    /// 2-d vector at `angle` radians from the target, i.e. cosine
    /// similarity of `angle.cos()`.
    fn vector_at(angle: f32) -> Vec<f32> {
        vec![angle.cos(), angle.sin()]
    }

    fn add(session: &mut Session, word: &str, angle: f32, percentile: Option<u16>, by: Option<&str>) {
        session
            .add_guess(
                word,
                LookupResult {
                    vector: vector_at(angle),
                    percentile,
                },
            )
            .unwrap();
        if let Some(actor) = by {
            session.claim(word, actor).unwrap();
        }
    }

    #[test]
    fn test_leaderboard_orders_by_similarity_descending() {
        let mut s = session();
        add(&mut s, "banana", 1.4, None, Some("carol"));
        add(&mut s, "string", 0.9, Some(600), Some("bob"));
        add(&mut s, "wind", 0.4, Some(950), Some("alice"));

        let words: Vec<&str> = s.leaderboard().iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["wind", "string", "banana"]);

        let sims: Vec<f32> = s.leaderboard().iter().map(|r| r.similarity).collect();
        assert!(sims.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_leaderboard_hides_unattributed_records() {
        let mut s = session();
        add(&mut s, "string", 0.5, Some(800), None);
        assert!(s.leaderboard().is_empty());

        s.claim("string", "alice").unwrap();
        assert_eq!(s.leaderboard().len(), 1);
        assert!(s.leaderboard().iter().all(|r| r.by.is_some()));
    }

    #[test]
    fn test_hint_rank_on_empty_board() {
        let s = session();
        assert_eq!(s.next_hint_rank(), 1);
    }

    #[test]
    fn test_hint_rank_when_top_guess_is_unranked() {
        let mut s = session();
        add(&mut s, "banana", 1.4, None, Some("carol"));
        assert_eq!(s.next_hint_rank(), 1);
    }

    #[test]
    fn test_hint_rank_midpoint_narrowing() {
        let mut s = session();
        add(&mut s, "string", 0.5, Some(600), Some("bob"));
        assert_eq!(s.next_hint_rank(), 800);

        add(&mut s, "wind", 0.3, Some(800), Some("alice"));
        assert_eq!(s.next_hint_rank(), 900);
    }

    #[test]
    fn test_hint_rank_walks_down_revealed_neighbors() {
        let mut s = session();
        add(&mut s, "wind", 0.1, Some(1000), Some("alice"));
        add(&mut s, "breeze", 0.2, Some(999), Some("bob"));
        add(&mut s, "gust", 0.3, Some(998), Some("carol"));

        let rank = s.next_hint_rank();
        assert_eq!(rank, 997);
        let held: Vec<u16> = s.leaderboard().iter().filter_map(|r| r.percentile).collect();
        assert!(!held.contains(&rank));
    }

    #[test]
    fn test_hint_rank_walk_stops_below_candidate() {
        let mut s = session();
        add(&mut s, "wind", 0.1, Some(1000), Some("alice"));
        add(&mut s, "string", 0.9, Some(500), Some("bob"));

        // 500 is already below the candidate 999, so the walk stops there.
        assert_eq!(s.next_hint_rank(), 999);
    }

    #[test]
    fn test_hint_rank_walk_stops_at_unranked_entry() {
        let mut s = session();
        add(&mut s, "wind", 0.1, Some(999), Some("alice"));
        add(&mut s, "banana", 1.2, None, Some("carol"));
        add(&mut s, "gust", 1.3, Some(998), Some("bob"));

        // banana sits between the ranked entries and ends the walk at 998.
        assert_eq!(s.next_hint_rank(), 998);
    }
}
