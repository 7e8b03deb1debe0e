use rand::seq::SliceRandom;
use rand::Rng;

/// The pool of secret words a new round draws from.
///
/// Selection takes an explicit random source so word choice stays
/// deterministic under a seeded generator.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draw one word uniformly at random; `None` on an empty list.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_choose_is_deterministic_under_a_seed() {
        let list = WordList::new(vec!["kite".into(), "string".into(), "wind".into()]);
        let a: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..10).filter_map(|_| list.choose(&mut rng)).collect()
        };
        let b: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..10).filter_map(|_| list.choose(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_choose_on_empty_list() {
        let list = WordList::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(list.choose(&mut rng), None);
    }

    #[test]
    fn test_choose_draws_from_the_list() {
        let list = WordList::new(vec!["kite".into(), "string".into()]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let word = list.choose(&mut rng).unwrap();
            assert!(word == "kite" || word == "string");
        }
    }
}
