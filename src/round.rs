//! Round selection: a shuffled draw without replacement from the bank, plus the
//! shrinking `remaining` working set.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::bank::Question;

#[derive(Clone, Debug)]
pub struct Round {
    questions: Vec<Question>,
    remaining: Vec<Question>,
}

impl Round {
    /// Shuffle a copy of `bank` and keep the first `count` (or the whole bank if
    /// it is smaller).
    pub fn draw<R: Rng + ?Sized>(bank: &[Question], count: usize, rng: &mut R) -> Self {
        let mut shuffled = bank.to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(count);
        Self {
            remaining: shuffled.clone(),
            questions: shuffled,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn remaining(&self) -> &[Question] {
        &self.remaining
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Uniform pick among the unanswered questions.
    pub fn pick_next<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Question> {
        self.remaining.choose(rng)
    }

    /// Remove an answered question. Returns false if it was not remaining.
    pub fn retire(&mut self, kanji: &str) -> bool {
        match self.remaining.iter().position(|q| q.kanji == kanji) {
            Some(idx) => {
                self.remaining.swap_remove(idx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn bank(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("k{i}"), format!("r{i}")))
            .collect()
    }

    #[test]
    fn draw_is_unique_subset() {
        let b = bank(40);
        let mut rng = StdRng::seed_from_u64(7);
        for n in [5, 10, 15] {
            let round = Round::draw(&b, n, &mut rng);
            assert_eq!(round.len(), n);
            let kanji: HashSet<_> = round.questions().iter().map(|q| &q.kanji).collect();
            assert_eq!(kanji.len(), n);
            assert!(round.questions().iter().all(|q| b.contains(q)));
            assert_eq!(round.remaining(), round.questions());
        }
    }

    #[test]
    fn small_bank_yields_whole_bank() {
        let b = bank(3);
        let round = Round::draw(&b, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(round.len(), 3);
    }

    #[test]
    fn retire_only_removes_once() {
        let b = bank(5);
        let mut round = Round::draw(&b, 5, &mut StdRng::seed_from_u64(2));
        assert!(round.retire("k3"));
        assert!(!round.retire("k3"));
        assert_eq!(round.remaining().len(), 4);
        assert_eq!(round.len(), 5);
    }
}
