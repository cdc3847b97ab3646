//! Card grid model. Rendering to DOM lives in `web::view`.

use crate::bank::Question;
use crate::config::GridLayoutPolicy;

const LINE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub fn for_count(count: usize, policy: GridLayoutPolicy) -> Self {
        let lines = count.div_ceil(LINE).max(1);
        match policy {
            GridLayoutPolicy::Rows => Self {
                rows: lines,
                cols: LINE,
            },
            GridLayoutPolicy::Columns => Self {
                rows: LINE,
                cols: lines,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Visible,
    /// Answered correctly, waiting out the feedback delay. Not clickable.
    Matched,
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub kanji: String,
    pub reading: String,
    pub state: CardState,
}

impl Card {
    pub fn is_clickable(&self) -> bool {
        self.state == CardState::Visible
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub layout: GridLayout,
    cards: Vec<Card>,
}

impl Grid {
    pub fn new(questions: &[Question], count: usize, policy: GridLayoutPolicy) -> Self {
        Self {
            layout: GridLayout::for_count(count, policy),
            cards: questions
                .iter()
                .map(|q| Card {
                    kanji: q.kanji.clone(),
                    reading: q.reading.clone(),
                    state: CardState::Visible,
                })
                .collect(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, kanji: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.kanji == kanji)
    }

    pub fn index_of(&self, kanji: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.kanji == kanji)
    }

    pub(crate) fn set_state(&mut self, kanji: &str, state: CardState) -> bool {
        match self.cards.iter_mut().find(|c| c.kanji == kanji) {
            Some(card) => {
                card.state = state;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_policy_matches_lines_of_five() {
        let rows = |n| GridLayout::for_count(n, GridLayoutPolicy::Rows);
        assert_eq!(rows(5), GridLayout { rows: 1, cols: 5 });
        assert_eq!(rows(10), GridLayout { rows: 2, cols: 5 });
        assert_eq!(rows(15), GridLayout { rows: 3, cols: 5 });
    }

    #[test]
    fn columns_policy_transposes() {
        assert_eq!(
            GridLayout::for_count(15, GridLayoutPolicy::Columns),
            GridLayout { rows: 5, cols: 3 }
        );
    }

    #[test]
    fn cards_start_visible() {
        let qs = [Question::new("水", "みず"), Question::new("火", "ひ")];
        let g = Grid::new(&qs, 5, GridLayoutPolicy::Rows);
        assert!(g.cards().iter().all(Card::is_clickable));
        assert_eq!(g.index_of("火"), Some(1));
    }
}
