//! Game session state machine: Idle → Selecting → InProgress → Finished.
//!
//! Pure state, no host calls. Randomness and the current time are passed in so
//! the whole loop is reproducible under test.

use rand::Rng;

use crate::bank::{Question, RoundSize, Selection};
use crate::config::GridLayoutPolicy;
use crate::grid::{CardState, Grid};
use crate::round::Round;
use crate::timer::RoundTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selecting,
    InProgress,
    Finished,
}

/// Ties a delayed card retirement to the round it was earned in, so a timeout
/// that fires after a retry or quit does nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetireToken {
    generation: u64,
    kanji: String,
}

impl RetireToken {
    pub fn kanji(&self) -> &str {
        &self.kanji
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Incorrect,
    Correct(RetireToken),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Ignored,
    Next(Question),
    Finished { elapsed_ms: u64 },
}

#[derive(Debug)]
pub struct Session {
    phase: Phase,
    layout: GridLayoutPolicy,
    bank: Vec<Question>,
    selection: Option<Selection>,
    round: Option<Round>,
    grid: Option<Grid>,
    current: Option<Question>,
    pending: Option<String>,
    timer: RoundTimer,
    generation: u64,
}

impl Session {
    pub fn new(layout: GridLayoutPolicy) -> Self {
        Self {
            phase: Phase::Idle,
            layout,
            bank: Vec::new(),
            selection: None,
            round: None,
            grid: None,
            current: None,
            pending: None,
            timer: RoundTimer::new(),
            generation: 0,
        }
    }

    /// Idle → Selecting: take a freshly loaded bank and lay out a round.
    /// Any previous round is dropped.
    pub fn install<R: Rng + ?Sized>(
        &mut self,
        selection: Selection,
        bank: Vec<Question>,
        rng: &mut R,
    ) -> &Grid {
        self.bank = bank;
        self.selection = Some(selection);
        self.timer.reset();
        self.phase = Phase::Selecting;
        self.build_round(rng)
    }

    fn build_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Grid {
        let count = self.size().count();
        let round = Round::draw(&self.bank, count, rng);
        let grid = Grid::new(round.questions(), count, self.layout);
        self.round = Some(round);
        self.current = None;
        self.pending = None;
        self.generation += 1;
        self.grid.insert(grid)
    }

    /// Selecting → InProgress. Returns the first question to read out.
    pub fn start<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<Question> {
        if self.phase != Phase::Selecting {
            return None;
        }
        self.timer.start(now);
        self.phase = Phase::InProgress;
        self.draw_next(rng)
    }

    fn draw_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Question> {
        self.current = self.round.as_ref()?.pick_next(rng).cloned();
        self.current.clone()
    }

    pub fn click(&mut self, kanji: &str) -> ClickOutcome {
        if self.phase != Phase::InProgress {
            return ClickOutcome::Ignored;
        }
        let Some(current) = self.current.as_ref() else {
            return ClickOutcome::Ignored;
        };
        let Some(grid) = self.grid.as_mut() else {
            return ClickOutcome::Ignored;
        };
        if !grid.card(kanji).is_some_and(|c| c.is_clickable()) {
            return ClickOutcome::Ignored;
        }
        if current.kanji != kanji {
            return ClickOutcome::Incorrect;
        }

        grid.set_state(kanji, CardState::Matched);
        self.current = None;
        self.pending = Some(kanji.to_string());
        ClickOutcome::Correct(RetireToken {
            generation: self.generation,
            kanji: kanji.to_string(),
        })
    }

    /// Hide a matched card, drop it from `remaining` and move on. Finishes the
    /// round when nothing is left.
    pub fn retire<R: Rng + ?Sized>(
        &mut self,
        token: &RetireToken,
        now: f64,
        rng: &mut R,
    ) -> Advance {
        if self.phase != Phase::InProgress
            || token.generation != self.generation
            || self.pending.as_deref() != Some(token.kanji.as_str())
        {
            return Advance::Ignored;
        }
        self.pending = None;
        if let Some(grid) = self.grid.as_mut() {
            grid.set_state(&token.kanji, CardState::Hidden);
        }
        let complete = match self.round.as_mut() {
            Some(round) => {
                round.retire(&token.kanji);
                round.is_complete()
            }
            None => true,
        };
        if complete {
            let elapsed_ms = self.finish(now);
            return Advance::Finished { elapsed_ms };
        }
        match self.draw_next(rng) {
            Some(q) => Advance::Next(q),
            None => Advance::Finished {
                elapsed_ms: self.finish(now),
            },
        }
    }

    fn finish(&mut self, now: f64) -> u64 {
        self.current = None;
        self.phase = Phase::Finished;
        self.timer.stop(now).unwrap_or_else(|| self.timer.elapsed_ms(now))
    }

    /// Same bank, fresh round of the same size, started right away.
    pub fn retry<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<Question> {
        if self.bank.is_empty() || self.phase == Phase::Idle {
            return None;
        }
        self.build_round(rng);
        self.phase = Phase::Selecting;
        self.start(now, rng)
    }

    /// Back to the menu, dropping the bank and round.
    pub fn quit(&mut self) {
        self.timer.reset();
        self.bank.clear();
        self.selection = None;
        self.round = None;
        self.grid = None;
        self.current = None;
        self.pending = None;
        self.generation += 1;
        self.phase = Phase::Idle;
    }

    pub fn tick(&self, now: f64) -> Option<String> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.timer.tick(now)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn size(&self) -> RoundSize {
        self.selection.as_ref().map_or(RoundSize::Five, |s| s.size)
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }
}
