//! Player-facing game flow.
//!
//! The game owns the session RNG and the current round, and advances
//! through intro, playing, success/fail and result states on input and
//! elapsed time. It knows nothing about rendering.

use tracing::info;

use crate::config::GameConfig;
use crate::rng::RandomSource;
use crate::round::{build_round, Round};

/// Current phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Title screen, waiting for the first input.
    Intro,
    /// The timer is running and the player picks shapes.
    Playing,
    /// The matching pair was found; a new round follows.
    Success,
    /// Two non-matching shapes were picked.
    Fail,
    /// Time is up; shows score and accuracy.
    Result,
}

/// A play session.
pub struct Game<R> {
    config: GameConfig,
    rng: R,
    round: Round,
    round_number: u64,
    state: State,
    state_time: f32,
    play_time: f32,
    score: u32,
    attempts: u32,
    selected_count: usize,
}

impl<R: RandomSource> Game<R> {
    /// Starts a session on the intro screen with the first round ready.
    ///
    /// `config` is expected to be validated.
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let round = build_round(&mut rng, &config.round);
        Self {
            config,
            rng,
            round,
            round_number: 1,
            state: State::Intro,
            state_time: 0.0,
            play_time: 0.0,
            score: 0,
            attempts: 0,
            selected_count: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Counts rounds built this session, starting at 1.
    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of pairs found this session.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of two-shape selections made this session.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Percentage of attempts that found the pair, if any attempt was made.
    pub fn accuracy(&self) -> Option<f32> {
        (self.attempts > 0).then(|| self.score as f32 * 100.0 / self.attempts as f32)
    }

    /// Seconds spent in the current state.
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Seconds left on the play clock, never negative.
    pub fn remaining(&self) -> f32 {
        (self.config.total_play_time - self.play_time).max(0.0)
    }

    /// Advances the game clock by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        for shape in self.round.shapes_mut() {
            shape.phase += elapsed;
        }
        self.state_time += elapsed;

        match self.state {
            State::Intro | State::Result => {}
            State::Success => {
                if self.state_time > self.config.success_time {
                    self.set_state(State::Playing);
                    self.next_round();
                }
            }
            State::Fail => {
                if self.state_time > self.config.fail_time {
                    self.clear_selection();
                    self.set_state(State::Playing);
                }
                // the play clock keeps running while a miss is shown
                self.tick_play_clock(elapsed);
            }
            State::Playing => self.tick_play_clock(elapsed),
        }
    }

    /// Handles an input that is not aimed at a slot (key press, tap).
    pub fn press(&mut self) {
        match self.state {
            State::Intro => self.set_state(State::Playing),
            State::Result => self.try_restart(),
            _ => {}
        }
    }

    /// Handles the player picking slot `slot`. Out-of-range slots are ignored.
    pub fn select(&mut self, slot: usize) {
        match self.state {
            State::Intro => self.set_state(State::Playing),
            State::Playing => self.toggle(slot),
            State::Result => self.try_restart(),
            _ => {}
        }
    }

    fn toggle(&mut self, slot: usize) {
        let Some(shape) = self.round.shapes_mut().get_mut(slot) else {
            return;
        };
        if shape.selected {
            shape.selected = false;
            self.selected_count -= 1;
            return;
        }

        shape.selected = true;
        self.selected_count += 1;
        if self.selected_count == 2 {
            self.attempts += 1;
            let (first, second) = self.round.pair();
            let shapes = self.round.shapes();
            if shapes[first].selected && shapes[second].selected {
                self.score += 1;
                self.set_state(State::Success);
            } else {
                self.set_state(State::Fail);
            }
        }
    }

    fn tick_play_clock(&mut self, elapsed: f32) {
        self.play_time += elapsed;
        if self.play_time > self.config.total_play_time {
            info!(score = self.score, attempts = self.attempts, "time is up");
            self.set_state(State::Result);
        }
    }

    fn try_restart(&mut self) {
        if self.state_time > self.config.fade_out_time {
            self.set_state(State::Playing);
            self.score = 0;
            self.attempts = 0;
            self.play_time = 0.0;
            self.next_round();
        }
    }

    fn next_round(&mut self) {
        self.round = build_round(&mut self.rng, &self.config.round);
        self.round_number += 1;
        self.selected_count = 0;
    }

    fn clear_selection(&mut self) {
        for shape in self.round.shapes_mut() {
            shape.selected = false;
        }
        self.selected_count = 0;
    }

    fn set_state(&mut self, state: State) {
        info!(from = ?self.state, to = ?state, "state change");
        self.state = state;
        self.state_time = 0.0;
    }
}
