//! Scripted behaviour for a headless session, advanced once per tick.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use place::Place;
use place::chat::HistoryState;
use place::geometry::Coordinate;
use place::input::{InputFocus, MoveKey};

use crate::headless::format_message;

/// What the session does once connected.
#[derive(Debug, Clone, PartialEq)]
pub enum Script {
    /// Stay connected and log traffic until interrupted.
    Watch,
    /// Send one chat line once history has arrived.
    Say { body: String },
    /// Draw one segment between two viewport-local points.
    Stroke { from: Coordinate, to: Coordinate },
    /// Hold a movement key for a number of frames.
    Walk { key: MoveKey, frames: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Walking { remaining: u32 },
    Finished,
}

/// Drives a [`Script`] against a [`Place`].
#[derive(Debug)]
pub struct ScriptRunner {
    script: Script,
    settle_ticks: u32,
    ticks: u32,
    phase: Phase,
}

impl ScriptRunner {
    /// `settle_ticks` bounds how long the runner waits for history or the
    /// first chunk before acting anyway.
    #[must_use]
    pub fn new(script: Script, settle_ticks: u32) -> Self {
        Self { script, settle_ticks, ticks: 0, phase: Phase::Waiting }
    }

    /// Advance by one tick.
    pub fn step(&mut self, place: &mut Place) -> Step {
        if self.phase == Phase::Finished {
            return Step::Done;
        }
        self.ticks = self.ticks.saturating_add(1);
        let settled = self.ticks >= self.settle_ticks;

        match (&self.script, self.phase) {
            (Script::Watch, _) => return Step::Continue,
            (Script::Say { body }, _) => {
                if place.history_state() != HistoryState::HistoryLoaded && !settled {
                    return Step::Continue;
                }
                if let Some(echo) = place.send_message(body) {
                    println!("{}", format_message(&echo));
                }
            }
            (Script::Stroke { from, to }, _) => {
                if place.is_loading() && !settled {
                    return Step::Continue;
                }
                place.on_pointer_down(*from);
                place.on_pointer_move(*to);
                place.on_pointer_up(*to);
                tracing::info!(from_x = from.x, from_y = from.y, to_x = to.x, to_y = to.y, "stroke sent");
            }
            (Script::Walk { key, frames }, Phase::Waiting) => {
                if *frames == 0 {
                    self.phase = Phase::Finished;
                    return Step::Done;
                }
                place.on_key_down(key.key(), InputFocus::Canvas);
                self.phase = Phase::Walking { remaining: *frames };
                return Step::Continue;
            }
            (Script::Walk { key, .. }, Phase::Walking { remaining }) => {
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    self.phase = Phase::Walking { remaining };
                    return Step::Continue;
                }
                place.on_key_up(key.key(), InputFocus::Canvas);
                let location = place.location();
                tracing::info!(x = location.x, y = location.y, "walk finished");
            }
            (Script::Walk { .. }, Phase::Finished) => {}
        }

        self.phase = Phase::Finished;
        Step::Done
    }
}
