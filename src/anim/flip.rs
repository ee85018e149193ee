//! Flip/flop animation state machine.
//!
//! The machine knows nothing about timers. The owner starts it, asks a host
//! to deliver a tick after the step interval, and feeds each tick back in:
//!
//! ```text
//! start(motion)  -> step 0 shown, wait
//! tick           -> step 1 shown, wait
//! ...
//! tick           -> step N-1 shown, wait
//! tick           -> Finished(motion), back to Idle
//! ```
//!
//! Every `start` bumps a generation counter. Ticks carry the generation they
//! were scheduled for, so ticks left over from an interrupted animation are
//! reported as `Stale` and ignored.

use serde::{Deserialize, Serialize};

use crate::core::CardKey;

/// Direction of a face change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motion {
    /// Back to front.
    Flip,
    /// Front to back.
    Flop,
}

/// Address of a scheduled animation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickToken {
    pub card: CardKey,
    pub generation: u64,
}

/// Current animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Animating { motion: Motion, step: usize },
}

/// What a tick did to the animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belongs to an older animation or none is running.
    Stale,
    /// Showing `step`; another tick is needed.
    Continue { step: usize },
    /// The last step has been shown; commit the motion.
    Finished(Motion),
}

/// Step counter of a card's flip animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlipAnimation {
    state: AnimationState,
    generation: u64,
    step_count: usize,
}

impl FlipAnimation {
    pub fn new(step_count: usize) -> Self {
        assert!(step_count > 0, "Animation needs at least one step");
        Self {
            state: AnimationState::Idle,
            generation: 0,
            step_count,
        }
    }

    /// Begin `motion` at step 0, abandoning any running animation.
    ///
    /// Returns the generation the first tick must carry.
    pub fn start(&mut self, motion: Motion) -> u64 {
        self.generation += 1;
        self.state = AnimationState::Animating { motion, step: 0 };
        self.generation
    }

    /// Abandon any running animation. Ticks already scheduled become stale.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.state = AnimationState::Idle;
    }

    /// Advance by one step.
    pub fn on_tick(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Stale;
        }
        let AnimationState::Animating { motion, step } = self.state else {
            return TickOutcome::Stale;
        };

        let step = step + 1;
        if step < self.step_count {
            self.state = AnimationState::Animating { motion, step };
            TickOutcome::Continue { step }
        } else {
            self.state = AnimationState::Idle;
            TickOutcome::Finished(motion)
        }
    }

    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    /// Step currently shown, if animating.
    #[must_use]
    pub fn step(&self) -> Option<usize> {
        match self.state {
            AnimationState::Animating { step, .. } => Some(step),
            AnimationState::Idle => None,
        }
    }

    #[must_use]
    pub fn motion(&self) -> Option<Motion> {
        match self.state {
            AnimationState::Animating { motion, .. } => Some(motion),
            AnimationState::Idle => None,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// True once the shown step is past the middle of the sequence, where
    /// the opposite face becomes visible.
    #[must_use]
    pub fn face_swapped(&self) -> bool {
        self.step().is_some_and(|step| step * 2 > self.step_count)
    }
}
