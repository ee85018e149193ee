//! Flip animation: the step state machine and the timer queue that paces it.

mod flip;
mod timer;

pub use flip::{AnimationState, FlipAnimation, Motion, TickOutcome, TickToken};
pub use timer::TimerQueue;
