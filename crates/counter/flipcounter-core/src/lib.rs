//! Flipcounter core (renderer-agnostic)
//!
//! Digit diffing, flip choreography and ramp planning for a mechanical
//! split-flap counter. The host supplies a [`Renderer`] and drives the
//! controller with [`FlipCounter::update`]; the core never touches a wall
//! clock or host timers, so it runs identically under DOM timers, game
//! loops, or test harnesses stepping virtual time.

pub mod config;
pub mod counter;
pub mod diff;
pub mod digits;
pub mod flip;
pub mod plan;
pub mod render;

// Re-exports for consumers (adapters)
pub use config::CounterConfig;
pub use counter::FlipCounter;
pub use diff::{diff, initial_layout, DigitDiff, SlotOp, Transition};
pub use digits::{coerce_finite, digit_count, from_digits, to_digits, DigitSequence, InputError};
pub use flip::{flip_phases, flip_speed, DigitVisual, FlipHalf, FlipTimeline, MAX_PHASE_MS};
pub use plan::{plan_ramp, RampPlan, DEFAULT_RAMP_DURATION_S};
pub use render::{RenderLog, RenderOp, Renderer};
