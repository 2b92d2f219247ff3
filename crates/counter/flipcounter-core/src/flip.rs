//! Flip-card choreography: per-digit animation speed and the phase
//! timeline that delivers sprite updates in firing order.

use serde::{Deserialize, Serialize};

use crate::diff::Transition;

/// Slowest a single flip phase is allowed to run, in milliseconds.
pub const MAX_PHASE_MS: u64 = 80;

/// Pace at or below which auto-run compresses the flips of fast-changing
/// low-order digits.
const FAST_PACE_MS: u64 = 300;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipHalf {
    Top,
    Bottom,
}

/// Sprite offset for one visual phase of a flip: `frame` is the horizontal
/// sub-position (0..=3) within the card strip and `digit` selects the
/// sprite row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitVisual {
    pub half: FlipHalf,
    pub frame: u8,
    pub digit: u8,
}

/// Delay between flip phases for the digit at `position`.
///
/// When auto-running at a fast pace the low-order digits change on every
/// tick, so their flip is compressed harder the lower the position; the
/// result never exceeds [`MAX_PHASE_MS`], which keeps the animation from
/// outlasting the tick interval.
pub fn flip_speed(pace_ms: u64, auto: bool, position: usize) -> u64 {
    let speed = if auto && pace_ms <= FAST_PACE_MS {
        match position {
            0 => pace_ms / 6,
            1 => pace_ms / 5,
            2 => pace_ms / 4,
            3 => pace_ms / 3,
            _ => pace_ms / 2,
        }
    } else {
        MAX_PHASE_MS
    };
    speed.min(MAX_PHASE_MS)
}

/// The seven visual phases of one card flip, as `(step, visual)` pairs; a
/// phase fires `step * speed` after the transition is issued.
///
/// The top half flips first: old digit at frames 1 and 2, then the new
/// digit lands at frame 0. The bottom half starts the instant the top half
/// lands (same step): old digit at frame 1, then the new digit at frames
/// 2, 3 and finally 0.
pub fn flip_phases(transition: Transition) -> [(u64, DigitVisual); 7] {
    let Transition { from, to, .. } = transition;
    let top = |frame, digit| DigitVisual {
        half: FlipHalf::Top,
        frame,
        digit,
    };
    let bottom = |frame, digit| DigitVisual {
        half: FlipHalf::Bottom,
        frame,
        digit,
    };
    [
        (1, top(1, from)),
        (2, top(2, from)),
        (3, top(0, to)),
        (3, bottom(1, from)),
        (4, bottom(2, to)),
        (5, bottom(3, to)),
        (6, bottom(0, to)),
    ]
}

#[derive(Copy, Clone, Debug)]
struct PhaseEntry {
    due_ms: u64,
    position: usize,
    visual: DigitVisual,
}

/// Pending flip phases across all digit positions, kept in firing order.
/// Phases for one position run in sequence; positions are independent.
#[derive(Debug, Default)]
pub struct FlipTimeline {
    entries: Vec<PhaseEntry>,
}

impl FlipTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the full choreography for one transition starting at `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, transition: Transition, speed_ms: u64) {
        for (step, visual) in flip_phases(transition) {
            self.entries.push(PhaseEntry {
                due_ms: now_ms + step * speed_ms,
                position: transition.position,
                visual,
            });
        }
        // Stable sort keeps same-instant phases in choreography order.
        self.entries.sort_by_key(|e| e.due_ms);
    }

    /// Drop pending phases for a slot that no longer exists.
    pub fn cancel_position(&mut self, position: usize) {
        self.entries.retain(|e| e.position != position);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamp of the next phase to fire, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.first().map(|e| e.due_ms)
    }

    /// Remove and return the next phase if it is due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(usize, DigitVisual)> {
        match self.entries.first() {
            Some(e) if e.due_ms <= now_ms => {
                let e = self.entries.remove(0);
                Some((e.position, e.visual))
            }
            _ => None,
        }
    }
}
