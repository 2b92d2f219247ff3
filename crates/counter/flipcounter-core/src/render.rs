//! The renderer collaborator: the host side that owns slots and sprites.
//!
//! The core tells the renderer what to show and when; how a slot is drawn
//! (DOM nodes, sprite sheets, terminal cells) is entirely the host's
//! business. Structural calls for one diff cycle arrive synchronously
//! within a single scheduling turn, before any flip phases.

use serde::{Deserialize, Serialize};

use crate::flip::DigitVisual;

/// Implemented by hosts. `position` 0 is the least significant digit; a
/// separator at `position` sits between the slots at `position - 1` and
/// `position`.
pub trait Renderer {
    fn add_digit_slot(&mut self, position: usize, digit: u8);
    fn remove_digit_slot(&mut self, position: usize);
    fn insert_separator(&mut self, position: usize);
    fn remove_separator(&mut self, position: usize);
    fn set_digit_visual(&mut self, position: usize, visual: DigitVisual);
}

/// One renderer call in transportable form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderOp {
    AddDigitSlot { position: usize, digit: u8 },
    RemoveDigitSlot { position: usize },
    InsertSeparator { position: usize },
    RemoveSeparator { position: usize },
    SetDigitVisual { position: usize, visual: DigitVisual },
}

/// A [`Renderer`] that records every call. Adapters drain the ops and
/// apply them to the host; tests assert on them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RenderLog {
    pub ops: Vec<RenderOp>,
}

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Take the recorded ops, leaving the log empty.
    pub fn drain(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Renderer for RenderLog {
    fn add_digit_slot(&mut self, position: usize, digit: u8) {
        self.ops.push(RenderOp::AddDigitSlot { position, digit });
    }

    fn remove_digit_slot(&mut self, position: usize) {
        self.ops.push(RenderOp::RemoveDigitSlot { position });
    }

    fn insert_separator(&mut self, position: usize) {
        self.ops.push(RenderOp::InsertSeparator { position });
    }

    fn remove_separator(&mut self, position: usize) {
        self.ops.push(RenderOp::RemoveSeparator { position });
    }

    fn set_digit_visual(&mut self, position: usize, visual: DigitVisual) {
        self.ops.push(RenderOp::SetDigitVisual { position, visual });
    }
}
