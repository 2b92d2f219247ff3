//! Structural and per-slot differences between two digit sequences.
//!
//! A diff carries two kinds of work: structural ops (slots and thousands
//! separators appearing or disappearing, applied instantly) and per-slot
//! transitions (digit changes, animated by the flip timeline).

use serde::{Deserialize, Serialize};

use crate::digits::DigitSequence;

/// Instantaneous slot operation; applied by the renderer before any flips
/// for the same diff cycle begin.
///
/// A separator at `position` sits between the digit slots at `position - 1`
/// and `position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOp {
    AddSlot { position: usize, digit: u8 },
    RemoveSlot { position: usize },
    InsertSeparator { position: usize },
    RemoveSeparator { position: usize },
}

/// A digit change at a position present in both sequences.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub position: usize,
    pub from: u8,
    pub to: u8,
}

/// Result of comparing two digit sequences. Produced and consumed within a
/// single mutation cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitDiff {
    pub structural: Vec<SlotOp>,
    pub transitions: Vec<Transition>,
}

impl DigitDiff {
    pub fn is_empty(&self) -> bool {
        self.structural.is_empty() && self.transitions.is_empty()
    }
}

/// Digits group by thousands: a separator sits just below every position
/// divisible by 3, except position 0.
fn wants_separator(position: usize) -> bool {
    position > 0 && position % 3 == 0
}

/// Compare `old` and `new` digit sequences.
///
/// New high-order slots are added lowest first, each carrying its digit
/// (with its separator when it opens a new thousands group). Excess slots
/// are removed highest first, dropping a separator that would otherwise
/// dangle above the new top digit. Positions present in both sequences
/// yield one [`Transition`] each where the digit changed; transitions have
/// no ordering dependency among themselves.
pub fn diff(old: &DigitSequence, new: &DigitSequence) -> DigitDiff {
    let mut out = DigitDiff::default();

    if new.len() > old.len() {
        for (position, digit) in new.iter().enumerate().skip(old.len()) {
            if wants_separator(position) {
                out.structural.push(SlotOp::InsertSeparator { position });
            }
            out.structural.push(SlotOp::AddSlot { position, digit });
        }
    }

    if new.len() < old.len() {
        for position in (new.len()..old.len()).rev() {
            out.structural.push(SlotOp::RemoveSlot { position });
            if wants_separator(position) {
                out.structural.push(SlotOp::RemoveSeparator { position });
            }
        }
    }

    let common = old.len().min(new.len());
    let (old, new) = (old.as_slice(), new.as_slice());
    for position in 0..common {
        if old[position] != new[position] {
            out.transitions.push(Transition {
                position,
                from: old[position],
                to: new[position],
            });
        }
    }

    out
}

/// Slot ops that build the display for a starting value, lowest slot first.
pub fn initial_layout(digits: &DigitSequence) -> Vec<SlotOp> {
    let mut ops = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.iter().enumerate() {
        if wants_separator(position) {
            ops.push(SlotOp::InsertSeparator { position });
        }
        ops.push(SlotOp::AddSlot { position, digit });
    }
    ops
}
