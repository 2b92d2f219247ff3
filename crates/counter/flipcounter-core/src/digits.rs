//! Digit sequences: a non-negative value split into per-position decimal
//! digits, and the numeric input guard used by every public mutator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a mutation receives a value that is not a finite number.
/// Never crosses the public API: the controller absorbs it as a no-op.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("not a finite number: {0}")]
    NonFinite(f64),
}

/// Decimal digits of a non-negative integer, index 0 = least significant.
/// The value 0 is `[0]`; no other sequence has a leading (top) zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitSequence(Vec<u8>);

impl DigitSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digit at `position`, if the sequence is that long.
    pub fn digit(&self, position: usize) -> Option<u8> {
        self.0.get(position).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

/// Split `n` into its decimal digits, least significant first.
pub fn to_digits(n: u64) -> DigitSequence {
    let mut digits = Vec::with_capacity(digit_count(n));
    let mut rest = n;
    loop {
        digits.push((rest % 10) as u8);
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    DigitSequence(digits)
}

/// Inverse of [`to_digits`].
pub fn from_digits(seq: &DigitSequence) -> u64 {
    seq.0
        .iter()
        .rev()
        .fold(0u64, |acc, d| acc * 10 + u64::from(*d))
}

/// Length of the decimal representation of `n`.
pub fn digit_count(n: u64) -> usize {
    let mut count = 1;
    let mut rest = n / 10;
    while rest > 0 {
        count += 1;
        rest /= 10;
    }
    count
}

/// The numeric guard on the public API: NaN and infinities are rejected,
/// fractions are truncated toward zero.
pub fn coerce_finite(n: f64) -> Result<i64, InputError> {
    if n.is_finite() {
        Ok(n.trunc() as i64)
    } else {
        Err(InputError::NonFinite(n))
    }
}
