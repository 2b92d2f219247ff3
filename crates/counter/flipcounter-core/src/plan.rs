//! Ramp planning: pick an (increment, pace) pair that walks a value to a
//! target inside a time budget.

use serde::{Deserialize, Serialize};

/// Duration assumed when a ramp request does not specify one.
pub const DEFAULT_RAMP_DURATION_S: u64 = 10;

/// Paces are searched on a 10ms grid.
const PACE_STEP_MS: i64 = 10;

/// Flat iteration budget for the search; when exhausted the best-scoring
/// candidate seen so far is used.
const SEARCH_BUDGET: u32 = 500;

/// A planned ramp, consumed one step at a time by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RampPlan {
    pub increment: i64,
    pub pace_ms: u64,
    pub cycles_remaining: u32,
}

/// Search for the pace/increment pair that best approximates reaching
/// `target` from `start` within `duration_s` seconds, ticking no faster
/// than `desired_pace_ms`.
///
/// Returns `None` when there is nothing to ramp (`target <= start`); for a
/// positive difference some plan is always produced, falling back to the
/// best-scoring approximation when no candidate satisfies every
/// constraint.
pub fn plan_ramp(
    start: i64,
    target: i64,
    desired_pace_ms: u64,
    duration_s: u64,
) -> Option<RampPlan> {
    let diff = target - start;
    if diff <= 0 {
        return None;
    }
    let budget_ms = duration_s.saturating_mul(1000).min(i64::MAX as u64) as i64;
    let desired = desired_pace_ms as i64;

    // First guess: the even spread across the budget when it is slower
    // than the desired pace, rounded up to the next 10ms grid line.
    // A pace of at least 1ms keeps the cycle math defined when both the
    // desired pace and the budget are zero.
    let spread = budget_ms as f64 / diff as f64;
    let mut pace = if spread > desired as f64 {
        ((spread / PACE_STEP_MS as f64).ceil() as i64) * PACE_STEP_MS
    } else {
        desired
    }
    .max(1);

    let mut best: Option<(i64, RampPlan)> = None;
    for _ in 0..SEARCH_BUDGET {
        // At least one cycle, even when the pace exceeds the whole budget.
        let cycles = (budget_ms / pace).max(1);
        let increment = (diff as f64 / cycles as f64).round() as i64;
        let reach = cycles * increment;
        let spent = cycles * pace;
        let q = (diff - reach).abs() + (spent - budget_ms).abs();

        let candidate = RampPlan {
            increment,
            pace_ms: pace as u64,
            cycles_remaining: cycles as u32,
        };
        if best.as_ref().map_or(true, |(bq, _)| q < *bq) {
            best = Some((q, candidate));
        }

        let fits = diff / cycles >= 1
            && reach <= diff
            && (reach - diff).abs() <= 5
            && (spent - budget_ms).abs() <= 100
            && spent <= budget_ms;
        if fits {
            return Some(candidate);
        }
        pace += PACE_STEP_MS;
    }

    best.map(|(_, plan)| plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should accept the first guess when the even split already fits
    #[test]
    fn first_guess_even_split() {
        let plan = plan_ramp(0, 100, 500, 5).expect("positive diff yields a plan");
        assert_eq!(
            plan,
            RampPlan {
                increment: 10,
                pace_ms: 500,
                cycles_remaining: 10
            }
        );
    }

    #[test]
    fn non_positive_diff_has_no_plan() {
        assert_eq!(plan_ramp(10, 10, 500, 5), None);
        assert_eq!(plan_ramp(10, 3, 500, 5), None);
    }
}
