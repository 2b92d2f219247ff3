//! CounterController: owns the value, the single pending continuation and
//! the flip timeline, and drives the renderer.
//!
//! All mutators are synchronous: digit diffing and structural render calls
//! happen inline before the mutator returns. Only the next tick and the
//! flip phases are deferred, and the host delivers those by advancing
//! virtual time with [`FlipCounter::update`].

use log::debug;

use crate::config::CounterConfig;
use crate::diff::{self, SlotOp};
use crate::digits;
use crate::flip::{flip_speed, FlipTimeline};
use crate::plan::{plan_ramp, RampPlan, DEFAULT_RAMP_DURATION_S};
use crate::render::Renderer;

/// What the pending continuation will do when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ContinuationKind {
    /// Periodic auto-increment tick.
    Auto,
    /// Stepwise walk to a target at the current increment.
    Walk { target: i64 },
    /// One step of a planned ramp.
    Ramp { target: i64, plan: RampPlan },
}

#[derive(Copy, Clone, Debug)]
struct Continuation {
    due_ms: u64,
    kind: ContinuationKind,
}

/// A split-flap counter bound to a host [`Renderer`].
///
/// At most one continuation is outstanding at any time; scheduling a new
/// one replaces (cancels) the old, and a cancelled continuation never
/// fires.
pub struct FlipCounter<R: Renderer> {
    value: i64,
    increment: i64,
    pace_ms: u64,
    auto: bool,
    clock_ms: u64,
    pending: Option<Continuation>,
    timeline: FlipTimeline,
    renderer: R,
}

impl<R: Renderer> FlipCounter<R> {
    /// Build the initial slot layout on the renderer and, when the config
    /// asks for auto-run, perform the first tick immediately.
    pub fn new(config: CounterConfig, renderer: R) -> Self {
        let mut counter = Self {
            value: config.value.max(0),
            increment: config.increment,
            pace_ms: config.pace_ms.max(1),
            auto: false,
            clock_ms: 0,
            pending: None,
            timeline: FlipTimeline::new(),
            renderer,
        };
        let layout = diff::initial_layout(&digits::to_digits(counter.value as u64));
        for op in layout {
            counter.apply_slot_op(op);
        }
        if config.auto {
            counter.set_auto(true);
        }
        counter
    }

    /// Current counter value.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn increment(&self) -> i64 {
        self.increment
    }

    pub fn pace_ms(&self) -> u64 {
        self.pace_ms
    }

    /// True while a tick, walk step or ramp step is scheduled.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // ---- chainable mutators --------------------------------------------

    /// Set the counter to `n` and animate the digits to the new value.
    /// Does not alter auto-run or a ramp in progress.
    pub fn set_value(&mut self, n: f64) -> &mut Self {
        match digits::coerce_finite(n) {
            Ok(v) => self.show_value(v.max(0)),
            Err(err) => debug!("set_value ignored: {err}"),
        }
        self
    }

    /// Set the per-step increment. Does not animate; invalid input resets
    /// to the default.
    pub fn set_increment(&mut self, n: f64) -> &mut Self {
        match digits::coerce_finite(n) {
            Ok(v) => self.increment = v,
            Err(err) => {
                debug!("set_increment fell back to default: {err}");
                self.increment = CounterConfig::default().increment;
            }
        }
        self
    }

    /// Set the tick interval in milliseconds. Non-positive or invalid
    /// input resets to the default.
    pub fn set_pace(&mut self, n: f64) -> &mut Self {
        match digits::coerce_finite(n) {
            Ok(v) if v > 0 => self.pace_ms = v as u64,
            Ok(v) => {
                debug!("set_pace fell back to default: non-positive pace {v}");
                self.pace_ms = CounterConfig::default().pace_ms;
            }
            Err(err) => {
                debug!("set_pace fell back to default: {err}");
                self.pace_ms = CounterConfig::default().pace_ms;
            }
        }
        self
    }

    /// Turn periodic auto-increment on or off. Turning it on runs the
    /// first tick immediately; turning it off cancels the pending tick.
    pub fn set_auto(&mut self, auto: bool) -> &mut Self {
        if auto && !self.auto {
            self.auto = true;
            self.auto_tick();
        }
        // Guarded on the auto flag: only the auto tick is cancelled here.
        // A walk or ramp in progress keeps its continuation; stop() is the
        // unconditional cancel.
        if !auto && self.auto {
            self.cancel();
            self.auto = false;
        }
        self
    }

    /// Manually advance one increment; ignored while auto-running.
    pub fn step(&mut self) -> &mut Self {
        if !self.auto {
            self.show_value((self.value + self.increment).max(0));
        }
        self
    }

    /// Add `n` to the value; `increment` and `pace` are untouched.
    pub fn add(&mut self, n: f64) -> &mut Self {
        match digits::coerce_finite(n) {
            Ok(v) => self.show_value((self.value + v).max(0)),
            Err(err) => debug!("add ignored: {err}"),
        }
        self
    }

    /// Subtract `n` from the value, clamping at zero.
    pub fn subtract(&mut self, n: f64) -> &mut Self {
        match digits::coerce_finite(n) {
            Ok(v) => self.show_value((self.value - v).max(0)),
            Err(err) => debug!("subtract ignored: {err}"),
        }
        self
    }

    /// Walk to `n` one increment at a time at the current pace, landing
    /// exactly on it, then drop out of auto-run.
    pub fn increment_to(&mut self, n: f64) -> &mut Self {
        match digits::coerce_finite(n) {
            Ok(target) => {
                self.cancel();
                self.walk_step(target.max(0));
            }
            Err(err) => debug!("increment_to ignored: {err}"),
        }
        self
    }

    /// Ramp to `n`: search for the increment/pace pair that reaches the
    /// target closest to `duration_s` seconds from now (defaults: current
    /// pace, 10 s), then drive the plan to completion.
    pub fn smart_increment_to(
        &mut self,
        n: f64,
        pace_ms: Option<u64>,
        duration_s: Option<u64>,
    ) -> &mut Self {
        let target = match digits::coerce_finite(n) {
            Ok(v) => v.max(0),
            Err(err) => {
                debug!("smart_increment_to ignored: {err}");
                return self;
            }
        };
        self.cancel();
        let pace = pace_ms.unwrap_or(self.pace_ms);
        let duration = duration_s.unwrap_or(DEFAULT_RAMP_DURATION_S);
        match plan_ramp(self.value, target, pace, duration) {
            Some(plan) => self.schedule(ContinuationKind::Ramp { target, plan }, plan.pace_ms),
            None => debug!(
                "smart_increment_to: target {target} is not ahead of {}, nothing to do",
                self.value
            ),
        }
        self
    }

    /// Cancel any scheduled activity, leaving the value where it is.
    pub fn stop(&mut self) -> &mut Self {
        self.cancel();
        self.auto = false;
        self
    }

    // ---- time ----------------------------------------------------------

    /// Advance the counter's clock by `dt_ms`, delivering due flip phases
    /// and continuation fires in timestamp order. A large `dt_ms` catches
    /// up several ticks deterministically in one call.
    pub fn update(&mut self, dt_ms: u64) -> &mut Self {
        let horizon = self.clock_ms + dt_ms;
        loop {
            let phase_due = self.timeline.next_due().filter(|d| *d <= horizon);
            let cont_due = self
                .pending
                .map(|c| c.due_ms)
                .filter(|d| *d <= horizon);
            match (phase_due, cont_due) {
                (Some(p), Some(c)) if p <= c => self.fire_phase(p),
                (Some(_), Some(c)) => self.fire_continuation(c),
                (Some(p), None) => self.fire_phase(p),
                (None, Some(c)) => self.fire_continuation(c),
                (None, None) => break,
            }
        }
        self.clock_ms = horizon;
        self
    }

    // ---- internals -----------------------------------------------------

    /// Replace the pending continuation; at most one is ever outstanding.
    fn schedule(&mut self, kind: ContinuationKind, delay_ms: u64) {
        self.pending = Some(Continuation {
            due_ms: self.clock_ms + delay_ms,
            kind,
        });
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn fire_phase(&mut self, due_ms: u64) {
        self.clock_ms = due_ms;
        if let Some((position, visual)) = self.timeline.pop_due(due_ms) {
            self.renderer.set_digit_visual(position, visual);
        }
    }

    fn fire_continuation(&mut self, due_ms: u64) {
        // Anchoring the clock at the due time keeps the cadence fixed and
        // lets the fired tick schedule flips relative to its own instant.
        self.clock_ms = due_ms;
        if let Some(c) = self.pending.take() {
            match c.kind {
                ContinuationKind::Auto => self.auto_tick(),
                ContinuationKind::Walk { target } => self.walk_step(target),
                ContinuationKind::Ramp { target, plan } => self.ramp_step(target, plan),
            }
        }
    }

    fn auto_tick(&mut self) {
        self.show_value((self.value + self.increment).max(0));
        if self.auto {
            self.schedule(ContinuationKind::Auto, self.pace_ms);
        }
    }

    fn walk_step(&mut self, target: i64) {
        let stride = self.increment.abs().max(1);
        let next = if self.value < target {
            (self.value + stride).min(target)
        } else {
            (self.value - stride).max(target)
        };
        self.show_value(next);
        if next == target {
            self.auto = false;
        } else {
            self.schedule(ContinuationKind::Walk { target }, self.pace_ms);
        }
    }

    fn ramp_step(&mut self, target: i64, mut plan: RampPlan) {
        // A planned increment is at least 1, so the ramp always terminates.
        let stride = plan.increment.max(1);
        let next = (self.value + stride).min(target);
        self.show_value(next);
        if next >= target {
            self.auto = false;
        } else {
            plan.cycles_remaining = plan.cycles_remaining.saturating_sub(1);
            self.schedule(ContinuationKind::Ramp { target, plan }, plan.pace_ms);
        }
    }

    /// Diff the displayed digits against `next`, apply structural ops to
    /// the renderer immediately and queue the flip phases.
    fn show_value(&mut self, next: i64) {
        let next = next.max(0);
        let old = digits::to_digits(self.value as u64);
        let new = digits::to_digits(next as u64);
        self.value = next;

        let d = diff::diff(&old, &new);
        for op in &d.structural {
            if let SlotOp::RemoveSlot { position } = op {
                self.timeline.cancel_position(*position);
            }
            self.apply_slot_op(*op);
        }
        for t in d.transitions {
            let speed = flip_speed(self.pace_ms, self.auto, t.position);
            self.timeline.schedule(self.clock_ms, t, speed);
        }
    }

    fn apply_slot_op(&mut self, op: SlotOp) {
        match op {
            SlotOp::AddSlot { position, digit } => self.renderer.add_digit_slot(position, digit),
            SlotOp::RemoveSlot { position } => self.renderer.remove_digit_slot(position),
            SlotOp::InsertSeparator { position } => self.renderer.insert_separator(position),
            SlotOp::RemoveSeparator { position } => self.renderer.remove_separator(position),
        }
    }
}
