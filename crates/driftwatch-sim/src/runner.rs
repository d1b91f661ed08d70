//! Simulation loop runner with stop control.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives the tick loop with support for:
//!
//! - **Fixed tick period**: 500 ms by default, adjustable at runtime
//! - **Bounded runs**: stop after `max_ticks` when configured
//! - **Clean teardown**: a stop request interrupts the pending timer, so
//!   no tick fires after teardown is observed
//!
//! Exactly one tick runs at a time -- ticks are never re-entrant. There
//! is no queuing and no retry: a slow consumer simply sees the latest
//! materialized point set on the next callback.
//!
//! The runner wraps the single-tick [`run_tick`] function and adds the
//! control plane around it.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rand::Rng;
use tokio::sync::Notify;
use tracing::info;

use crate::alert::AlertSink;
use crate::tick::{self, SimulationState, TickError, TickParams, TickSummary};

/// Minimum accepted tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 100;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Reason why the simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Teardown was requested through the loop control.
    StopRequested,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct RunResult {
    /// The reason the run ended.
    pub end_reason: EndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations use this to recompute clusters, refit the viewport,
/// log summaries, and so on. The callback receives the tick summary and
/// the freshly-replaced simulation state.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Shared control state for a running simulation loop.
///
/// Wrapped in [`Arc`] and shared between the loop task and whoever owns
/// teardown. Atomic fields keep the loop hot path lock-free; the
/// [`Notify`] wakes the loop out of its inter-tick sleep the moment a
/// stop is requested, which is what makes teardown interrupt the pending
/// timer instead of waiting it out.
#[derive(Debug)]
pub struct LoopControl {
    /// Whether teardown has been requested.
    stop_requested: AtomicBool,

    /// Wakes the inter-tick sleep when a stop is requested.
    stop_notify: Notify,

    /// Current tick interval in milliseconds (runtime-adjustable).
    tick_interval_ms: AtomicU64,

    /// Maximum number of ticks (0 = unlimited).
    max_ticks: u64,
}

impl LoopControl {
    /// Create control state with the given tick interval and tick bound.
    pub const fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            stop_notify: Notify::const_new(),
            tick_interval_ms: AtomicU64::new(tick_interval_ms),
            max_ticks,
        }
    }

    /// Request teardown and wake the loop out of any pending sleep.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_one();
    }

    /// Check whether teardown has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Wait until teardown is requested.
    ///
    /// Returns immediately if a stop is already pending. `notify_one`
    /// stores a permit, so a request issued before this call is never
    /// lost.
    pub async fn stopped(&self) {
        while !self.is_stop_requested() {
            self.stop_notify.notified().await;
        }
    }

    /// Get the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Set the tick interval in milliseconds.
    ///
    /// Returns the previous interval on success, or `None` if the value
    /// was rejected (below [`MIN_TICK_INTERVAL_MS`]).
    pub fn set_tick_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms < MIN_TICK_INTERVAL_MS {
            return None;
        }
        let prev = self.tick_interval_ms.swap(ms, Ordering::AcqRel);
        Some(prev)
    }

    /// Check whether the tick limit has been reached.
    ///
    /// Returns `true` if `max_ticks > 0` and `current_tick >= max_ticks`.
    pub const fn tick_limit_reached(&self, current_tick: u64) -> bool {
        self.max_ticks > 0 && current_tick >= self.max_ticks
    }

    /// Get the configured max ticks.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }
}

/// Run the simulation loop until a termination condition is met.
///
/// This is the main entry point for a running simulation. Each iteration
/// checks for teardown, executes one tick, hands the result to the
/// callback, and then sleeps for the tick interval -- racing the sleep
/// against the stop notification so teardown is honored mid-sleep.
///
/// # Arguments
///
/// * `state` - Mutable simulation state (clock + point set)
/// * `params` - Movement and alerting tuning
/// * `rng` - Random source for the movement model
/// * `sink` - Wander alert delivery channel
/// * `control` - Shared stop/interval control
/// * `callback` - Called after each tick with the fresh state
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick execution fails unrecoverably.
pub async fn run_simulation(
    state: &mut SimulationState,
    params: &TickParams,
    rng: &mut impl Rng,
    sink: &mut dyn AlertSink,
    control: &Arc<LoopControl>,
    callback: &mut dyn TickCallback,
) -> Result<RunResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = control.max_ticks(),
        tick_interval_ms = control.tick_interval_ms(),
        points = state.points.len(),
        "Simulation starting"
    );

    loop {
        // --- Check teardown (before tick) ---
        if control.is_stop_requested() {
            info!(total_ticks, "Teardown requested");
            return Ok(RunResult {
                end_reason: EndReason::StopRequested,
                final_summary: last_summary,
                total_ticks,
            });
        }

        // --- Execute tick ---
        let summary = tick::run_tick(state, params, rng, sink)?;
        total_ticks = total_ticks.saturating_add(1);

        // --- Notify callback ---
        callback.on_tick(&summary, state);

        // --- Check tick limit (after tick) ---
        if control.tick_limit_reached(summary.tick) {
            info!(
                tick = summary.tick,
                max_ticks = control.max_ticks(),
                "Tick limit reached"
            );
            return Ok(RunResult {
                end_reason: EndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        // --- Sleep for the tick interval, unless teardown wakes us ---
        let interval_ms = control.tick_interval_ms();
        if interval_ms > 0 {
            tokio::select! {
                () = control.stopped() => {
                    info!(total_ticks, "Teardown requested during sleep");
                    return Ok(RunResult {
                        end_reason: EndReason::StopRequested,
                        final_summary: last_summary,
                        total_ticks,
                    });
                }
                () = tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)) => {}
            }
        }
    }
}

/// Log the simulation end sequence.
///
/// Called after [`run_simulation`] returns to report the outcome.
pub fn log_simulation_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );
}
