//! Map-surface synchronization: apply each distinct bound exactly once.
//!
//! The surface (a slippy-map widget, in practice) is an injected
//! capability: it can re-center instantly and acknowledge completion.
//! The acknowledgement is a [`oneshot`] channel completed exactly once
//! per re-center request -- a request/acknowledge handshake rather than a
//! global event-bus subscription, so the machine can never react to
//! moves it did not request.
//!
//! # State machine
//!
//! `Idle -> Applying` when a bound arrives that differs from the last
//! applied one (or none has been applied yet): one `recenter` is issued.
//!
//! `Applying -> Idle` when the acknowledgement resolves. The receiver is
//! consumed at that moment; nothing is left listening. A dropped sender
//! also counts as completion, so a misbehaving surface cannot wedge the
//! machine.
//!
//! There is no queue: a bound arriving while `Applying` never interrupts
//! the in-flight application; the caller simply offers the newest bound
//! again on its next trigger (the next tick, in practice).

use driftwatch_types::{Bound, LatLon};
use tokio::sync::oneshot;
use tracing::debug;

/// An injected map surface capable of instant re-centering.
///
/// `recenter` must begin an unanimated move and return a receiver that
/// resolves exactly once when the move has completed. Implementations
/// that complete synchronously may resolve the receiver before
/// returning.
pub trait MapSurface {
    /// Begin an instant re-center to `center` at `zoom`.
    fn recenter(&mut self, center: LatLon, zoom: u32) -> oneshot::Receiver<()>;
}

/// Whether an application is in flight.
#[derive(Debug)]
enum SyncState {
    /// No re-center outstanding.
    Idle,
    /// A re-center was issued and its acknowledgement is pending.
    Applying(oneshot::Receiver<()>),
}

/// Applies freshly-computed bounds to a [`MapSurface`], once per distinct
/// bound value.
#[derive(Debug, Default)]
pub struct ViewportSync {
    /// Current machine state.
    state: SyncState,
    /// The bound most recently handed to the surface.
    last_applied: Option<Bound>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ViewportSync {
    /// Create a sync machine that has applied nothing yet.
    pub const fn new() -> Self {
        Self {
            state: SyncState::Idle,
            last_applied: None,
        }
    }

    /// Whether a re-center acknowledgement is still outstanding.
    ///
    /// Note this reflects the state as of the last [`offer`](Self::offer);
    /// an acknowledgement that has arrived since is observed on the next
    /// offer.
    pub const fn is_applying(&self) -> bool {
        matches!(self.state, SyncState::Applying(_))
    }

    /// The bound most recently handed to the surface, if any.
    pub const fn last_applied(&self) -> Option<Bound> {
        self.last_applied
    }

    /// Offer the newest bound; re-center the surface if it is new.
    ///
    /// Returns `true` if a re-center was issued. While an application is
    /// in flight the offer is a no-op (`false`) -- the caller re-offers
    /// the newest bound on its next trigger.
    pub fn offer(&mut self, bound: Bound, surface: &mut dyn MapSurface) -> bool {
        // Settle the in-flight application, if any.
        if let SyncState::Applying(rx) = &mut self.state {
            match rx.try_recv() {
                // Completed -- or the surface dropped the acknowledgement,
                // which counts the same so the machine cannot wedge.
                Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                    self.state = SyncState::Idle;
                }
                Err(oneshot::error::TryRecvError::Empty) => {
                    debug!("Re-center still in flight, deferring newest bound");
                    return false;
                }
            }
        }

        let is_new = self
            .last_applied
            .is_none_or(|prev| bound.differs_from(&prev));
        if !is_new {
            return false;
        }

        debug!(
            center = %bound.center,
            zoom = bound.min_zoom,
            "Applying new bound to surface"
        );
        let ack = surface.recenter(bound.center, bound.min_zoom);
        self.state = SyncState::Applying(ack);
        self.last_applied = Some(bound);
        true
    }
}
