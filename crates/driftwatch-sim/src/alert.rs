//! Alert sink trait and stub implementations.
//!
//! When an at-risk point drifts beyond the configured threshold, the tick
//! cycle hands a [`WanderAlert`] to the [`AlertSink`]. The trait abstracts
//! the notification channel -- a toast service, a pager gateway, a log
//! line, or a test collector.
//!
//! Delivery is fire-and-forget by contract: `notify` returns nothing, and
//! a sink that drops or fails to deliver an alert is indistinguishable
//! from one that succeeded. The tick cycle must never be interrupted by
//! alerting.

use driftwatch_types::WanderAlert;

/// A fire-and-forget notification channel for wander alerts.
///
/// The tick cycle calls [`notify`](Self::notify) once per alert, every
/// tick the drift persists. Implementations must not block the tick for
/// long and have no way to report failure back.
pub trait AlertSink {
    /// Deliver one alert. Best-effort; failures are not observable.
    fn notify(&mut self, alert: &WanderAlert);
}

/// A sink that discards every alert.
///
/// Used in tests and wherever alert delivery is intentionally disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAlertSink;

impl NullAlertSink {
    /// Create a new discarding sink.
    pub const fn new() -> Self {
        Self
    }
}

impl AlertSink for NullAlertSink {
    fn notify(&mut self, _alert: &WanderAlert) {}
}

/// A sink that collects every alert into a vector.
///
/// Useful for asserting on exact alert sequences in tests.
#[derive(Debug, Clone, Default)]
pub struct VecAlertSink {
    /// All delivered alerts, in delivery order.
    pub alerts: Vec<WanderAlert>,
}

impl VecAlertSink {
    /// Create a new empty collector.
    pub const fn new() -> Self {
        Self { alerts: Vec::new() }
    }
}

impl AlertSink for VecAlertSink {
    fn notify(&mut self, alert: &WanderAlert) {
        self.alerts.push(alert.clone());
    }
}

#[cfg(test)]
mod tests {
    use driftwatch_types::{Category, LatLon, Point};

    use super::*;

    fn make_alert() -> WanderAlert {
        let point = Point::new(
            "Dona Regina",
            "Icarai",
            LatLon::new(-22.896, -43.1059),
            Category::Ward,
            true,
        );
        WanderAlert::new(&point, 0.9, 3)
    }

    #[test]
    fn null_sink_accepts_alerts() {
        let mut sink = NullAlertSink::new();
        sink.notify(&make_alert());
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink = VecAlertSink::new();
        let first = make_alert();
        let second = make_alert();
        sink.notify(&first);
        sink.notify(&second);
        assert_eq!(sink.alerts.len(), 2);
        assert_eq!(sink.alerts.first().map(|a| a.id), Some(first.id));
        assert_eq!(sink.alerts.get(1).map(|a| a.id), Some(second.id));
    }
}
