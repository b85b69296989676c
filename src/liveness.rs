//! Liveness monitoring for the head-tracking signal.
//!
//! A two-state quiet-period machine: the signal is `Active` while distinct
//! samples keep arriving, and degrades to `Lost` once the observed value has
//! not changed for a full quiet period. Loss is judged on value stability,
//! not on callback cadence, so a sensor frozen on one coordinate reads the
//! same as a sensor that went silent.

use crate::{constants::DEFAULT_QUIET_PERIOD_MS, tracker::PositionSample};
use log::debug;
use std::time::{Duration, Instant};

/// Whether the head-tracking signal is currently trustworthy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// A recent, changing sample exists
    Active,
    /// No change observed for the quiet period
    Lost,
}

/// Quiet-period state machine watching the latest position sample
pub struct LivenessMonitor {
    state: TrackingState,
    last_known_view: PositionSample,
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl LivenessMonitor {
    /// Create a monitor with its quiet deadline armed at `now + quiet_period`
    #[must_use]
    pub fn new(quiet_period: Duration, now: Instant) -> Self {
        Self {
            state: TrackingState::Active,
            last_known_view: PositionSample::ORIGIN,
            quiet_period,
            deadline: Some(now + quiet_period),
        }
    }

    /// Create a monitor with the default 2-second quiet period
    #[must_use]
    pub fn with_default_period(now: Instant) -> Self {
        Self::new(Duration::from_millis(DEFAULT_QUIET_PERIOD_MS), now)
    }

    /// Record a sample delivered by the tracker adapter.
    ///
    /// A fresh (distinct) sample activates tracking and re-arms the quiet
    /// deadline, so one arriving strictly before a due tick cancels that
    /// tick's declare-lost effect. A re-delivery of the exact value already
    /// known is a no-op: a frozen signal still comes due and stays lost.
    pub fn observe_sample(&mut self, sample: PositionSample, now: Instant) {
        if sample == self.last_known_view {
            return;
        }
        if self.state == TrackingState::Lost {
            debug!("Head tracking regained at {sample:?}");
        }
        self.state = TrackingState::Active;
        self.last_known_view = sample;
        self.deadline = Some(now + self.quiet_period);
    }

    /// Run the quiet-period check against the adapter's current live value.
    ///
    /// Has no effect before the armed deadline. Once due, an unchanged value
    /// (absent treated as the origin) transitions to `Lost` and disarms the
    /// deadline until a new sample arrives; a changed value re-arms it.
    pub fn tick(&mut self, live_view: Option<PositionSample>, now: Instant) -> TrackingState {
        let Some(deadline) = self.deadline else {
            return self.state;
        };
        if now < deadline {
            return self.state;
        }

        let current = live_view.unwrap_or(PositionSample::ORIGIN);
        if current == self.last_known_view {
            debug!("Head position unchanged for {:?}, tracking lost", self.quiet_period);
            self.state = TrackingState::Lost;
            self.deadline = None;
        } else {
            self.last_known_view = current;
            self.deadline = Some(now + self.quiet_period);
            self.state = TrackingState::Active;
        }

        self.state
    }

    /// Current tracking state
    #[must_use]
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Last position considered known by the monitor
    #[must_use]
    pub fn last_known_view(&self) -> PositionSample {
        self.last_known_view
    }

    /// Configured quiet period
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = Duration::from_millis(2000);

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_distinct_samples_keep_active() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(T, start);

        // Distinct samples every 500ms, ticks interleaved
        for i in 1..=8u64 {
            let sample = PositionSample::new(i as f64, 0.0, 0.0);
            monitor.observe_sample(sample, at(start, i * 500));
            let state = monitor.tick(Some(sample), at(start, i * 500 + 1));
            assert_eq!(state, TrackingState::Active);
        }
    }

    #[test]
    fn test_quiet_signal_becomes_lost() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(T, start);

        let sample = PositionSample::new(1.0, 2.0, 3.0);
        monitor.observe_sample(sample, at(start, 100));

        // Still inside the quiet period
        assert_eq!(monitor.tick(Some(sample), at(start, 1000)), TrackingState::Active);

        // Deadline passed with the same value
        assert_eq!(monitor.tick(Some(sample), at(start, 2200)), TrackingState::Lost);
    }

    #[test]
    fn test_first_tick_without_any_sample_is_lost() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(T, start);

        // No sample ever arrived; live value reads as the origin
        let state = monitor.tick(None, at(start, 2000));
        assert_eq!(state, TrackingState::Lost);
    }

    #[test]
    fn test_sample_before_due_tick_cancels_loss() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(T, start);

        monitor.observe_sample(PositionSample::new(1.0, 0.0, 0.0), at(start, 10));

        // Fresh sample lands just before the deadline
        let fresh = PositionSample::new(2.0, 0.0, 0.0);
        monitor.observe_sample(fresh, at(start, 2005));

        // The tick that would have declared loss finds a re-armed deadline
        assert_eq!(monitor.tick(Some(fresh), at(start, 2011)), TrackingState::Active);
    }

    #[test]
    fn test_frozen_value_becomes_lost_despite_redelivery() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(T, start);

        let frozen = PositionSample::new(0.4, 0.4, 0.4);
        monitor.observe_sample(frozen, at(start, 0));

        // The sensor keeps re-delivering the exact same coordinates
        for ms in (200..2000).step_by(200) {
            monitor.observe_sample(frozen, at(start, ms));
        }

        assert_eq!(monitor.tick(Some(frozen), at(start, 2100)), TrackingState::Lost);
    }

    #[test]
    fn test_changed_live_value_rearms_on_tick() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(T, start);

        monitor.observe_sample(PositionSample::new(1.0, 0.0, 0.0), at(start, 0));

        // The live accessor moved even though no delivery was pumped
        let moved = PositionSample::new(1.5, 0.0, 0.0);
        assert_eq!(monitor.tick(Some(moved), at(start, 2000)), TrackingState::Active);
        assert_eq!(monitor.last_known_view(), moved);

        // Next period with no further change degrades
        assert_eq!(monitor.tick(Some(moved), at(start, 4000)), TrackingState::Lost);
    }

    #[test]
    fn test_lost_stays_lost_until_new_sample() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(T, start);

        assert_eq!(monitor.tick(None, at(start, 2000)), TrackingState::Lost);

        // Ticks keep returning Lost with the deadline disarmed
        assert_eq!(monitor.tick(None, at(start, 10_000)), TrackingState::Lost);

        // A new sample re-arms and reactivates
        monitor.observe_sample(PositionSample::new(0.1, 0.2, 0.3), at(start, 11_000));
        assert_eq!(monitor.state(), TrackingState::Active);
        assert_eq!(monitor.tick(Some(PositionSample::new(0.1, 0.2, 0.3)), at(start, 11_500)), TrackingState::Active);
    }
}
