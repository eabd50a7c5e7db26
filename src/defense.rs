//! Defense mode: a timed deflection challenge.
//!
//! The controller is a small state machine that arbitrates one armed session
//! at a time: capture the unmitigated baseline crater, evaluate deflection
//! attempts against it, and resolve exactly once, by attempt or by
//! countdown expiry. It talks to the outside world only through the narrow
//! [`DefenseObserver`] interface and an injected clock, so any scheduler
//! (the frame loop or a test harness) can drive it deterministically.

use crate::config::DefenseConfig;

/// Fixed high-threat scenario handed to the caller when a session arms.
///
/// The coordinates put the impact in a coastal zone so the stakes read
/// clearly in the environment readouts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThreatParameters {
    pub diameter_m: f64,
    pub velocity_kms: f64,
    pub impact_lat: f64,
    pub impact_lon: f64,
}

/// The one threat every defense session simulates.
pub const DEFENSE_THREAT: ThreatParameters = ThreatParameters {
    diameter_m: 450.0,
    velocity_kms: 32.0,
    impact_lat: 34.05,
    impact_lon: -118.25,
};

/// Terminal result of an armed session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefenseResolution {
    /// Crater reduction met the success threshold.
    Success { reduction_pct: f64 },
    /// An attempt was made but fell short of the threshold.
    Failure { reduction_pct: f64 },
    /// The countdown ran out before a qualifying attempt.
    Timeout,
}

/// Outcome of a single `evaluate_attempt` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttemptOutcome {
    /// Not armed, or no baseline captured yet. Nothing happened.
    Ignored,
    /// Delta-v was zero or negative; the session stays armed.
    NeedMoreDeltaV,
    /// The session resolved.
    Resolved(DefenseResolution),
}

/// Narrow observer interface the UI layer implements.
///
/// Default no-op bodies let tests implement only what they assert on.
pub trait DefenseObserver {
    /// A session armed: the input form should freeze.
    fn lock_inputs(&mut self) {}
    /// The session ended (resolved or cancelled): inputs usable again.
    fn unlock_inputs(&mut self) {}
    /// Remaining countdown time, reported every tick while armed.
    fn countdown(&mut self, _remaining_secs: f64) {}
    /// Non-terminal guidance ("needs more delta-v").
    fn hint(&mut self, _message: &str) {}
    /// The single terminal resolution for this session.
    fn resolve(&mut self, _resolution: &DefenseResolution) {}
    /// Countdown expired; the caller should re-render the baseline view.
    fn expired(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Armed {
        /// Clock value at which the countdown runs out.
        deadline: f64,
        /// Unmitigated crater size, captured once per session.
        baseline_crater_km: Option<f64>,
    },
}

/// Countdown/arbitration state machine for defense mode.
pub struct DefenseController<O: DefenseObserver> {
    config: DefenseConfig,
    phase: Phase,
    pub observer: O,
}

impl<O: DefenseObserver> DefenseController<O> {
    pub fn new(config: DefenseConfig, observer: O) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            observer,
        }
    }

    /// Whether a session is currently armed.
    pub fn is_armed(&self) -> bool {
        matches!(self.phase, Phase::Armed { .. })
    }

    /// Whether the armed session has captured its baseline.
    pub fn has_baseline(&self) -> bool {
        matches!(
            self.phase,
            Phase::Armed {
                baseline_crater_km: Some(_),
                ..
            }
        )
    }

    /// Arm a session and return the fixed threat to simulate.
    ///
    /// Idempotent while armed: a second call returns the same threat without
    /// resetting the running countdown or the captured baseline.
    pub fn start(&mut self, now: f64) -> ThreatParameters {
        if self.is_armed() {
            return DEFENSE_THREAT;
        }

        self.phase = Phase::Armed {
            deadline: now + self.config.countdown_secs,
            baseline_crater_km: None,
        };
        self.observer.lock_inputs();
        self.observer.countdown(self.config.countdown_secs);
        DEFENSE_THREAT
    }

    /// Capture the unmitigated crater size. First capture per session wins;
    /// calls while idle are ignored.
    pub fn record_baseline(&mut self, crater_km: f64) {
        if let Phase::Armed {
            baseline_crater_km: baseline @ None,
            ..
        } = &mut self.phase
            && crater_km.is_finite()
            && crater_km > 0.0
        {
            *baseline = Some(crater_km);
        }
    }

    /// Judge a deflection attempt against the captured baseline.
    pub fn evaluate_attempt(&mut self, crater_km: f64, delta_v_ms: f64) -> AttemptOutcome {
        let Phase::Armed {
            baseline_crater_km: Some(baseline),
            ..
        } = self.phase
        else {
            return AttemptOutcome::Ignored;
        };

        if delta_v_ms <= 0.0 {
            self.observer
                .hint("Apply some delta-v to push the impactor off course.");
            return AttemptOutcome::NeedMoreDeltaV;
        }

        let reduction = 1.0 - crater_km / baseline;
        let reduction_pct = reduction * 100.0;
        let resolution = if reduction >= self.config.success_threshold {
            DefenseResolution::Success { reduction_pct }
        } else {
            DefenseResolution::Failure { reduction_pct }
        };

        self.resolve_session(resolution, false);
        AttemptOutcome::Resolved(resolution)
    }

    /// Advance the countdown. Resolves with a timeout when the deadline
    /// passes; otherwise reports remaining time to the observer.
    pub fn tick(&mut self, now: f64) {
        let Phase::Armed { deadline, .. } = self.phase else {
            return;
        };

        if now >= deadline {
            self.resolve_session(DefenseResolution::Timeout, true);
        } else {
            self.observer.countdown(deadline - now);
        }
    }

    /// Return to idle from any state, stopping a running countdown.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.observer.unlock_inputs();
    }

    /// Terminal transition. Clears the armed state before invoking any
    /// callback so a reentrant call observes an idle controller.
    fn resolve_session(&mut self, resolution: DefenseResolution, timed_out: bool) {
        self.phase = Phase::Idle;
        self.observer.resolve(&resolution);
        if timed_out {
            self.observer.expired();
        }
        self.observer.unlock_inputs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Observer that records every callback for assertions.
    #[derive(Default)]
    struct Recorder {
        locks: u32,
        unlocks: u32,
        countdowns: Vec<f64>,
        hints: Vec<String>,
        resolutions: Vec<DefenseResolution>,
        expiries: u32,
    }

    impl DefenseObserver for Recorder {
        fn lock_inputs(&mut self) {
            self.locks += 1;
        }
        fn unlock_inputs(&mut self) {
            self.unlocks += 1;
        }
        fn countdown(&mut self, remaining_secs: f64) {
            self.countdowns.push(remaining_secs);
        }
        fn hint(&mut self, message: &str) {
            self.hints.push(message.to_string());
        }
        fn resolve(&mut self, resolution: &DefenseResolution) {
            self.resolutions.push(*resolution);
        }
        fn expired(&mut self) {
            self.expiries += 1;
        }
    }

    fn controller() -> DefenseController<Recorder> {
        DefenseController::new(DefenseConfig::default(), Recorder::default())
    }

    #[test]
    fn test_start_arms_and_locks() {
        let mut ctl = controller();
        assert!(!ctl.is_armed());

        let threat = ctl.start(0.0);
        assert!(ctl.is_armed());
        assert_eq!(threat, DEFENSE_THREAT);
        assert_eq!(ctl.observer.locks, 1);
        assert_eq!(ctl.observer.countdowns, vec![10.0]);
    }

    #[test]
    fn test_start_is_idempotent_while_armed() {
        let mut ctl = controller();
        let first = ctl.start(0.0);
        ctl.record_baseline(3.0);

        // Re-entry: same threat, countdown and baseline untouched
        let second = ctl.start(5.0);
        assert_eq!(first, second);
        assert_eq!(ctl.observer.locks, 1);
        assert!(ctl.has_baseline());

        // Original deadline still stands: expires at t=10, not t=15
        ctl.tick(10.0);
        assert_eq!(ctl.observer.resolutions, vec![DefenseResolution::Timeout]);
    }

    #[test]
    fn test_baseline_captured_once() {
        let mut ctl = controller();
        ctl.start(0.0);
        ctl.record_baseline(3.0);
        ctl.record_baseline(9.0);

        // First capture wins: 2.0 km vs baseline 3.0 is a 33% reduction
        let outcome = ctl.evaluate_attempt(2.0, 500.0);
        match outcome {
            AttemptOutcome::Resolved(DefenseResolution::Success { reduction_pct }) => {
                assert!((reduction_pct - 100.0 / 3.0).abs() < 1e-9);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_baseline_ignored_while_idle() {
        let mut ctl = controller();
        ctl.record_baseline(3.0);
        ctl.start(0.0);
        assert!(!ctl.has_baseline());
    }

    #[test]
    fn test_attempt_without_baseline_is_ignored() {
        let mut ctl = controller();
        ctl.start(0.0);
        assert_eq!(ctl.evaluate_attempt(1.0, 500.0), AttemptOutcome::Ignored);
        assert!(ctl.is_armed(), "ignored attempt must not resolve");
    }

    #[test]
    fn test_attempt_while_idle_is_ignored() {
        let mut ctl = controller();
        assert_eq!(ctl.evaluate_attempt(1.0, 500.0), AttemptOutcome::Ignored);
        assert!(ctl.observer.resolutions.is_empty());
    }

    #[test]
    fn test_zero_delta_v_hints_without_resolving() {
        let mut ctl = controller();
        ctl.start(0.0);
        ctl.record_baseline(3.0);

        assert_eq!(ctl.evaluate_attempt(3.0, 0.0), AttemptOutcome::NeedMoreDeltaV);
        assert_eq!(ctl.evaluate_attempt(3.0, -50.0), AttemptOutcome::NeedMoreDeltaV);
        assert!(ctl.is_armed(), "hint must keep the session armed");
        assert_eq!(ctl.observer.hints.len(), 2);
        assert!(ctl.observer.resolutions.is_empty());
    }

    #[test]
    fn test_insufficient_reduction_fails() {
        let mut ctl = controller();
        ctl.start(0.0);
        ctl.record_baseline(3.0);

        // 10% reduction, threshold is 20%
        let outcome = ctl.evaluate_attempt(2.7, 500.0);
        match outcome {
            AttemptOutcome::Resolved(DefenseResolution::Failure { reduction_pct }) => {
                assert!((reduction_pct - 10.0).abs() < 1e-9);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!ctl.is_armed());
        assert_eq!(ctl.observer.unlocks, 1);
    }

    #[test]
    fn test_timeout_resolves_exactly_once() {
        let mut ctl = controller();
        ctl.start(0.0);
        ctl.record_baseline(3.0);

        ctl.tick(4.0);
        assert!(ctl.is_armed());

        ctl.tick(10.0);
        ctl.tick(11.0);
        ctl.tick(12.0);

        assert_eq!(ctl.observer.resolutions, vec![DefenseResolution::Timeout]);
        assert_eq!(ctl.observer.expiries, 1);
        assert_eq!(ctl.observer.unlocks, 1);

        // No success can follow a timeout in the same session
        assert_eq!(ctl.evaluate_attempt(0.1, 5000.0), AttemptOutcome::Ignored);
        assert_eq!(ctl.observer.resolutions.len(), 1);
    }

    #[test]
    fn test_countdown_reports_remaining_time() {
        let mut ctl = controller();
        ctl.start(0.0);
        ctl.tick(3.0);
        ctl.tick(7.5);

        assert_eq!(ctl.observer.countdowns, vec![10.0, 7.0, 2.5]);
    }

    #[test]
    fn test_cancel_is_safe_from_any_state() {
        let mut ctl = controller();
        ctl.cancel();
        assert!(!ctl.is_armed());

        ctl.start(0.0);
        ctl.cancel();
        assert!(!ctl.is_armed());
        assert!(ctl.observer.resolutions.is_empty());

        // Cancelled countdown never fires
        ctl.tick(100.0);
        assert!(ctl.observer.resolutions.is_empty());
        assert_eq!(ctl.observer.expiries, 0);
    }

    #[test]
    fn test_fresh_session_after_resolution() {
        let mut ctl = controller();
        ctl.start(0.0);
        ctl.record_baseline(3.0);
        ctl.evaluate_attempt(1.0, 500.0);

        // A new start opens a fresh session with a clean baseline
        ctl.start(20.0);
        assert!(ctl.is_armed());
        assert!(!ctl.has_baseline());
        ctl.record_baseline(4.0);
        let outcome = ctl.evaluate_attempt(1.0, 500.0);
        assert!(matches!(
            outcome,
            AttemptOutcome::Resolved(DefenseResolution::Success { .. })
        ));
        assert_eq!(ctl.observer.resolutions.len(), 2);
    }
}
