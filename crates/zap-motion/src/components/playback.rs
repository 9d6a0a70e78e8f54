//! Playback status for a single object animation.
//!
//! The state machine is `Stopped → Playing → (end of cycle) → …`. At the end
//! of a cycle the configured behaviours fire: loop restarts the cycle,
//! reverse flips the direction, teleport primes the status so the host can
//! snap the object back to its start transform.

use crate::api::error::MotionError;
use crate::api::types::AnimationId;

/// Static configuration of an animation's timing and end-of-cycle behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Length of one cycle in milliseconds.
    pub default_duration_ms: f64,
    /// Playback speed override. `None` plays at the default duration.
    pub speed_multiplier: Option<f64>,
    pub auto_loop: bool,
    pub auto_reverse: bool,
    /// Keep the direction across a loop restart, so loop + reverse
    /// alternates direction every cycle instead of restarting reversed.
    pub preserve_direction: bool,
    pub teleports_to_beginning: bool,
    /// Base duration for end-of-cycle detection when the reset override is on.
    /// Falls back to `default_duration_ms`.
    pub reset_duration_ms: Option<f64>,
    /// Reset speed override. `None` (or an invalid value) disables it.
    pub reset_speed_multiplier: Option<f64>,
}

impl PlaybackConfig {
    pub fn new(default_duration_ms: f64) -> Self {
        Self {
            default_duration_ms,
            speed_multiplier: None,
            auto_loop: false,
            auto_reverse: false,
            preserve_direction: false,
            teleports_to_beginning: false,
            reset_duration_ms: None,
            reset_speed_multiplier: None,
        }
    }

    pub fn looping(mut self) -> Self {
        self.auto_loop = true;
        self
    }

    pub fn reversing(mut self) -> Self {
        self.auto_reverse = true;
        self
    }

    /// Loop and reverse, carrying the direction over each restart.
    pub fn ping_pong(mut self) -> Self {
        self.auto_loop = true;
        self.auto_reverse = true;
        self.preserve_direction = true;
        self
    }

    pub fn teleporting(mut self) -> Self {
        self.teleports_to_beginning = true;
        self
    }

    pub fn with_speed(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = Some(multiplier);
        self
    }

    pub fn with_reset_speed(mut self, multiplier: f64) -> Self {
        self.reset_speed_multiplier = Some(multiplier);
        self
    }

    pub fn with_reset_duration(mut self, duration_ms: f64) -> Self {
        self.reset_duration_ms = Some(duration_ms);
        self
    }

    /// Report configuration values that would divide by zero or go non-finite.
    /// The runtime tolerates all of them; this is for callers that want to
    /// reject bad data up front.
    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.default_duration_ms.is_finite() && self.default_duration_ms > 0.0) {
            return Err(MotionError::InvalidDuration(self.default_duration_ms));
        }
        if let Some(reset) = self.reset_duration_ms {
            if !(reset.is_finite() && reset > 0.0) {
                return Err(MotionError::InvalidDuration(reset));
            }
        }
        if let Some(m) = self.speed_multiplier {
            if !valid_multiplier(m) {
                return Err(MotionError::InvalidSpeedMultiplier(m));
            }
        }
        if let Some(m) = self.reset_speed_multiplier {
            if !valid_multiplier(m) {
                return Err(MotionError::InvalidResetMultiplier(m));
            }
        }
        Ok(())
    }

    /// Duration of one cycle after the speed override.
    /// An invalid multiplier leaves the default duration in place.
    pub fn effective_duration_ms(&self) -> f64 {
        match self.speed_multiplier {
            Some(m) if valid_multiplier(m) => self.default_duration_ms / m,
            _ => self.default_duration_ms,
        }
    }

    /// `reset_duration / reset_speed_multiplier`, or `None` when the reset
    /// override is off or its multiplier is unusable.
    fn reset_duration_post_override(&self) -> Option<f64> {
        let m = self.reset_speed_multiplier.filter(|m| valid_multiplier(*m))?;
        let base = self.reset_duration_ms.unwrap_or(self.default_duration_ms);
        Some(base / m)
    }
}

fn valid_multiplier(m: f64) -> bool {
    m.is_finite() && m > 0.0
}

/// Where the animation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing { paused: bool },
    /// Still playing, with a teleport back to the start pending for the host.
    Teleporting { paused: bool },
}

/// Mutable playback state of one animation.
#[derive(Debug, Clone)]
pub struct PlaybackStatus {
    pub id: AnimationId,
    config: PlaybackConfig,
    reset_duration_post_override: Option<f64>,
    elapsed_ms: f64,
    state: PlaybackState,
    reversed: bool,
    has_started: bool,
}

impl PlaybackStatus {
    /// Create a stopped status. Invalid configuration is logged, not rejected.
    pub fn new(id: AnimationId, config: PlaybackConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("animation {:?}: {}", id, err);
        }
        Self {
            id,
            reset_duration_post_override: config.reset_duration_post_override(),
            config,
            elapsed_ms: 0.0,
            state: PlaybackState::Stopped,
            reversed: false,
            has_started: false,
        }
    }

    /// Accrue elapsed time. Only counts while playing and unpaused.
    pub fn add_delta(&mut self, ms: f64) {
        if self.is_running() && ms.is_finite() && ms > 0.0 {
            self.elapsed_ms += ms;
        }
    }

    /// Fire the end-of-cycle behaviours if the cycle has been exceeded.
    /// Returns whether they fired.
    pub fn check_end_shift(&mut self) -> bool {
        if !self.is_playing() || self.elapsed_ms <= self.end_threshold_ms() {
            return false;
        }
        self.conditional_end_shift();
        true
    }

    /// `add_delta` followed by `check_end_shift`: one tick of playback.
    pub fn advance(&mut self, ms: f64) -> bool {
        self.add_delta(ms);
        self.check_end_shift()
    }

    /// Apply loop / reverse / teleport. Loop resets the status (direction
    /// included, unless `preserve_direction` is set), then reverse toggles
    /// the direction. With none of them configured the animation stops.
    pub fn conditional_end_shift(&mut self) {
        let carry = self.cycle_carry();
        let reversed = self.reversed;
        let cfg = self.config;

        if cfg.auto_loop {
            self.restart();
            if cfg.preserve_direction {
                self.reversed = reversed;
            }
        }
        if cfg.auto_reverse {
            self.reversed = !self.reversed;
        }
        if cfg.teleports_to_beginning {
            self.state = match self.state {
                PlaybackState::Playing { paused } | PlaybackState::Teleporting { paused } => {
                    PlaybackState::Teleporting { paused }
                }
                PlaybackState::Stopped => PlaybackState::Stopped,
            };
        }

        if cfg.auto_loop || cfg.auto_reverse || cfg.teleports_to_beginning {
            self.elapsed_ms = carry;
        } else {
            self.force_stop();
        }
    }

    /// Overshoot past the end threshold, wrapped into one cycle.
    fn cycle_carry(&self) -> f64 {
        let threshold = self.end_threshold_ms();
        if !(threshold.is_finite() && threshold > 0.0) {
            return 0.0;
        }
        (self.elapsed_ms - threshold).rem_euclid(threshold)
    }

    /// Reset and start playing from the beginning.
    pub fn restart(&mut self) {
        self.reset_no_restart();
        self.force_start();
    }

    /// Reset every runtime field to its initial value; leaves the status stopped.
    pub fn reset_no_restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.state = PlaybackState::Stopped;
        self.reversed = false;
        self.has_started = false;
    }

    pub fn force_start(&mut self) {
        if self.state == PlaybackState::Stopped {
            self.state = PlaybackState::Playing { paused: false };
        }
        self.has_started = true;
    }

    pub fn force_stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Suspend or resume time accrual. No effect while stopped.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            PlaybackState::Stopped => PlaybackState::Stopped,
            PlaybackState::Playing { paused } => PlaybackState::Playing { paused: !paused },
            PlaybackState::Teleporting { paused } => PlaybackState::Teleporting { paused: !paused },
        };
    }

    pub fn toggle_reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    /// Arm or clear the pending teleport. The host clears it after moving
    /// the object. No effect while stopped.
    pub fn toggle_primed_for_teleport(&mut self) {
        self.state = match self.state {
            PlaybackState::Stopped => PlaybackState::Stopped,
            PlaybackState::Playing { paused } => PlaybackState::Teleporting { paused },
            PlaybackState::Teleporting { paused } => PlaybackState::Playing { paused },
        };
    }

    // -- Queries --

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Threshold `elapsed_ms` must strictly exceed to end a cycle.
    pub fn end_threshold_ms(&self) -> f64 {
        self.reset_duration_post_override
            .unwrap_or(self.config.default_duration_ms)
    }

    pub fn is_playing(&self) -> bool {
        !self.is_stopped()
    }

    pub fn is_stopped(&self) -> bool {
        self.state == PlaybackState::Stopped
    }

    pub fn is_paused(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Playing { paused: true } | PlaybackState::Teleporting { paused: true }
        )
    }

    /// Playing and not paused.
    pub fn is_running(&self) -> bool {
        self.is_playing() && !self.is_paused()
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn is_primed_for_teleport(&self) -> bool {
        matches!(self.state, PlaybackState::Teleporting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(config: PlaybackConfig) -> PlaybackStatus {
        let mut s = PlaybackStatus::new(AnimationId(1), config);
        s.force_start();
        s
    }

    #[test]
    fn starts_stopped() {
        let s = PlaybackStatus::new(AnimationId(1), PlaybackConfig::new(1000.0));
        assert!(s.is_stopped());
        assert!(!s.is_playing());
        assert!(!s.has_started());
    }

    #[test]
    fn add_delta_only_while_running() {
        let mut s = PlaybackStatus::new(AnimationId(1), PlaybackConfig::new(1000.0));
        s.add_delta(100.0);
        assert_eq!(s.elapsed_ms(), 0.0);

        s.force_start();
        s.add_delta(100.0);
        assert_eq!(s.elapsed_ms(), 100.0);

        s.toggle_pause();
        assert!(s.is_paused());
        s.add_delta(100.0);
        assert_eq!(s.elapsed_ms(), 100.0);

        s.toggle_pause();
        s.add_delta(-50.0);
        s.add_delta(f64::NAN);
        assert_eq!(s.elapsed_ms(), 100.0);
    }

    #[test]
    fn loop_carries_overshoot_within_the_tick() {
        let mut s = status(PlaybackConfig::new(1000.0).looping());
        s.add_delta(600.0);
        assert!(!s.check_end_shift());
        s.add_delta(600.0);
        assert!(s.check_end_shift());
        assert!((s.elapsed_ms() - 200.0).abs() < 1e-9);
        assert!(s.is_playing());
        assert!(!s.is_stopped());
    }

    #[test]
    fn boundary_is_strictly_greater_than() {
        let mut s = status(PlaybackConfig::new(1000.0).looping());
        assert!(!s.advance(1000.0));
        assert_eq!(s.elapsed_ms(), 1000.0);
        assert!(s.advance(0.5));
        assert!(s.elapsed_ms() < 1000.0);
    }

    #[test]
    fn loop_and_reverse_restarts_reversed() {
        let mut s = status(PlaybackConfig::new(100.0).looping().reversing());
        s.advance(101.0);
        assert!(s.is_reversed());
        s.advance(101.0);
        assert!(s.is_reversed());
        s.advance(101.0);
        assert!(s.is_reversed());
        assert!(s.is_playing());
    }

    #[test]
    fn reverse_without_loop_toggles_each_cycle() {
        let mut s = status(PlaybackConfig::new(100.0).reversing());
        s.advance(101.0);
        assert!(s.is_reversed());
        s.advance(101.0);
        assert!(!s.is_reversed());
    }

    #[test]
    fn ping_pong_alternates_direction() {
        let mut s = status(PlaybackConfig::new(100.0).ping_pong());
        s.advance(101.0);
        assert!(s.is_reversed());
        s.advance(101.0);
        assert!(!s.is_reversed());
        assert!(s.is_playing());
    }

    #[test]
    fn teleport_primes_and_host_clears() {
        let mut s = status(PlaybackConfig::new(100.0).looping().teleporting());
        s.advance(150.0);
        assert!(s.is_primed_for_teleport());
        assert!(s.is_playing());
        s.toggle_primed_for_teleport();
        assert!(!s.is_primed_for_teleport());
        assert_eq!(s.state(), PlaybackState::Playing { paused: false });
    }

    #[test]
    fn no_end_behaviour_stops() {
        let mut s = status(PlaybackConfig::new(100.0));
        s.advance(150.0);
        assert!(s.is_stopped());
        assert!(!s.advance(100.0));
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut s = status(PlaybackConfig::new(100.0));
        s.add_delta(40.0);
        s.force_start();
        assert_eq!(s.elapsed_ms(), 40.0);
        s.force_stop();
        s.force_stop();
        assert!(s.is_stopped());
        assert!(!s.is_playing());
    }

    #[test]
    fn stopped_cannot_pause_or_prime() {
        let mut s = PlaybackStatus::new(AnimationId(1), PlaybackConfig::new(100.0));
        s.toggle_pause();
        s.toggle_primed_for_teleport();
        assert_eq!(s.state(), PlaybackState::Stopped);
    }

    #[test]
    fn restart_resets_fields() {
        let mut s = status(PlaybackConfig::new(100.0).looping());
        s.add_delta(50.0);
        s.toggle_reverse();
        s.restart();
        assert_eq!(s.elapsed_ms(), 0.0);
        assert!(!s.is_reversed());
        assert!(s.is_playing());
        s.reset_no_restart();
        assert!(s.is_stopped());
        assert!(!s.has_started());
    }

    #[test]
    fn reset_override_shortens_cycle() {
        let s = status(PlaybackConfig::new(1000.0).with_reset_speed(4.0));
        assert_eq!(s.end_threshold_ms(), 250.0);
        let s = status(PlaybackConfig::new(1000.0).with_reset_duration(600.0).with_reset_speed(2.0));
        assert_eq!(s.end_threshold_ms(), 300.0);
    }

    #[test]
    fn zero_reset_multiplier_disables_override() {
        let config = PlaybackConfig::new(1000.0).with_reset_speed(0.0);
        assert!(matches!(config.validate(), Err(MotionError::InvalidResetMultiplier(_))));
        let s = status(config);
        assert_eq!(s.end_threshold_ms(), 1000.0);
    }

    #[test]
    fn speed_override_scales_duration() {
        assert_eq!(PlaybackConfig::new(1000.0).with_speed(2.0).effective_duration_ms(), 500.0);
        assert_eq!(PlaybackConfig::new(1000.0).with_speed(0.0).effective_duration_ms(), 1000.0);
    }

    #[test]
    fn validate_rejects_zero_duration() {
        assert!(matches!(
            PlaybackConfig::new(0.0).validate(),
            Err(MotionError::InvalidDuration(_))
        ));
        assert!(PlaybackConfig::new(16.0).looping().validate().is_ok());
    }

    #[test]
    fn zero_duration_loop_does_not_produce_nan() {
        let mut s = status(PlaybackConfig::new(0.0).looping());
        s.advance(16.0);
        assert_eq!(s.elapsed_ms(), 0.0);
        assert!(s.is_playing());
    }
}
