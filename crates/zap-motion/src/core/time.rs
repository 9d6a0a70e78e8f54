use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Tick count at which the frame counter wraps back to zero.
/// ~193 days at 60 Hz, far below the 2^53 safe-integer range of a JS host.
pub const FRAME_WRAP_CEILING: u64 = 1_000_000_000;

/// Wall-clock source: seconds elapsed since some fixed origin.
pub trait TimeSource {
    fn now_seconds(&self) -> f64;
}

/// Monotonic time source backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually driven time source. Clones share the same underlying value,
/// so a test can keep one handle and hand another to an updater.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    seconds: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new(seconds: f64) -> Self {
        Self { seconds: Rc::new(Cell::new(seconds)) }
    }

    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    pub fn advance(&self, dt: f64) {
        self.seconds.set(self.seconds.get() + dt);
    }
}

impl TimeSource for ManualTime {
    fn now_seconds(&self) -> f64 {
        self.seconds.get()
    }
}

/// Overflow-guarded frame counter plus the wall-clock seconds of the
/// current and previous tick.
///
/// The integer counter is a long-run safety counter only; motion math uses
/// [`FrameClock::seconds`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: u64,
    ceiling: u64,
    seconds: f64,
    last_seconds: Option<f64>,
    max_delta: f64,
    delta: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_ceiling(FRAME_WRAP_CEILING)
    }

    /// Create a clock that wraps at `ceiling` ticks (minimum 1).
    pub fn with_ceiling(ceiling: u64) -> Self {
        Self {
            frame: 0,
            ceiling: ceiling.max(1),
            seconds: 0.0,
            last_seconds: None,
            max_delta: f64::INFINITY,
            delta: 0.0,
        }
    }

    /// Clamp per-tick deltas to `max_delta` seconds (stalls, tab switches).
    pub fn with_max_delta(mut self, max_delta: f64) -> Self {
        if max_delta.is_finite() && max_delta > 0.0 {
            self.max_delta = max_delta;
        }
        self
    }

    /// Advance one tick to wall-clock time `now`. Returns the clamped delta
    /// in seconds since the previous tick (0 on the first tick).
    pub fn advance(&mut self, now: f64) -> f64 {
        self.frame += 1;
        if self.frame >= self.ceiling {
            log::info!("frame clock wrapped after {} ticks", self.ceiling);
            self.frame = 0;
        }

        let raw = match self.last_seconds {
            Some(last) => now - last,
            None => 0.0,
        };
        if raw < 0.0 {
            log::debug!("wall clock went backwards by {:.6}s, treating as zero", -raw);
        }
        self.delta = if raw.is_finite() { raw.clamp(0.0, self.max_delta) } else { 0.0 };
        if now.is_finite() {
            self.seconds = now;
            self.last_seconds = Some(now);
        }
        self.delta
    }

    /// Ticks since start (or since the last wrap).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Wall-clock seconds recorded on the latest tick.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Clamped delta of the latest tick, in seconds.
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_tick() {
        let mut clock = FrameClock::new();
        for i in 0..10 {
            clock.advance(i as f64 / 60.0);
        }
        assert_eq!(clock.frame(), 10);
    }

    #[test]
    fn wraps_to_zero_at_ceiling() {
        let mut clock = FrameClock::with_ceiling(5);
        for _ in 0..4 {
            clock.advance(0.0);
        }
        assert_eq!(clock.frame(), 4);
        clock.advance(0.0);
        assert_eq!(clock.frame(), 0);
        clock.advance(0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn default_ceiling_covers_a_month_at_60hz() {
        let month_of_ticks = 30 * 24 * 60 * 60 * 60u64;
        assert!(FRAME_WRAP_CEILING > month_of_ticks);
        assert!(FRAME_WRAP_CEILING < (1u64 << 53));
    }

    #[test]
    fn first_delta_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12.5), 0.0);
        assert!((clock.advance(12.75) - 0.25).abs() < 1e-12);
        assert_eq!(clock.seconds(), 12.75);
    }

    #[test]
    fn backwards_time_gives_zero_delta() {
        let mut clock = FrameClock::new();
        clock.advance(5.0);
        assert_eq!(clock.advance(4.0), 0.0);
    }

    #[test]
    fn delta_is_clamped() {
        let mut clock = FrameClock::new().with_max_delta(0.1);
        clock.advance(0.0);
        assert!((clock.advance(3.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn manual_time_clones_share_state() {
        let time = ManualTime::new(1.0);
        let other = time.clone();
        time.advance(0.5);
        assert_eq!(other.now_seconds(), 1.5);
    }
}
