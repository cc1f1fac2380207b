//! Deterministic game clock

/// Longest frame the clock will accept, in milliseconds
const MAX_FRAME_MS: f64 = 250.0;

/// Tracks simulation time in milliseconds.
///
/// The clock only moves when [`advance`](GameClock::advance) is called, so a
/// scripted run replays identically regardless of wall-clock speed.
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Milliseconds since the clock started
    now_ms: f64,
    /// Duration of the last frame in milliseconds
    delta_ms: f64,
    /// Number of frames advanced so far
    frame: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            delta_ms: 0.0,
            frame: 0,
        }
    }

    /// Start the clock at a given time (hosts whose own clock is already running)
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::new()
        }
    }

    /// Advance the clock by one frame. Call once per tick.
    pub fn advance(&mut self, dt_ms: f64) {
        // Clamp to avoid spiral of death after a stall; negative and non-finite steps are ignored
        self.delta_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        self.now_ms += self.delta_ms;
        self.frame += 1;
    }

    /// Current time in milliseconds
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    pub fn delta_secs(&self) -> f64 {
        self.delta_ms / 1000.0
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.delta_ms(), 0.0);
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = GameClock::new();
        clock.advance(16.0);
        clock.advance(16.0);
        assert_eq!(clock.now(), 32.0);
        assert_eq!(clock.frame(), 2);
        assert!((clock.delta_secs() - 0.016).abs() < 1e-12);
    }

    #[test]
    fn test_advance_clamps_long_and_negative_frames() {
        let mut clock = GameClock::starting_at(100.0);
        clock.advance(1000.0);
        assert_eq!(clock.now(), 350.0);

        clock.advance(-5.0);
        assert_eq!(clock.now(), 350.0);
        assert_eq!(clock.delta_ms(), 0.0);
    }

    #[test]
    fn test_advance_ignores_non_finite_frames() {
        let mut clock = GameClock::starting_at(50.0);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        assert_eq!(clock.now(), 50.0);
        assert_eq!(clock.delta_ms(), 0.0);

        clock.advance(16.0);
        assert_eq!(clock.now(), 66.0);
    }
}
