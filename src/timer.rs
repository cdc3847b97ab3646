//! Round timer. Times are host milliseconds (`performance.now()` in the
//! browser) passed in by the caller, so the timer itself never reads a clock.

/// `m:ss`, seconds zero padded. Minutes are not capped.
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundTimer {
    started_at: Option<f64>,
    frozen_ms: Option<u64>,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) from `now`, discarding any previous reading.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
        self.frozen_ms = None;
    }

    pub fn elapsed_ms(&self, now: f64) -> u64 {
        match (self.started_at, self.frozen_ms) {
            (_, Some(frozen)) => frozen,
            (Some(start), None) => (now - start).max(0.0) as u64,
            (None, None) => 0,
        }
    }

    /// Display text for a periodic tick; `None` once stopped.
    pub fn tick(&self, now: f64) -> Option<String> {
        self.started_at
            .map(|start| format_elapsed((now - start).max(0.0) as u64))
    }

    /// Stop and freeze the elapsed time. Only the first call after a start
    /// returns the reading.
    pub fn stop(&mut self, now: f64) -> Option<u64> {
        let start = self.started_at.take()?;
        let elapsed = (now - start).max(0.0) as u64;
        self.frozen_ms = Some(elapsed);
        Some(elapsed)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_elapsed(125_000), "2:05");
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(59_999), "0:59");
        assert_eq!(format_elapsed(61 * 60_000), "61:00");
    }

    #[test]
    fn stops_exactly_once() {
        let mut t = RoundTimer::new();
        t.start(1_000.0);
        assert_eq!(t.tick(4_500.0).as_deref(), Some("0:03"));
        assert_eq!(t.stop(126_000.0), Some(125_000));
        assert_eq!(t.stop(200_000.0), None);
        assert_eq!(t.tick(300_000.0), None);
        assert_eq!(t.elapsed_ms(999_999.0), 125_000);
    }

    #[test]
    fn restart_clears_frozen_value() {
        let mut t = RoundTimer::new();
        t.start(0.0);
        t.stop(5_000.0);
        t.start(10_000.0);
        assert_eq!(t.elapsed_ms(12_000.0), 2_000);
        assert_eq!(t.tick(13_000.0).as_deref(), Some("0:03"));
    }
}
