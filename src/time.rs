//! Fixed-cadence game clock.
//!
//! The browser calls the draw callback at roughly 60 fps, and not at all
//! while the tab is hidden. `TickClock` turns those irregular wall-clock
//! samples into whole ticks; a gap longer than the offline cap is clipped so
//! a hidden tab earns the same as a closed one.

pub struct TickClock {
    ms_per_tick: f64,
    max_gap_ms: f64,
    /// Milliseconds not yet released as a tick.
    accumulator: f64,
    last_ms: Option<f64>,
    pub total_ticks: u64,
}

impl TickClock {
    pub fn new(ms_per_tick: f64, max_gap_secs: f64) -> Self {
        Self {
            ms_per_tick,
            max_gap_ms: max_gap_secs * 1000.0,
            accumulator: 0.0,
            last_ms: None,
            total_ticks: 0,
        }
    }

    /// Feed the current wall-clock time and get the ticks that elapsed.
    /// The first sample only sets the baseline.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_ms {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_gap_ms),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick).floor();
        self.accumulator -= ticks * self.ms_per_tick;
        let ticks = ticks as u32;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> TickClock {
        TickClock::new(250.0, 43_200.0)
    }

    #[test]
    fn first_sample_is_baseline() {
        let mut c = clock();
        assert_eq!(c.update(1_000_000.0), 0);
        assert_eq!(c.total_ticks, 0);
    }

    #[test]
    fn releases_whole_ticks_and_carries_remainder() {
        let mut c = clock();
        c.update(0.0);
        assert_eq!(c.update(600.0), 2);
        // 100 ms carried + 150 ms
        assert_eq!(c.update(750.0), 1);
        assert_eq!(c.total_ticks, 3);
    }

    #[test]
    fn frame_rate_samples_add_up() {
        let mut c = clock();
        c.update(0.0);
        let total: u32 = (1..=120).map(|i| c.update(i as f64 * 1000.0 / 60.0)).sum();
        // 2 seconds at 4 ticks per second
        assert!((7..=8).contains(&total), "got {}", total);
    }

    #[test]
    fn long_gap_is_capped() {
        let mut c = clock();
        c.update(0.0);
        let two_days = 48.0 * 3600.0 * 1000.0;
        assert_eq!(c.update(two_days), 172_800);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut c = clock();
        c.update(5_000.0);
        assert_eq!(c.update(1_000.0), 0);
        assert_eq!(c.update(1_250.0), 1);
    }
}
