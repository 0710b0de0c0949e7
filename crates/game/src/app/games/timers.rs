/// Physics constants are tuned per 60 Hz reference frame.
pub(crate) const REFERENCE_FRAME_SECONDS: f32 = 1.0 / 60.0;

pub(crate) fn reference_frames(fixed_dt_seconds: f32) -> f32 {
    fixed_dt_seconds / REFERENCE_FRAME_SECONDS
}

/// One-shot timer measured in seconds of simulation time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub(crate) fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Returns true on the tick the countdown runs out.
    pub(crate) fn tick(&mut self, dt_seconds: f32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.remaining -= dt_seconds;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

/// Repeating timer; `tick` reports how many periods elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IntervalTimer {
    period: f32,
    elapsed: f32,
}

impl IntervalTimer {
    pub(crate) fn new(period_seconds: f32) -> Self {
        Self {
            period: period_seconds.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    pub(crate) fn tick(&mut self, dt_seconds: f32) -> u32 {
        self.elapsed += dt_seconds;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once_then_idles() {
        let mut countdown = Countdown::default();
        assert!(!countdown.tick(1.0));

        countdown.start(0.25);
        assert!(countdown.is_running());
        assert!(!countdown.tick(0.1));
        assert!(!countdown.tick(0.1));
        assert!(countdown.tick(0.1));
        assert!(!countdown.is_running());
        assert!(!countdown.tick(0.1));
    }

    #[test]
    fn interval_timer_reports_every_elapsed_period() {
        let mut timer = IntervalTimer::new(0.1);
        assert_eq!(timer.tick(0.05), 0);
        assert_eq!(timer.tick(0.06), 1);
        assert_eq!(timer.tick(0.25), 2);
    }

    #[test]
    fn reference_frames_is_one_at_sixty_hz() {
        assert!((reference_frames(1.0 / 60.0) - 1.0).abs() < 1e-6);
        assert!((reference_frames(1.0 / 30.0) - 2.0).abs() < 1e-5);
    }
}
