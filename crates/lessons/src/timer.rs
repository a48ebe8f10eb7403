use std::time::{Duration, Instant};

/// Frame rates above this are treated as a measurement artifact and reported
/// as zero.
pub const MAX_PLAUSIBLE_FPS: f32 = 2_000_000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Stopped,
    Running {
        since: Instant,
    },
    Paused {
        elapsed: Duration,
    },
}

/// A stopwatch that can be paused.
///
/// Ticks are whole milliseconds. A stopped timer reads zero; a paused timer
/// reads the time accumulated before it was paused.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timer {
    state: State,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timer that is already running.
    #[must_use]
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    /// Starts (or restarts) the timer from zero.
    pub fn start(&mut self) {
        self.state = State::Running {
            since: Instant::now(),
        };
    }

    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    /// Freezes the elapsed time. Does nothing unless the timer is running.
    pub fn pause(&mut self) {
        if let State::Running { since } = self.state {
            self.state = State::Paused {
                elapsed: since.elapsed(),
            };
        }
    }

    /// Resumes counting from the paused time. Does nothing unless the timer
    /// is paused.
    pub fn unpause(&mut self) {
        if let State::Paused { elapsed } = self.state {
            let now = Instant::now();
            self.state = State::Running {
                since: now.checked_sub(elapsed).unwrap_or(now),
            };
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.state {
            State::Stopped => Duration::ZERO,
            State::Running { since } => since.elapsed(),
            State::Paused { elapsed } => elapsed,
        }
    }

    /// Elapsed milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn ticks(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state != State::Stopped
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self.state, State::Paused { .. })
    }
}

/// Average frames per second over `elapsed_ms` milliseconds.
///
/// Zero elapsed time, or anything faster than [`MAX_PLAUSIBLE_FPS`], reads as
/// zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_fps(frames: u64, elapsed_ms: u64) -> f32 {
    let fps = frames as f32 / (elapsed_ms as f32 / 1000.0);

    if fps.is_nan() || fps > MAX_PLAUSIBLE_FPS {
        0.0
    } else {
        fps
    }
}

/// Counts presented frames against a running timer.
#[derive(Clone, Copy, Debug)]
pub struct FrameCounter {
    timer: Timer,
    frames: u64,
}

impl FrameCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            timer: Timer::started(),
            frames: 0,
        }
    }

    pub fn tick(&mut self) {
        self.frames += 1;
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[must_use]
    pub fn average_fps(&self) -> f32 {
        average_fps(self.frames, self.timer.ticks())
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread::sleep;

    use super::*;

    const NAP: Duration = Duration::from_millis(20);

    #[test]
    fn stopped_reads_zero() {
        let mut timer = Timer::new();
        assert!(!timer.is_started());
        assert!(!timer.is_paused());
        assert_eq!(timer.ticks(), 0);

        timer.start();
        sleep(NAP);
        timer.stop();
        assert_eq!(timer.ticks(), 0);
        assert!(!timer.is_started());
    }

    #[test]
    fn pause_freezes_ticks() {
        let mut timer = Timer::started();
        sleep(NAP);
        timer.pause();
        assert!(timer.is_paused());
        assert!(timer.is_started());

        let frozen = timer.ticks();
        assert!(frozen >= 20);
        sleep(NAP);
        assert_eq!(timer.ticks(), frozen);

        timer.unpause();
        assert!(!timer.is_paused());
        sleep(NAP);
        assert!(timer.ticks() >= frozen + 20);
    }

    #[test]
    fn pause_and_unpause_need_the_right_state() {
        let mut timer = Timer::new();
        timer.pause();
        assert!(!timer.is_paused());

        timer.start();
        timer.unpause();
        assert!(!timer.is_paused());

        timer.pause();
        timer.pause();
        assert!(timer.is_paused());

        timer.start();
        assert!(!timer.is_paused());
    }

    #[test]
    fn fps() {
        assert_eq!(average_fps(120, 2000), 60.0);
        assert_eq!(average_fps(0, 1000), 0.0);
        assert_eq!(average_fps(0, 0), 0.0);
        assert_eq!(average_fps(10, 0), 0.0);
        assert_eq!(average_fps(3_000_000, 1000), 0.0);
    }

    #[test]
    fn frame_counter() {
        let mut counter = FrameCounter::new();
        assert!(counter.timer().is_started());

        for _ in 0..5 {
            counter.tick();
        }
        sleep(NAP);

        assert_eq!(counter.frames(), 5);
        let fps = counter.average_fps();
        assert!(fps > 0.0 && fps <= 5.0 / 0.02);
    }
}
