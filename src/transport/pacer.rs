use std::time::{Duration, Instant};

use crate::foundation::core::{Fps, FrameIndex, TICKS_PER_SECOND};
use crate::transport::frame::Pacing;

/// Monotonic time source used by [`FramePacer`].
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Block the calling thread for `d`.
    fn sleep(&self, d: Duration);
}

/// [`Clock`] backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Holds callers until each frame is due at a fixed frame rate.
///
/// With [`Pacing::Auto`] the first frame goes out immediately and defines the epoch; frame `n` is
/// then due at `epoch + n / fps`. When the caller falls more than `max_lag_frames` behind, the
/// epoch is moved forward instead of letting frames burst out to catch up.
#[derive(Debug)]
pub struct FramePacer<C = MonotonicClock> {
    fps: Fps,
    clock: C,
    epoch: Option<Duration>,
    next: FrameIndex,
    max_lag_frames: u64,
    resyncs: u64,
}

impl FramePacer<MonotonicClock> {
    /// Pacer on the system monotonic clock.
    pub fn new(fps: Fps) -> Self {
        Self::with_clock(fps, MonotonicClock::default())
    }
}

impl<C: Clock> FramePacer<C> {
    /// Pacer on a custom clock.
    pub fn with_clock(fps: Fps, clock: C) -> Self {
        Self {
            fps,
            clock,
            epoch: None,
            next: FrameIndex(0),
            max_lag_frames: 2,
            resyncs: 0,
        }
    }

    /// Frames of lag tolerated before the schedule is reset.
    pub fn with_max_lag_frames(mut self, frames: u64) -> Self {
        self.max_lag_frames = frames;
        self
    }

    /// Configured frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// How many times the schedule was reset after falling behind.
    pub fn resyncs(&self) -> u64 {
        self.resyncs
    }

    /// Borrow the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wait as `pacing` requires and return the frame's timestamp in 100 ns ticks.
    pub fn wait(&mut self, pacing: Pacing) -> i64 {
        match pacing {
            Pacing::Explicit(ts) => ts,
            Pacing::Auto => self.wait_auto(),
        }
    }

    fn wait_auto(&mut self) -> i64 {
        let index = self.next;
        self.next = index.next();
        let ts = self.fps.timestamp_ticks(index);

        let now = self.clock.now();
        let Some(epoch) = self.epoch else {
            self.epoch = Some(now);
            return ts;
        };

        let due = epoch + ticks_to_duration(ts);
        if now < due {
            self.clock.sleep(due - now);
            return ts;
        }

        let frame = Duration::from_secs_f64(self.fps.frame_duration_secs());
        if now - due > frame * self.max_lag_frames.min(u64::from(u32::MAX)) as u32 {
            tracing::debug!(
                frame = index.0,
                lag_ms = (now - due).as_secs_f64() * 1000.0,
                "pacer fell behind, resetting schedule"
            );
            self.epoch = Some(now - ticks_to_duration(ts));
            self.resyncs += 1;
        }
        ts
    }
}

fn ticks_to_duration(ticks: i64) -> Duration {
    let ticks = ticks.max(0) as u64;
    Duration::from_secs(ticks / TICKS_PER_SECOND)
        + Duration::from_nanos((ticks % TICKS_PER_SECOND) * 100)
}

#[cfg(test)]
#[path = "../../tests/unit/transport/pacer.rs"]
mod tests;
