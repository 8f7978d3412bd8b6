/// Frame timer
///
/// Tracks global time (always running) and animation time (stopped while
/// paused), their per-frame deltas and the frame rate averaged over the last
/// second. All values are in seconds.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    last: Instant,
    fps_start: Instant,
    frame_counter: u32,
    paused_for: Duration,

    global_time: f32,
    global_delta_time: f32,
    time: f32,
    delta_time: f32,
    fps: f32,
    is_pause: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Timer whose zero is `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last: now,
            fps_start: now,
            frame_counter: 0,
            paused_for: Duration::ZERO,
            global_time: 0.0,
            global_delta_time: 0.0,
            time: 0.0,
            delta_time: 0.0,
            fps: 30.0,
            is_pause: false,
        }
    }

    /// Advance to the current instant (once per frame)
    pub fn response(&mut self) {
        self.response_at(Instant::now());
    }

    /// Advance to `now`
    pub fn response_at(&mut self, now: Instant) {
        let delta = now.saturating_duration_since(self.last);

        self.global_time = now.saturating_duration_since(self.start).as_secs_f32();
        self.global_delta_time = delta.as_secs_f32();

        if self.is_pause {
            self.paused_for += delta;
            self.delta_time = 0.0;
        } else {
            self.delta_time = self.global_delta_time;
            self.time = now
                .saturating_duration_since(self.start)
                .saturating_sub(self.paused_for)
                .as_secs_f32();
        }

        self.frame_counter += 1;
        let since_fps = now.saturating_duration_since(self.fps_start);
        if since_fps >= Duration::from_secs(1) {
            self.fps = self.frame_counter as f32 / since_fps.as_secs_f32();
            self.fps_start = now;
            self.frame_counter = 0;
        }

        self.last = now;
    }

    pub fn global_time(&self) -> f32 {
        self.global_time
    }

    pub fn global_delta_time(&self) -> f32 {
        self.global_delta_time
    }

    /// Animation time, excluding paused intervals
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Animation delta, zero while paused
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Frames per second over the last full second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn is_pause(&self) -> bool {
        self.is_pause
    }

    pub fn set_pause(&mut self, pause: bool) {
        self.is_pause = pause;
    }

    pub fn toggle_pause(&mut self) {
        self.is_pause = !self.is_pause;
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
