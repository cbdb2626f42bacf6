use std::time::{Duration, Instant};

/// Frames per time unit used to turn the frame counter into simulation time
pub const TIME_BASE_FPS: f64 = 60.0;
/// Draw rate while the animation is playing
pub const ACTIVE_FRAME_RATE: u32 = 120;

/// Animation state owned by a sketch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationState {
    /// Simulation paused
    paused: bool,
    /// Frames drawn while playing
    frame_count: u64,
    /// Draw rate restored on play
    active_rate: u32,
}

impl AnimationState {
    pub fn new(paused: bool, active_rate: u32) -> Self {
        AnimationState {
            paused,
            frame_count: 0,
            active_rate,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulation time in time units
    pub fn time(&self) -> f64 {
        self.frame_count as f64 / TIME_BASE_FPS
    }

    /// Current draw rate; zero while paused
    pub fn frame_rate(&self) -> u32 {
        if self.paused {
            0
        } else {
            self.active_rate
        }
    }

    /// Moves to the next frame unless paused
    pub fn advance(&mut self) {
        if !self.paused {
            self.frame_count += 1;
        }
    }

    /// Returns true if the state changed
    pub fn pause(&mut self) -> bool {
        let changed = !self.paused;
        self.paused = true;
        changed
    }

    /// Returns true if the state changed
    pub fn play(&mut self) -> bool {
        let changed = self.paused;
        self.paused = false;
        changed
    }
}

/// Decides when the next frame is due for a given draw rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { last_frame: None }
    }

    fn interval(rate: u32) -> Option<Duration> {
        (rate > 0).then(|| Duration::from_secs_f64(1.0 / rate as f64))
    }

    /// Time left until the next frame, or `None` if no frame will ever be due
    pub fn time_until_due(&self, rate: u32, now: Instant) -> Option<Duration> {
        let interval = Self::interval(rate)?;
        match self.last_frame {
            None => Some(Duration::ZERO),
            Some(last) => Some((last + interval).saturating_duration_since(now)),
        }
    }

    /// Returns true and records the frame if one is due at `now`
    pub fn take_due(&mut self, rate: u32, now: Instant) -> bool {
        match self.time_until_due(rate, now) {
            Some(left) if left.is_zero() => {
                self.last_frame = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Forgets the last frame so the next one is due immediately
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Measures the actual draw rate over one-second windows
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        FpsCounter {
            frames_since_last_update: 0,
            last_fps_calculation: now,
            fps: 0.0,
        }
    }

    pub fn record_frame(&mut self, now: Instant) {
        self.frames_since_last_update += 1;
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}
