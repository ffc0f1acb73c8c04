/// Game loop timing
///
/// Fixed timestep for gameplay updates with variable-rate rendering.
/// Frame-counted rules (cooldowns, end-screen fades) advance once per
/// update; wall-clock timers advance by the real time between frames.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Target update rate, ~1/60 second
const FIXED_TIMESTEP: Duration = Duration::from_micros(16_667);

/// Maximum number of updates per frame to prevent spiral of death
const MAX_UPDATES_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// What the driver should do for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Fixed updates to run before rendering
    pub updates: u32,
    /// Wall-clock time since the previous frame
    pub elapsed: Duration,
}

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated every 10 frames)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a game loop whose first frame is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: start,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame now
    pub fn begin_frame(&mut self) -> FrameTick {
        self.begin_frame_at(Instant::now())
    }

    /// Begin a new frame at an explicit instant
    pub fn begin_frame_at(&mut self, now: Instant) -> FrameTick {
        let elapsed = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(elapsed);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += elapsed;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP && updates < MAX_UPDATES_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP;
            updates += 1;
        }

        // Drop the backlog we refused to simulate
        if updates == MAX_UPDATES_PER_FRAME && self.accumulator >= FIXED_TIMESTEP {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        FrameTick { updates, elapsed }
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
