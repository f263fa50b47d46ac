use std::{
    collections::VecDeque,
    fmt::Display,
    time::{Duration, Instant},
};

pub mod config;
pub mod console;
pub mod core;
pub mod input;
pub mod light_form;
pub mod pipeline;
pub mod populate;
pub mod viewer;

pub use config::{create_clap_command, handle_clap_matches, ViewerConfig};
pub use core::geometry;
pub use core::Camera;
pub use core::Color;
pub use core::Entity;
pub use core::Scene;
pub use viewer::{Viewer, ViewerError};

/// Frame times kept for the min/avg/max readout.
const FRAME_HISTORY: usize = 120;

pub struct Metrics {
    pub frame_time: Duration,
    pub fps_counter: u32,
    pub fps_update_timer: Instant,
    pub current_fps: f32,
    pub frame_times: VecDeque<f32>,
    pub total_frames: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            frame_time: Duration::from_secs_f32(1.0 / 60.0),
            fps_counter: 0,
            fps_update_timer: Instant::now(),
            current_fps: 0.0,
            frame_times: VecDeque::with_capacity(FRAME_HISTORY + 1),
            total_frames: 0,
        }
    }

    /// Records one frame. Returns true once per second, when the FPS readout changes.
    pub fn update(&mut self, frame_delta: Duration) -> bool {
        self.fps_counter += 1;
        self.total_frames += 1;
        self.frame_time = frame_delta;
        self.frame_times.push_back(frame_delta.as_secs_f32() * 1000.0);
        if self.frame_times.len() > FRAME_HISTORY {
            self.frame_times.pop_front();
        }

        let elapsed = self.fps_update_timer.elapsed();
        if elapsed < Duration::from_secs(1) {
            return false;
        }
        self.current_fps = self.fps_counter as f32 / elapsed.as_secs_f32();
        self.fps_counter = 0;
        self.fps_update_timer = Instant::now();
        true
    }

    pub fn average_frame_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.1} | Avg: {:.2}ms | Min: {:.2}ms | Max: {:.2}ms",
            self.current_fps,
            self.average_frame_ms(),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::min)
                .unwrap_or(0.0),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::max)
                .unwrap_or(0.0)
        )
    }
}
