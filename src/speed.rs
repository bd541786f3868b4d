use crate::{Config, Error, Result};
use std::{
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
    time::Duration,
};

/// Frames per second of the animation, shared between the animation loop and
/// whatever adjusts it.
///
/// Clones share the same value. The loop reads it once per frame; a change made
/// in between is picked up on the next frame.
#[derive(Clone, Debug)]
pub struct PlaybackSpeed {
    fps: Arc<AtomicU32>,
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self::new(Config::FPS_INIT)
    }
}

impl PlaybackSpeed {
    /// Creates a speed of `fps`, clamped to `[Config::FPS_MIN, Config::FPS_MAX]`.
    pub fn new(fps: u32) -> Self {
        Self {
            fps: Arc::new(AtomicU32::new(Self::clamp(fps))),
        }
    }

    pub fn get(&self) -> u32 {
        self.fps.load(Ordering::Relaxed)
    }

    /// Stores `fps` clamped to the allowed range and returns the stored value.
    pub fn set(&self, fps: u32) -> u32 {
        let fps = Self::clamp(fps);
        self.fps.store(fps, Ordering::Relaxed);
        fps
    }

    pub fn increase(&self) -> u32 {
        self.set(self.get().saturating_add(1))
    }

    pub fn decrease(&self) -> u32 {
        self.set(self.get().saturating_sub(1))
    }

    /// Pause between two frames at the current speed.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.get().max(1)))
    }

    /// Applies a textual command: `+` or `-` to step the speed, or a number to
    /// set it. Returns the resulting speed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for anything else.
    pub fn apply(&self, command: &str) -> Result<u32> {
        match command.trim() {
            "+" => Ok(self.increase()),
            "-" => Ok(self.decrease()),
            value => value.parse().map(|fps| self.set(fps)).map_err(|_| {
                Error::InvalidArgument(format!(
                    "expected '+', '-' or a speed between {} and {}, got \"{value}\"",
                    Config::FPS_MIN,
                    Config::FPS_MAX
                ))
            }),
        }
    }

    fn clamp(fps: u32) -> u32 {
        fps.clamp(Config::FPS_MIN, Config::FPS_MAX)
    }
}
