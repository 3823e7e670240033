use log::debug;
use std::time::{Duration, Instant};

/// Decides when a frame is due. The host calls [`FrameLoop::tick`] once per
/// display refresh; frames are only produced while the loop is running.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    running: bool,
    frame_interval: Duration,
    last_frame: Option<Instant>,
    frames: u64,
}

impl FrameLoop {
    pub fn new(frames_per_second: u32) -> Self {
        FrameLoop {
            running: false,
            frame_interval: Duration::new(0, 1_000_000_000u32 / frames_per_second.max(1)),
            last_frame: None,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            debug!("frame loop started after {} frames", self.frames);
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!("frame loop stopped after {} frames", self.frames);
        }
        self.running = false;
        self.last_frame = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Returns whether a frame should be rendered at `now`.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        self.frames += 1;
        self.last_frame = Some(now);
        true
    }

    /// Time left until the next frame is due, for hosts without vsync.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_frame {
            Some(last) => self
                .frame_interval
                .checked_sub(now.saturating_duration_since(last))
                .unwrap_or_default(),
            None => Duration::default(),
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        FrameLoop::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ticks_while_running() {
        let mut frame_loop = FrameLoop::default();
        assert!(!frame_loop.tick());

        frame_loop.start();
        assert!(frame_loop.tick());
        assert!(frame_loop.tick());
        assert_eq!(frame_loop.frames(), 2);

        frame_loop.stop();
        assert!(!frame_loop.tick());
        assert_eq!(frame_loop.frames(), 2);
    }

    #[test]
    fn remaining_counts_down_from_last_frame() {
        let mut frame_loop = FrameLoop::new(50);
        let start = Instant::now();
        assert_eq!(frame_loop.remaining(start), Duration::default());

        frame_loop.start();
        frame_loop.tick_at(start);
        assert_eq!(frame_loop.remaining(start), Duration::from_millis(20));
        assert_eq!(
            frame_loop.remaining(start + Duration::from_millis(5)),
            Duration::from_millis(15)
        );
        assert_eq!(
            frame_loop.remaining(start + Duration::from_millis(30)),
            Duration::default()
        );
    }
}
