use crate::error::SurfaceError;
use crate::field::StarField;
use crate::options::FieldOptions;
use crate::surface::Surface;
use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

/// Quiet period after the last resize before the field is rebuilt.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Signals a host sends to a running star field.
#[derive(Clone, Debug)]
pub enum Control {
    Start,
    Stop,
    Reset,
    SetOptions(FieldOptions),
    SetNumStars(i64),
    SetMinSpeed(f32),
    SetMaxSpeed(f32),
    SetFollowMouse(bool),
    PointerMoved { x: f32, y: f32 },
    /// The host window lost focus.
    Blur,
    Focus,
}

impl<S: Surface, R: Rng> StarField<S, R> {
    pub fn apply(&mut self, control: Control) -> Result<(), SurfaceError> {
        match control {
            Control::Start => self.start(),
            Control::Stop => self.stop(),
            Control::Reset => self.reset()?,
            Control::SetOptions(options) => self.set_options(options)?,
            Control::SetNumStars(val) => self.set_num_stars(val)?,
            Control::SetMinSpeed(val) => self.set_min_speed(val)?,
            Control::SetMaxSpeed(val) => self.set_max_speed(val)?,
            Control::SetFollowMouse(val) => self.set_follow_mouse(val),
            Control::PointerMoved { x, y } => self.pointer_moved(x, y),
            Control::Blur => {
                if self.options().pause_on_blur {
                    self.stop();
                }
            }
            Control::Focus => {
                if self.options().pause_on_blur {
                    self.start();
                }
            }
        }
        Ok(())
    }
}

/// Stops the field while the host is being resized and rebuilds it once
/// resizing has settled.
#[derive(Clone, Debug)]
pub struct ResizeDebounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebounce {
    pub fn new(delay: Duration) -> Self {
        ResizeDebounce {
            delay,
            deadline: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn resized<S: Surface, R: Rng>(&mut self, now: Instant, field: &mut StarField<S, R>) {
        field.stop();
        self.deadline = Some(now + self.delay);
    }

    /// Resets and restarts the field once the delay has passed. Returns
    /// whether it did.
    pub fn poll<S: Surface, R: Rng>(
        &mut self,
        now: Instant,
        field: &mut StarField<S, R>,
    ) -> Result<bool, SurfaceError> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                debug!("resize settled, rebuilding field");
                field.reset()?;
                field.start();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        ResizeDebounce::new(RESIZE_DEBOUNCE)
    }
}
