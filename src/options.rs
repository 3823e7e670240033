use crate::color::{FixedColor, Rgb, StarColor};
use crate::error::PresetError;
use crate::math::vec::positive_or_one;
use gamemath::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::io::Write;
use std::path::Path;

/// Where the drawing surface sits in the coordinate space of pointer events.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FollowContext {
    /// Pointer coordinates are already relative to the surface.
    Surface,
    /// The surface's top-left corner is at `(x, y)` in pointer coordinates.
    Offset { x: f32, y: f32 },
}

impl FollowContext {
    pub fn origin(&self) -> Vec2<f32> {
        match *self {
            FollowContext::Surface => Vec2::new(0.0, 0.0),
            FollowContext::Offset { x, y } => Vec2::new(x, y),
        }
    }
}

impl Default for FollowContext {
    fn default() -> Self {
        FollowContext::Surface
    }
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldOptions {
    pub num_stars: usize,
    pub min_speed: f32,
    pub max_speed: f32,

    #[serde_as(as = "FixedColor")]
    pub color: StarColor,
    pub glow: bool,

    pub trails: bool,
    pub longer_trails: bool,
    pub trail_color: Rgb,

    pub pause_on_blur: bool,
    pub follow_mouse: bool,
    pub follow_context: FollowContext,
}

impl Default for FieldOptions {
    fn default() -> Self {
        FieldOptions {
            num_stars: 400,
            min_speed: 2.0,
            max_speed: 5.0,
            color: StarColor::default(),
            glow: false,
            trails: false,
            longer_trails: false,
            trail_color: Rgb::WHITE,
            pause_on_blur: true,
            follow_mouse: false,
            follow_context: FollowContext::Surface,
        }
    }
}

impl FieldOptions {
    /// Forces both speeds positive. Zero or NaN speeds become 1.
    pub fn sanitized(mut self) -> Self {
        self.min_speed = sanitize_speed("min_speed", self.min_speed);
        self.max_speed = sanitize_speed("max_speed", self.max_speed);
        self
    }

    pub fn set_num_stars(&mut self, val: i64) {
        if val < 0 {
            warn!("negative star count {}, using {}", val, val.unsigned_abs());
        }
        self.num_stars = val.unsigned_abs() as usize;
    }

    pub fn set_min_speed(&mut self, val: f32) {
        self.min_speed = sanitize_speed("min_speed", val);
    }

    pub fn set_max_speed(&mut self, val: f32) {
        self.max_speed = sanitize_speed("max_speed", val);
    }

    pub fn save_preset<P: AsRef<Path>>(&self, path: P) -> Result<(), PresetError> {
        let bytes = rmp_serde::to_vec(self)?;

        let mut file = std::fs::File::create(path)?;
        file.write_all(&bytes)?;

        Ok(())
    }

    pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<FieldOptions, PresetError> {
        let bytes = std::fs::read(path)?;

        let options: FieldOptions = rmp_serde::from_read_ref(&bytes)?;
        Ok(options.sanitized())
    }
}

fn sanitize_speed(name: &str, val: f32) -> f32 {
    let speed = positive_or_one(val);
    if speed != val {
        warn!("{} {} is not a positive speed, using {}", name, val, speed);
    }
    speed
}
