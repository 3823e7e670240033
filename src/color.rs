use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

/// Color with a fractional alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn alpha_byte(&self) -> u8 {
        (self.a.max(0.0).min(1.0) * 255.0).round() as u8
    }
}

pub type ColorFn = dyn Fn(f32, f32, f32) -> Rgb;

/// Fill color of a star: fixed, or computed from `(offset_x, offset_y, z)`.
#[derive(Clone)]
pub enum StarColor {
    Fixed(Rgb),
    Computed(Rc<ColorFn>),
}

impl StarColor {
    pub fn computed<F: Fn(f32, f32, f32) -> Rgb + 'static>(f: F) -> Self {
        StarColor::Computed(Rc::new(f))
    }

    pub fn resolve(&self, offset_x: f32, offset_y: f32, z: f32) -> Rgb {
        match self {
            StarColor::Fixed(color) => *color,
            StarColor::Computed(f) => f(offset_x, offset_y, z),
        }
    }
}

impl Default for StarColor {
    fn default() -> Self {
        StarColor::Fixed(Rgb::WHITE)
    }
}

impl fmt::Debug for StarColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StarColor::Fixed(color) => f.debug_tuple("Fixed").field(color).finish(),
            StarColor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Rgb> for StarColor {
    fn from(color: Rgb) -> Self {
        StarColor::Fixed(color)
    }
}

/// Serializes a [`StarColor`] as a plain [`Rgb`]. Computed colors are refused.
pub struct FixedColor;

impl SerializeAs<StarColor> for FixedColor {
    fn serialize_as<S>(source: &StarColor, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match source {
            StarColor::Fixed(color) => color.serialize(serializer),
            StarColor::Computed(_) => Err(serde::ser::Error::custom(
                "computed star colors cannot be serialized",
            )),
        }
    }
}

impl<'de> DeserializeAs<'de, StarColor> for FixedColor {
    fn deserialize_as<D>(deserializer: D) -> Result<StarColor, D::Error>
    where
        D: Deserializer<'de>,
    {
        Rgb::deserialize(deserializer).map(StarColor::Fixed)
    }
}
