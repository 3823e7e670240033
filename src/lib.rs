//! Parallax star field: stars fly toward the viewer out of a vanishing point,
//! with optional trails, glow and pointer-driven parallax.

pub mod color;
pub mod control;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod math;
pub mod options;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod star;
pub mod surface;

pub use color::{Rgb, Rgba, StarColor};
pub use control::{Control, ResizeDebounce};
pub use error::{PresetError, SurfaceError};
pub use field::{StarField, Viewport};
pub use options::{FieldOptions, FollowContext};
pub use star::Star;
pub use surface::{DrawCommand, Recorder, Surface};
