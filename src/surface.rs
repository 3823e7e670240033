//! Immediate-mode 2D drawing surface consumed by the star field.
//!
//! The calls mirror a canvas context: styles are set first, then a path is
//! built and stroked or filled. Coordinates are float pixels relative to the
//! current origin.

use crate::color::{Rgb, Rgba};
use crate::error::SurfaceError;

pub trait Surface {
    /// Width and height of the backing target in pixels.
    fn output_size(&self) -> Result<(u32, u32), SurfaceError>;

    fn set_line_width(&mut self, width: f32);
    fn set_stroke_style(&mut self, color: Rgba);
    fn set_fill_style(&mut self, color: Rgba);
    /// Soft shadow drawn around subsequent fills. A blur of zero disables it.
    fn set_shadow(&mut self, blur: f32, color: Rgb);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Pushes styles, shadow and transform onto a stack.
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    fn reset_transform(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    LineWidth(f32),
    StrokeStyle(Rgba),
    FillStyle(Rgba),
    Shadow { blur: f32, color: Rgb },
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc {
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Stroke,
    Fill,
    ClearRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Save,
    Restore,
    Translate(f32, f32),
    ResetTransform,
}

/// Headless surface that records every call.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub size: (u32, u32),
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(width: u32, height: u32) -> Self {
        Recorder {
            size: (width, height),
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::replace(&mut self.commands, Vec::new())
    }

    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Surface for Recorder {
    fn output_size(&self) -> Result<(u32, u32), SurfaceError> {
        Ok(self.size)
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::StrokeStyle(color));
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::FillStyle(color));
    }

    fn set_shadow(&mut self, blur: f32, color: Rgb) {
        self.commands.push(DrawCommand::Shadow { blur, color });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        self.commands.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate(x, y));
    }

    fn reset_transform(&mut self) {
        self.commands.push(DrawCommand::ResetTransform);
    }
}
