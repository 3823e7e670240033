//! [`Surface`] backed by an SDL2 canvas.
//!
//! SDL only draws hairlines and rectangles, so thick strokes are laid down as
//! parallel lines and discs as horizontal spans. Shadows are approximated
//! with a few translucent rings around each disc.

use crate::color::{Rgb, Rgba};
use crate::error::SurfaceError;
use crate::math::vec::Perpendicular;
use crate::surface::Surface;
use gamemath::Vec2;
use log::warn;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas, RenderTarget};
use sdl2::video::Window;

/// Opacity of the innermost glow ring relative to the disc.
const SHADOW_STRENGTH: f32 = 0.25;

#[derive(Clone, Copy, Debug)]
struct DrawState {
    line_width: f32,
    stroke: Rgba,
    fill: Rgba,
    shadow_blur: f32,
    shadow_color: Rgb,
    origin: Vec2<f32>,
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState {
            line_width: 1.0,
            stroke: Rgb::WHITE.with_alpha(1.0),
            fill: Rgb::WHITE.with_alpha(1.0),
            shadow_blur: 0.0,
            shadow_color: Rgb::WHITE,
            origin: Vec2::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum PathElement {
    MoveTo(Vec2<f32>),
    LineTo(Vec2<f32>),
    Arc { center: Vec2<f32>, radius: f32 },
}

pub struct SdlSurface<T: RenderTarget> {
    canvas: Canvas<T>,
    background: Color,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Vec<PathElement>,
}

impl SdlSurface<Window> {
    pub fn from_window(window: Window) -> Result<Self, SurfaceError> {
        let canvas = window
            .into_canvas()
            .present_vsync()
            .build()
            .map_err(|e| SurfaceError::Unavailable(e.to_string()))?;
        Ok(SdlSurface::new(canvas))
    }
}

impl<T: RenderTarget> SdlSurface<T> {
    pub fn new(mut canvas: Canvas<T>) -> Self {
        canvas.set_blend_mode(BlendMode::Blend);
        SdlSurface {
            canvas,
            background: Color::RGB(0, 0, 0),
            state: DrawState::default(),
            saved: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.background = Color::RGB(color.r, color.g, color.b);
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<T> {
        &mut self.canvas
    }

    fn to_screen(&self, x: f32, y: f32) -> Vec2<f32> {
        Vec2::new(x + self.state.origin.x, y + self.state.origin.y)
    }

    fn draw_thick_line(&mut self, a: Vec2<f32>, b: Vec2<f32>) {
        let width = self.state.line_width;
        if width <= 0.0 {
            return;
        }
        self.canvas.set_draw_color(into_color(self.state.stroke));

        let direction = b - a;
        if width <= 1.0 || direction.length() == 0.0 {
            check(self.canvas.draw_line(into_point(a), into_point(b)));
            return;
        }

        let normal = direction.normalized().perpendicular();
        let passes = width.ceil() as i32;
        for i in 0..passes {
            let shift = normal * (i as f32 - (passes - 1) as f32 / 2.0);
            check(
                self.canvas
                    .draw_line(into_point(a + shift), into_point(b + shift)),
            );
        }
    }

    fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        self.canvas.set_draw_color(into_color(color));

        if radius < 1.0 {
            check(self.canvas.fill_rect(Rect::new(
                center.x.round() as i32,
                center.y.round() as i32,
                1,
                1,
            )));
            return;
        }

        let rows = radius.ceil() as i32;
        let spans: Vec<Rect> = (-rows..=rows)
            .filter_map(|dy| {
                let dy = dy as f32;
                let half = (radius * radius - dy * dy).max(0.0).sqrt();
                if half <= 0.0 {
                    return None;
                }
                Some(Rect::new(
                    (center.x - half).round() as i32,
                    (center.y + dy).round() as i32,
                    (half * 2.0).round().max(1.0) as u32,
                    1,
                ))
            })
            .collect();
        check(self.canvas.fill_rects(&spans));
    }

    fn fill_glow(&mut self, center: Vec2<f32>, radius: f32, alpha: f32) {
        let blur = self.state.shadow_blur;
        let rings = blur.ceil() as i32;
        for ring in (1..=rings).rev() {
            let falloff = 1.0 - ring as f32 / (rings + 1) as f32;
            let color = self
                .state
                .shadow_color
                .with_alpha(alpha * SHADOW_STRENGTH * falloff);
            self.fill_disc(center, radius + ring as f32, color);
        }
    }
}

impl<T: RenderTarget> Surface for SdlSurface<T> {
    fn output_size(&self) -> Result<(u32, u32), SurfaceError> {
        self.canvas.output_size().map_err(SurfaceError::Unavailable)
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.state.stroke = color;
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    fn set_shadow(&mut self, blur: f32, color: Rgb) {
        self.state.shadow_blur = blur.max(0.0);
        self.state.shadow_color = color;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let point = self.to_screen(x, y);
        self.path.push(PathElement::MoveTo(point));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let point = self.to_screen(x, y);
        self.path.push(PathElement::LineTo(point));
    }

    // Only full circles are drawn; the angles are accepted for parity with
    // canvas contexts.
    fn arc(&mut self, x: f32, y: f32, radius: f32, _start_angle: f32, _end_angle: f32) {
        let center = self.to_screen(x, y);
        self.path.push(PathElement::Arc { center, radius });
    }

    fn stroke(&mut self) {
        let mut cursor: Option<Vec2<f32>> = None;
        let path = std::mem::replace(&mut self.path, Vec::new());
        for element in &path {
            match *element {
                PathElement::MoveTo(point) => cursor = Some(point),
                PathElement::LineTo(point) => {
                    if let Some(from) = cursor {
                        self.draw_thick_line(from, point);
                    }
                    cursor = Some(point);
                }
                PathElement::Arc { center, .. } => cursor = Some(center),
            }
        }
        self.path = path;
    }

    fn fill(&mut self) {
        let path = std::mem::replace(&mut self.path, Vec::new());
        let fill = self.state.fill;
        for element in &path {
            if let PathElement::Arc { center, radius } = *element {
                if self.state.shadow_blur > 0.0 {
                    self.fill_glow(center, radius, fill.a);
                }
                self.fill_disc(center, radius, fill);
            }
        }
        self.path = path;
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let corner = self.to_screen(x, y);
        self.canvas.set_draw_color(self.background);
        check(self.canvas.fill_rect(Rect::new(
            corner.x.floor() as i32,
            corner.y.floor() as i32,
            width.ceil().max(0.0) as u32,
            height.ceil().max(0.0) as u32,
        )));
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.origin = self.state.origin + Vec2::new(x, y);
    }

    fn reset_transform(&mut self) {
        self.state.origin = Vec2::default();
    }
}

fn check(result: Result<(), String>) {
    if let Err(e) = result.map_err(SurfaceError::Draw) {
        warn!("{}", e);
    }
}

pub fn into_point(vec: Vec2<f32>) -> Point {
    Point::new(vec.x as i32, vec.y as i32)
}

pub fn into_color(color: Rgba) -> Color {
    Color::RGBA(color.r, color.g, color.b, color.alpha_byte())
}
