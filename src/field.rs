use crate::error::SurfaceError;
use crate::frame_loop::FrameLoop;
use crate::math::vec::{ease_toward, same};
use crate::options::FieldOptions;
use crate::star::{FrameContext, Star};
use crate::surface::Surface;
use gamemath::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fraction of the remaining distance the offset covers each frame.
const OFFSET_EASING: f32 = 0.02;

/// Extent of the drawing surface. The origin sits at its center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Viewport {
        let width = width as f32;
        let height = height as f32;
        Viewport {
            width,
            height,
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    /// Depth at which stars are born.
    pub fn far_plane(&self) -> f32 {
        self.width.min(self.height) * 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Owns the stars and renders one frame of the field at a time.
pub struct StarField<S: Surface, R: Rng = StdRng> {
    surface: S,
    rng: R,
    options: FieldOptions,

    viewport: Viewport,
    offset: Vec2<f32>,
    target_offset: Vec2<f32>,

    stars: Vec<Star>,
    frame_loop: FrameLoop,
}

impl<S: Surface> StarField<S, StdRng> {
    pub fn new(surface: S, options: FieldOptions) -> Result<Self, SurfaceError> {
        StarField::with_rng(surface, options, StdRng::from_entropy())
    }
}

impl<S: Surface, R: Rng> StarField<S, R> {
    /// Measures the surface and generates the initial stars. The frame loop
    /// starts stopped.
    pub fn with_rng(surface: S, options: FieldOptions, rng: R) -> Result<Self, SurfaceError> {
        let mut field = StarField {
            surface,
            rng,
            options: options.sanitized(),
            viewport: Viewport::default(),
            offset: Vec2::default(),
            target_offset: Vec2::default(),
            stars: Vec::new(),
            frame_loop: FrameLoop::default(),
        };
        field.reset()?;
        Ok(field)
    }

    pub fn start(&mut self) {
        self.frame_loop.start();
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Renders a frame if the loop is running. Returns whether it did.
    pub fn tick(&mut self) -> bool {
        if self.frame_loop.tick() {
            self.render_frame();
            true
        } else {
            false
        }
    }

    pub fn render_frame(&mut self) {
        if !same(self.offset, self.target_offset) {
            self.offset = ease_toward(self.offset, self.target_offset, OFFSET_EASING);
        }

        let viewport = self.viewport;
        self.surface.clear_rect(
            -viewport.half_width,
            -viewport.half_height,
            viewport.width,
            viewport.height,
        );

        // nothing can be projected onto an empty surface
        if viewport.is_empty() {
            return;
        }

        let offset = self.offset;
        let mut ctx = FrameContext {
            viewport: &self.viewport,
            options: &self.options,
            rng: &mut self.rng,
            surface: &mut self.surface,
        };
        for star in &mut self.stars {
            star.advance(offset, &mut ctx);
        }
    }

    /// Rebuilds every star after re-measuring the surface.
    pub fn reset(&mut self) -> Result<(), SurfaceError> {
        self.stars.clear();

        let (width, height) = self.surface.output_size()?;
        self.viewport = Viewport::new(width, height);
        self.surface.reset_transform();
        self.surface
            .translate(self.viewport.half_width, self.viewport.half_height);

        info!(
            "generating {} stars on a {}x{} surface",
            self.options.num_stars, width, height
        );

        let viewport = self.viewport;
        let options = &self.options;
        let rng = &mut self.rng;
        self.stars = (0..options.num_stars)
            .map(|_| Star::new(&viewport, options, &mut *rng))
            .collect();

        Ok(())
    }

    pub fn set_num_stars(&mut self, val: i64) -> Result<(), SurfaceError> {
        self.options.set_num_stars(val);
        self.reset()
    }

    pub fn set_min_speed(&mut self, val: f32) -> Result<(), SurfaceError> {
        self.options.set_min_speed(val);
        self.reset()
    }

    pub fn set_max_speed(&mut self, val: f32) -> Result<(), SurfaceError> {
        self.options.set_max_speed(val);
        self.reset()
    }

    pub fn set_options(&mut self, options: FieldOptions) -> Result<(), SurfaceError> {
        let follow_mouse = options.follow_mouse;
        self.options = options.sanitized();
        self.set_follow_mouse(follow_mouse);
        self.reset()
    }

    /// Turning following off also recenters the field.
    pub fn set_follow_mouse(&mut self, val: bool) {
        self.options.follow_mouse = val;
        if !val {
            self.target_offset = Vec2::default();
        }
    }

    /// Aims the parallax offset at a pointer position. Ignored unless the
    /// field follows the mouse.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if !self.options.follow_mouse {
            return;
        }
        let origin = self.options.follow_context.origin();
        self.target_offset = Vec2::new(
            x - origin.x - self.viewport.half_width,
            y - origin.y - self.viewport.half_height,
        );
    }

    pub fn set_target_offset(&mut self, target: Vec2<f32>) {
        self.target_offset = target;
    }

    pub fn offset(&self) -> Vec2<f32> {
        self.offset
    }

    pub fn target_offset(&self) -> Vec2<f32> {
        self.target_offset
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
