use crate::color::Rgb;
use crate::field::Viewport;
use crate::math::vec::{clamp01, round_significant};
use crate::options::FieldOptions;
use crate::surface::Surface;
use gamemath::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::PI;

const GLOW_BLUR: f32 = 5.0;

/// Everything a star touches while it advances one frame.
pub struct FrameContext<'a, S: Surface, R: Rng> {
    pub viewport: &'a Viewport,
    pub options: &'a FieldOptions,
    pub rng: &'a mut R,
    pub surface: &'a mut S,
}

/// Where a star was drawn in one frame.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub screen: Vec2<f32>,
    pub radius: f32,
    pub opacity: f32,
    pub respawned: bool,
}

/// A single star. `x` and `y` stay fixed, `z` shrinks toward the viewer.
#[derive(Clone, Debug)]
pub struct Star {
    pub position: Vec3<f32>,
    pub velocity: f32,
    pub radius: f32,

    pub last: Vec2<f32>,
    pub before_last: Vec2<f32>,
}

impl Star {
    /// Creates a star somewhere between the viewer and the far plane.
    pub fn new<R: Rng>(viewport: &Viewport, options: &FieldOptions, rng: &mut R) -> Star {
        let mut star = Star {
            position: Vec3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            velocity: 0.0,
            radius: 0.0,
            last: Vec2::default(),
            before_last: Vec2::default(),
        };
        star.respawn(true, viewport, options, rng);
        star
    }

    pub fn respawn<R: Rng>(
        &mut self,
        is_initial: bool,
        viewport: &Viewport,
        options: &FieldOptions,
        rng: &mut R,
    ) {
        let x = rng.gen::<f32>() * viewport.width - viewport.half_width;
        let y = rng.gen::<f32>() * viewport.height - viewport.half_height;
        self.velocity =
            rng.gen::<f32>() * (options.max_speed - options.min_speed) + options.min_speed;
        self.radius = round_significant(rng.gen::<f32>() * 2.0 + 1.0, 3);

        // no trail from the old location to the new one
        self.last = Vec2::new(x, y);
        self.before_last = Vec2::new(x, y);

        let far_plane = viewport.far_plane();
        let z = if is_initial {
            rng.gen::<f32>() * far_plane
        } else {
            far_plane
        };
        self.position = Vec3 { x, y, z };
    }

    /// Moves the star one step closer and draws it.
    pub fn advance<S: Surface, R: Rng>(
        &mut self,
        offset: Vec2<f32>,
        ctx: &mut FrameContext<S, R>,
    ) -> Projection {
        let viewport = ctx.viewport;
        let options = ctx.options;

        self.position.z -= self.velocity;
        let respawned = self.position.z <= 0.0;
        if respawned {
            self.respawn(false, viewport, options, &mut *ctx.rng);
        }

        let Vec3 { x, y, z } = self.position;
        let screen = Vec2::new(
            viewport.width * (x / z) - offset.x,
            viewport.height * (y / z) - offset.y,
        );

        let depth = clamp01(z / viewport.far_plane());
        let radius = (1.0 - depth) * self.radius;
        let opacity = quantized_opacity(depth);
        let trail_opacity = opacity / 4.0;

        let surface = &mut *ctx.surface;

        // Compares against the depth-space x, so only the first frame after a
        // spawn is skipped.
        if options.trails && self.last.x != x {
            let tail = if options.longer_trails {
                self.before_last
            } else {
                self.last
            };
            surface.set_line_width(radius);
            surface.set_stroke_style(options.trail_color.with_alpha(trail_opacity));
            surface.begin_path();
            surface.move_to(screen.x, screen.y);
            surface.line_to(tail.x, tail.y);
            surface.stroke();
        }

        if options.glow {
            surface.save();
            surface.set_shadow(GLOW_BLUR, Rgb::WHITE);
        }

        let color = options.color.resolve(offset.x, offset.y, z);
        surface.set_fill_style(color.with_alpha(opacity));
        surface.begin_path();
        surface.arc(screen.x, screen.y, radius, 0.0, PI * 2.0);
        surface.fill();

        if options.glow {
            surface.restore();
        }

        self.before_last = self.last;
        self.last = screen;

        Projection {
            screen,
            radius,
            opacity,
            respawned,
        }
    }
}

/// Opacity in tenths: nearer stars are brighter.
pub fn quantized_opacity(depth: f32) -> f32 {
    (10.0 - depth * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::StarColor;
    use crate::surface::{DrawCommand, Recorder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(options: FieldOptions) -> (Viewport, FieldOptions, StdRng, Recorder) {
        (
            Viewport::new(200, 100),
            options,
            StdRng::seed_from_u64(7),
            Recorder::new(200, 100),
        )
    }

    #[test]
    fn initial_respawn_spreads_depth() {
        let (viewport, options, mut rng, _) = setup(FieldOptions::default());
        for _ in 0..500 {
            let star = Star::new(&viewport, &options, &mut rng);
            assert!(star.position.z >= 0.0 && star.position.z < 200.0);
            assert!(star.position.x >= -100.0 && star.position.x < 100.0);
            assert!(star.position.y >= -50.0 && star.position.y < 50.0);
            assert!(star.radius >= 1.0 && star.radius <= 3.0);
            assert!(star.velocity >= 2.0 && star.velocity <= 5.0);
            assert_eq!(round_significant(star.radius, 3), star.radius);
        }
    }

    #[test]
    fn later_respawn_starts_at_far_plane() {
        let (viewport, options, mut rng, _) = setup(FieldOptions::default());
        let mut star = Star::new(&viewport, &options, &mut rng);
        star.last = Vec2::new(500.0, 500.0);
        star.before_last = Vec2::new(600.0, 600.0);
        star.respawn(false, &viewport, &options, &mut rng);

        assert_eq!(star.position.z, 200.0);
        assert_eq!((star.last.x, star.last.y), (star.position.x, star.position.y));
        assert_eq!(
            (star.before_last.x, star.before_last.y),
            (star.position.x, star.position.y)
        );
    }

    #[test]
    fn respawns_before_projecting() {
        let options = FieldOptions {
            min_speed: 10.0,
            max_speed: 10.0,
            ..FieldOptions::default()
        };
        let (viewport, options, mut rng, mut surface) = setup(options);
        let mut star = Star::new(&viewport, &options, &mut rng);
        let frames = (star.position.z / 10.0).ceil() as usize;

        let mut ctx = FrameContext {
            viewport: &viewport,
            options: &options,
            rng: &mut rng,
            surface: &mut surface,
        };
        for frame in 1..=frames.max(1) {
            let projection = star.advance(Vec2::default(), &mut ctx);
            assert!(star.position.z > 0.0);
            if frame == frames.max(1) {
                assert!(projection.respawned);
                assert_eq!(star.position.z, 200.0);
                assert_eq!(projection.radius, 0.0);
                assert_eq!(projection.opacity, 0.0);
            } else {
                assert!(!projection.respawned);
            }
        }
    }

    #[test]
    fn projection_applies_offset() {
        let (viewport, options, mut rng, mut surface) = setup(FieldOptions::default());
        let mut star = Star::new(&viewport, &options, &mut rng);
        star.position = Vec3 {
            x: 10.0,
            y: -5.0,
            z: 52.0,
        };
        star.velocity = 2.0;

        let mut ctx = FrameContext {
            viewport: &viewport,
            options: &options,
            rng: &mut rng,
            surface: &mut surface,
        };
        let projection = star.advance(Vec2::new(3.0, -4.0), &mut ctx);

        assert!((projection.screen.x - (200.0 * 10.0 / 50.0 - 3.0)).abs() < 1e-4);
        assert!((projection.screen.y - (100.0 * -5.0 / 50.0 + 4.0)).abs() < 1e-4);
        assert!((projection.radius - 0.75 * star.radius).abs() < 1e-5);
        assert_eq!(projection.opacity, 0.8);
        assert_eq!((star.last.x, star.last.y), (projection.screen.x, projection.screen.y));
    }

    #[test]
    fn radius_grows_as_star_approaches() {
        let (viewport, options, mut rng, mut surface) = setup(FieldOptions::default());
        let mut star = Star::new(&viewport, &options, &mut rng);
        star.position.z = 200.0;
        star.velocity = 1.0;

        let mut ctx = FrameContext {
            viewport: &viewport,
            options: &options,
            rng: &mut rng,
            surface: &mut surface,
        };
        let mut previous = 0.0;
        for _ in 0..199 {
            let projection = star.advance(Vec2::default(), &mut ctx);
            assert!(projection.radius >= previous);
            previous = projection.radius;
        }
        assert!((previous - star.radius * (1.0 - 1.0 / 200.0)).abs() < 1e-4);
    }

    #[test]
    fn opacity_has_eleven_levels() {
        let levels: Vec<f32> = (0..=10).map(|i| i as f32 / 10.0).collect();
        for i in 0..=2000 {
            let opacity = quantized_opacity(i as f32 / 2000.0);
            assert!(levels.contains(&opacity), "unexpected opacity {}", opacity);
        }
        assert_eq!(quantized_opacity(0.0), 1.0);
        assert_eq!(quantized_opacity(1.0), 0.0);
    }

    #[test]
    fn trail_is_skipped_on_first_frame_after_spawn() {
        let options = FieldOptions {
            trails: true,
            trail_color: Rgb::new(1, 2, 3),
            ..FieldOptions::default()
        };
        let (viewport, options, mut rng, mut surface) = setup(options);
        let mut star = Star::new(&viewport, &options, &mut rng);
        star.position.z = 150.0;
        star.velocity = 1.0;

        let mut ctx = FrameContext {
            viewport: &viewport,
            options: &options,
            rng: &mut rng,
            surface: &mut surface,
        };
        star.advance(Vec2::default(), &mut ctx);
        assert_eq!(ctx.surface.count(|c| *c == DrawCommand::Stroke), 0);

        ctx.surface.take();
        let previous = star.last;
        let projection = star.advance(Vec2::default(), &mut ctx);
        let commands = ctx.surface.take();
        assert_eq!(commands[0], DrawCommand::LineWidth(projection.radius));
        assert_eq!(
            commands[1],
            DrawCommand::StrokeStyle(Rgb::new(1, 2, 3).with_alpha(projection.opacity / 4.0))
        );
        assert!(commands.contains(&DrawCommand::LineTo(previous.x, previous.y)));
        assert!(commands.contains(&DrawCommand::Stroke));
    }

    #[test]
    fn longer_trails_reach_two_frames_back() {
        let options = FieldOptions {
            trails: true,
            longer_trails: true,
            ..FieldOptions::default()
        };
        let (viewport, options, mut rng, mut surface) = setup(options);
        let mut star = Star::new(&viewport, &options, &mut rng);
        star.position.z = 150.0;
        star.velocity = 1.0;

        let mut ctx = FrameContext {
            viewport: &viewport,
            options: &options,
            rng: &mut rng,
            surface: &mut surface,
        };
        star.advance(Vec2::default(), &mut ctx);
        star.advance(Vec2::default(), &mut ctx);
        ctx.surface.take();

        let two_back = star.before_last;
        star.advance(Vec2::default(), &mut ctx);
        assert!(ctx
            .surface
            .commands
            .contains(&DrawCommand::LineTo(two_back.x, two_back.y)));
    }

    #[test]
    fn glow_is_scoped_to_the_disc() {
        let options = FieldOptions {
            glow: true,
            trails: true,
            ..FieldOptions::default()
        };
        let (viewport, options, mut rng, mut surface) = setup(options);
        let mut star = Star::new(&viewport, &options, &mut rng);
        star.position.z = 150.0;
        star.velocity = 1.0;

        let mut ctx = FrameContext {
            viewport: &viewport,
            options: &options,
            rng: &mut rng,
            surface: &mut surface,
        };
        star.advance(Vec2::default(), &mut ctx);
        star.advance(Vec2::default(), &mut ctx);

        let commands = &ctx.surface.commands;
        let stroke = commands.iter().position(|c| *c == DrawCommand::Stroke).unwrap();
        let save = commands.iter().rposition(|c| *c == DrawCommand::Save).unwrap();
        let fill = commands.iter().rposition(|c| *c == DrawCommand::Fill).unwrap();
        let restore = commands.iter().rposition(|c| *c == DrawCommand::Restore).unwrap();
        assert!(stroke < save && save < fill && fill < restore);
        assert_eq!(restore, commands.len() - 1);
        assert_eq!(
            commands[save + 1],
            DrawCommand::Shadow {
                blur: 5.0,
                color: Rgb::WHITE
            }
        );
    }

    #[test]
    fn computed_color_sees_offset_and_depth() {
        let options = FieldOptions {
            color: StarColor::computed(|x, y, z| Rgb::new(x as u8, y as u8, z as u8)),
            ..FieldOptions::default()
        };
        let (viewport, options, mut rng, mut surface) = setup(options);
        let mut star = Star::new(&viewport, &options, &mut rng);
        star.position.z = 100.0;
        star.velocity = 1.0;

        let mut ctx = FrameContext {
            viewport: &viewport,
            options: &options,
            rng: &mut rng,
            surface: &mut surface,
        };
        let projection = star.advance(Vec2::new(7.0, 8.0), &mut ctx);
        assert!(ctx
            .surface
            .commands
            .contains(&DrawCommand::FillStyle(Rgb::new(7, 8, 99).with_alpha(projection.opacity))));
    }
}
