use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::render::RenderTarget;
use starfield::sdl::SdlSurface;
use starfield::{Control, FieldOptions, PresetError, ResizeDebounce, StarField};
use std::time::Instant;

fn cli() -> Command {
    Command::new("starfield")
        .about("Parallax star field")
        .arg(
            Arg::new("stars")
                .long("stars")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("min-speed")
                .long("min-speed")
                .value_parser(clap::value_parser!(f32))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("max-speed")
                .long("max-speed")
                .value_parser(clap::value_parser!(f32))
                .allow_negative_numbers(true),
        )
        .arg(Arg::new("glow").long("glow").action(ArgAction::SetTrue))
        .arg(Arg::new("trails").long("trails").action(ArgAction::SetTrue))
        .arg(
            Arg::new("longer-trails")
                .long("longer-trails")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("follow-mouse")
                .long("follow-mouse")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-pause-on-blur")
                .long("no-pause-on-blur")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_parser(clap::value_parser!(u32))
                .default_value("1600"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_parser(clap::value_parser!(u32))
                .default_value("900"),
        )
        .arg(Arg::new("preset").long("preset").help("Load options from a preset file"))
        .arg(
            Arg::new("save-preset")
                .long("save-preset")
                .help("Write the resulting options to a preset file"),
        )
}

fn options_from_args(matches: &ArgMatches) -> Result<FieldOptions, PresetError> {
    let mut options = match matches.get_one::<String>("preset") {
        Some(path) => FieldOptions::load_preset(path)?,
        None => FieldOptions::default(),
    };

    if let Some(stars) = matches.get_one::<i64>("stars") {
        options.set_num_stars(*stars);
    }
    if let Some(speed) = matches.get_one::<f32>("min-speed") {
        options.set_min_speed(*speed);
    }
    if let Some(speed) = matches.get_one::<f32>("max-speed") {
        options.set_max_speed(*speed);
    }
    options.glow |= matches.get_flag("glow");
    options.trails |= matches.get_flag("trails") || matches.get_flag("longer-trails");
    options.longer_trails |= matches.get_flag("longer-trails");
    options.follow_mouse |= matches.get_flag("follow-mouse");
    if matches.get_flag("no-pause-on-blur") {
        options.pause_on_blur = false;
    }

    if let Some(path) = matches.get_one::<String>("save-preset") {
        options.save_preset(path)?;
        info!("saved preset to {}", path);
    }

    Ok(options)
}

fn is_exit_event(event: &Event) -> bool {
    match event {
        Event::Quit { .. }
        | Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => true,
        _ => false,
    }
}

/// Translates an SDL event into a field control, if it maps to one.
fn to_control<T: RenderTarget>(event: &Event, field: &StarField<SdlSurface<T>>) -> Option<Control> {
    let options = field.options();
    match *event {
        Event::MouseMotion { x, y, .. } => Some(Control::PointerMoved {
            x: x as f32,
            y: y as f32,
        }),
        Event::Window {
            win_event: WindowEvent::FocusLost,
            ..
        } => Some(Control::Blur),
        Event::Window {
            win_event: WindowEvent::FocusGained,
            ..
        } => Some(Control::Focus),
        Event::KeyDown {
            keycode: Some(keycode),
            ..
        } => match keycode {
            Keycode::Space if field.is_running() => Some(Control::Stop),
            Keycode::Space => Some(Control::Start),
            Keycode::R => Some(Control::Reset),
            Keycode::M => Some(Control::SetFollowMouse(!options.follow_mouse)),
            Keycode::Up => Some(Control::SetNumStars(options.num_stars as i64 + 50)),
            Keycode::Down => Some(Control::SetNumStars(
                (options.num_stars as i64 - 50).max(0),
            )),
            Keycode::Right => Some(Control::SetMaxSpeed(options.max_speed + 1.0)),
            Keycode::Left => Some(Control::SetMaxSpeed(
                (options.max_speed - 1.0).max(options.min_speed),
            )),
            Keycode::T => Some(Control::SetOptions(FieldOptions {
                trails: !options.trails,
                ..options.clone()
            })),
            Keycode::L => Some(Control::SetOptions(FieldOptions {
                longer_trails: !options.longer_trails,
                ..options.clone()
            })),
            Keycode::G => Some(Control::SetOptions(FieldOptions {
                glow: !options.glow,
                ..options.clone()
            })),
            _ => None,
        },
        _ => None,
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();
    let options = options_from_args(&matches)?;
    let width = *matches.get_one::<u32>("width").unwrap_or(&1600);
    let height = *matches.get_one::<u32>("height").unwrap_or(&900);

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let window = video_subsystem
        .window("Star field", width, height)
        .resizable()
        .build()?;

    let surface = SdlSurface::from_window(window)?;
    let mut field = StarField::new(surface, options)?;
    let mut resize = ResizeDebounce::default();
    let mut event_pump = sdl_context.event_pump()?;

    field.start();

    'running: loop {
        for event in event_pump.poll_iter() {
            if is_exit_event(&event) {
                break 'running;
            }
            if let Event::Window {
                win_event: WindowEvent::SizeChanged(..),
                ..
            } = event
            {
                resize.resized(Instant::now(), &mut field);
                continue;
            }
            if let Some(control) = to_control(&event, &field) {
                field.apply(control)?;
            }
        }

        resize.poll(Instant::now(), &mut field)?;

        if field.tick() {
            field.surface_mut().present();
            ::std::thread::sleep(field.frame_loop().remaining(Instant::now()));
        } else {
            ::std::thread::sleep(field.frame_loop().frame_interval());
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
