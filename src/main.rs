use anyhow::Context as _;
use clap::Parser;

use hidline::colors;
use hidline::prelude::*;

const TITLE: &str = "hidline";

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LayoutArg {
    /// Every new object replaces the previous one.
    Single,
    /// Objects accumulate on a ring around the Z axis.
    Ring,
}

/// Interactive hidden-line viewer for boxes and rows of boxes.
#[derive(Debug, Parser)]
#[command(name = TITLE, version, about)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Distance from the observer to the screen plane.
    #[arg(long, default_value_t = 450.0)]
    distance: f64,

    /// Edge length of the generated boxes.
    #[arg(long, default_value_t = 200.0)]
    size: f64,

    /// Cut a square hole through every box.
    #[arg(long)]
    hole: bool,

    /// Number of boxes placed side by side in each object.
    #[arg(long, default_value_t = 1)]
    repeat: usize,

    #[arg(long, value_enum, default_value = "single")]
    layout: LayoutArg,

    /// Rotate a step about this axis (x, y or z) every frame.
    #[arg(long, value_name = "axis")]
    auto_rotate: Option<Axis>,

    /// Do not draw occluded lines.
    #[arg(long)]
    hide_occluded: bool,

    /// Increase log verbosity; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> Config {
        let layout = match self.layout {
            LayoutArg::Single => Layout::Single,
            LayoutArg::Ring => Layout::ring(),
        };
        Config {
            width: self.width,
            height: self.height,
            display_distance: self.distance,
            box_size: self.size,
            hole: self.hole,
            repeat: self.repeat,
            layout,
            auto_rotate: self.auto_rotate,
            show_occluded: !self.hide_occluded,
            ..Config::default()
        }
    }
}

fn init_logging(verbose: u8) -> Result<(), anyhow::Error> {
    use simplelog::LevelFilter::{Debug, Info, Off, Trace};
    let level = match verbose {
        0 => Info,
        1 => Debug,
        _ => Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

/// What a key press asks the shell to do.
enum Action {
    Scene(Command),
    AddObject,
    ToggleOccluded,
    Screenshot,
    Quit,
}

fn action_for(key: Keycode, config: &Config) -> Option<Action> {
    let angle = config.rotation_step;
    let step = config.observer_step;
    let command = match key {
        Keycode::W => Command::Rotate(Axis::X, angle),
        Keycode::S => Command::Rotate(Axis::X, -angle),
        Keycode::A => Command::Rotate(Axis::Y, angle),
        Keycode::D => Command::Rotate(Axis::Y, -angle),
        Keycode::Q => Command::Rotate(Axis::Z, angle),
        Keycode::E => Command::Rotate(Axis::Z, -angle),
        Keycode::Z => Command::RotateAroundVector(angle),
        Keycode::X => Command::RotateAroundVector(-angle),
        Keycode::R => Command::MoveObserver(Vec3::new(0.0, 0.0, step)),
        Keycode::F => Command::MoveObserver(Vec3::new(0.0, 0.0, -step)),
        Keycode::Kp8 => Command::MoveObserver(Vec3::new(0.0, -step, 0.0)),
        Keycode::Kp2 => Command::MoveObserver(Vec3::new(0.0, step, 0.0)),
        Keycode::Kp6 => Command::MoveObserver(Vec3::new(step, 0.0, 0.0)),
        Keycode::Kp4 => Command::MoveObserver(Vec3::new(-step, 0.0, 0.0)),
        Keycode::T => Command::MoveDisplay(config.display_step),
        Keycode::G => Command::MoveDisplay(-config.display_step),
        Keycode::N => return Some(Action::AddObject),
        Keycode::H => return Some(Action::ToggleOccluded),
        Keycode::P => return Some(Action::Screenshot),
        Keycode::Escape => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Scene(command))
}

fn build_object(config: &Config) -> Result<Polyhedron, GeometryError> {
    BoxBuilder::cube(config.box_size)
        .with_hole(config.hole)
        .repeat(config.repeat)
        .build()
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    let config = args.into_config();
    log::debug!("starting with {config:?}");

    let mut window = Window::new(TITLE, config.width, config.height).map_err(anyhow::Error::msg)?;
    let mut renderer = Renderer::new(config.width, config.height);
    let mut drawer = WireframeDrawer {
        dash_count: config.dash_count,
        show_occluded: config.show_occluded,
        ..WireframeDrawer::default()
    };
    let mut scene = Scene::new(&config);
    scene.add_object(build_object(&config).context("building the initial object")?);

    let mut frame_limiter = FrameLimiter::new(&window, config.frame_time_ms());
    let mut screenshots = 0u32;

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h).map_err(anyhow::Error::msg)?;
                    renderer.resize(w, h);
                    scene.set_viewport(w, h);
                }
                WindowEvent::Key(key) => match action_for(key, &config) {
                    Some(Action::Scene(command)) => scene.apply(command),
                    Some(Action::AddObject) => scene.add_object(build_object(&config)?),
                    Some(Action::ToggleOccluded) => {
                        drawer.show_occluded = !drawer.show_occluded;
                        let state = if drawer.show_occluded { "shown" } else { "hidden" };
                        log::info!("occluded lines {state}");
                        window
                            .set_title(&format!("{TITLE} (occluded lines {state})"))
                            .map_err(anyhow::Error::msg)?;
                    }
                    Some(Action::Screenshot) => {
                        screenshots += 1;
                        let path = format!("{TITLE}-{screenshots:03}.png");
                        match renderer.save_png(&path) {
                            Ok(()) => log::info!("saved {path}"),
                            Err(e) => log::error!("failed to save {path}: {e}"),
                        }
                    }
                    Some(Action::Quit) => break 'running,
                    None => {}
                },
            }
        }

        if let Some(axis) = config.auto_rotate {
            scene.rotate_around_axis(axis, config.rotation_step);
        }

        renderer.clear(colors::BACKGROUND);
        scene.render(&mut renderer, &mut drawer);
        window.present(renderer.as_bytes()).map_err(anyhow::Error::msg)?;

        frame_limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
