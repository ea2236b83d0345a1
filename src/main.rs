//! Aberred controls demo entry point.
//!
//! Spawns the wizard sprite with movement controls and drives it either from
//! a scripted input file (headless, the default) or from the keyboard in a
//! Raylib window (feature `raylib`, `--window`).
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing)
//! 2. Build the ECS world, register observers, spawn the wizard
//! 3. Each frame: advance time, run the schedule (attach, movement), feed input
//!
//! # Running
//!
//! ```sh
//! cargo run -- --script demos/walk.json
//! cargo run --features raylib -- --window
//! ```

use std::path::PathBuf;

use aberredcontrols::components::mapposition::MapPosition;
use aberredcontrols::components::rigidbody::RigidBody;
use aberredcontrols::game;
use aberredcontrols::resources::gameconfig::GameConfig;
use aberredcontrols::resources::inputscript::InputScript;
use aberredcontrols::systems::input::replay_input;
use aberredcontrols::systems::time::update_world_time;
use clap::Parser;

const DEFAULT_FRAMES: u32 = 60;

/// Aberred controls demo
#[derive(Parser)]
#[command(version, about = "Drive a sprite with input-bound movement controls.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Input script (JSON) to replay headless.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Number of frames to simulate headless (default: script length or 60).
    #[arg(long)]
    frames: Option<u32>,

    /// Fixed frame delta in seconds for headless runs.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    save_config: bool,

    /// Open a window and read the keyboard instead of a script.
    #[cfg(feature = "raylib")]
    #[arg(long)]
    window: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default config: {}", e);
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", cli.config.display());
        return;
    }

    #[cfg(feature = "raylib")]
    {
        if cli.window {
            run_window(&config);
            return;
        }
    }

    let script = match &cli.script {
        Some(path) => match InputScript::load(path) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => InputScript::default(),
    };
    let frames = cli
        .frames
        .unwrap_or_else(|| script.last_frame().map_or(DEFAULT_FRAMES, |f| f + 1));

    run_headless(&config, &script, frames, cli.dt);
}

fn run_headless(config: &GameConfig, script: &InputScript, frames: u32, dt: f32) {
    let mut world = game::setup_world(config);
    let wizard = match game::spawn_wizard(&mut world, &config.controls) {
        Ok(entity) => entity,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut update = game::update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    for frame in 0..frames {
        update_world_time(&mut world, dt);
        update.run(&mut world);
        replay_input(&mut world, script, frame);
        world.clear_trackers();
    }

    let pos = world.get::<MapPosition>(wizard).map(|p| p.pos);
    let vel = world.get::<RigidBody>(wizard).map(|rb| rb.velocity);
    log::info!("Simulated {} frames", frames);
    println!("wizard position: {:?} velocity: {:?}", pos, vel);
}

#[cfg(feature = "raylib")]
fn run_window(config: &GameConfig) {
    use aberredcontrols::components::sprite::Sprite;
    use aberredcontrols::systems::input::poll_keyboard;
    use raylib::prelude::*;

    let (rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Aberred Controls")
        .build();

    let mut world = game::setup_world(config);
    world.insert_non_send_resource(rl);
    if let Err(e) = game::spawn_wizard(&mut world, &config.controls) {
        log::error!("Cannot spawn wizard: {}", e);
        return;
    }
    world
        .non_send_resource_mut::<raylib::RaylibHandle>()
        .set_target_fps(config.target_fps);

    let mut update = game::update_schedule();
    update.add_systems(poll_keyboard);
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // World units to pixels
    const SCALE: f32 = 8.0;

    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers();

        let sprites: Vec<(Vector2, f32, f32, bool)> = world
            .query::<(&MapPosition, &Sprite)>()
            .iter(&world)
            .map(|(p, s)| {
                (
                    Vector2::new(p.pos.x, p.pos.y),
                    s.width,
                    s.height,
                    s.flip_h,
                )
            })
            .collect();

        let mut rl = world.non_send_resource_mut::<raylib::RaylibHandle>();
        let (cx, cy) = (
            rl.get_screen_width() as f32 * 0.5,
            rl.get_screen_height() as f32 * 0.5,
        );
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        for (pos, w, h, flip) in sprites {
            // y grows upward in the world, downward on screen
            let x = cx + (pos.x - w * 0.5) * SCALE;
            let y = cy - (pos.y + h * 0.5) * SCALE;
            let color = if flip { Color::ORANGE } else { Color::SKYBLUE };
            d.draw_rectangle(x as i32, y as i32, (w * SCALE) as i32, (h * SCALE) as i32, color);
        }
        d.draw_text("arrows: move", 10, 10, 20, Color::RAYWHITE);
    }
}
