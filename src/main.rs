use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::clock::{Clock, SimClock, WallClock};
use engine::game_loop::GameLoop;
use engine::input::{InputManager, Key};
use engine::renderer::{Renderer, CANVAS_HEIGHT, CANVAS_WIDTH};
use game::boy::{Boy, BoyTuning};

/// A little boy who runs, idles, sleeps and auto-runs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Asset root directory
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Sprite sheet file name inside <assets>/textures
    #[arg(long, default_value = "animation_sheet.png")]
    sheet: String,

    /// Drive gameplay timers from the wall clock instead of the fixed-step clock
    #[arg(long)]
    wall_clock: bool,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    info!("Starting Boy Runner...");

    let loader = AssetLoader::new(&args.assets);
    let sheet = loader.load_image(&args.sheet)?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Boy Runner")
            .with_inner_size(winit::dpi::LogicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone(), &sheet))?;

    let sim_clock = SimClock::new();
    let mut game_loop = GameLoop::new(sim_clock.clone());
    let clock: Box<dyn Clock> = if args.wall_clock {
        info!("Using wall clock for gameplay timers");
        Box::new(WallClock::new())
    } else {
        Box::new(sim_clock)
    };
    let mut boy = Boy::new(clock, BoyTuning::default())?;

    let input = InputManager::default();
    info!(
        "Auto-run bound to {:?}, wake bound to {:?}",
        input.config().get_codes(Key::Trigger),
        input.config().get_codes(Key::Space)
    );

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                renderer.resize(physical_size);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => match (event.physical_key, event.state) {
                (PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed) => {
                    info!("Escape pressed, shutting down...");
                    elwt.exit();
                }
                (PhysicalKey::Code(KeyCode::KeyP), ElementState::Pressed) if !event.repeat => {
                    game_loop.toggle_pause();
                }
                _ => {
                    if let Some(key_input) = input.process_keyboard_event(&event) {
                        boy.handle_input(key_input);
                    }
                }
            },
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                for _ in 0..game_loop.begin_frame() {
                    game_loop.tick();
                    boy.update();
                }

                if game_loop.frame_count() % 600 == 0 {
                    info!(
                        "{:.1} fps, {} updates, boy {:?} at x={:.0}",
                        game_loop.fps(),
                        game_loop.update_count(),
                        boy.state(),
                        boy.position().x
                    );
                }

                boy.draw(renderer.surface());
                if let Err(e) = renderer.render() {
                    warn!("Render error: {}", e);
                }

                window.request_redraw();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

