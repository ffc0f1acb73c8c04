use anyhow::{Context, Result};
use log::{debug, info, warn};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::GameConfig;
use engine::assets::AssetManager;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::{DrawList, Rasterizer};
use game::characters::{PLAYER1_VARIANT, PLAYER2_VARIANT};
use game::{draw_scene, MatchController, Playfield, SceneAssets};

const SCREENSHOT_PATH: &str = "screenshot.png";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Duel...");

    let config = GameConfig::from_env().context("Invalid configuration")?;

    // Every sprite must decode before the first frame
    let mut assets = AssetManager::new(&config.asset_dir);
    let scene_assets = SceneAssets::load(&mut assets, [&PLAYER1_VARIANT, &PLAYER2_VARIANT])
        .with_context(|| format!("Failed to load assets from {}", config.asset_dir.display()))?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Duel")
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window_width,
            config.window_height,
        ))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let size = window.inner_size();
    let mut controller =
        MatchController::new(Playfield::new(size.width as f32, size.height as f32));
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut draw_list = DrawList::new();

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
                info!("Window resized to {:?}", physical_size);
                controller.set_playfield(Playfield::new(
                    physical_size.width as f32,
                    physical_size.height as f32,
                ));
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
                if is_screenshot_key(&event) {
                    // Paint the last recorded frame on the CPU
                    let size = window.inner_size();
                    let image =
                        Rasterizer::new(&assets).render(&draw_list, size.width, size.height);
                    match image.save(SCREENSHOT_PATH) {
                        Ok(()) => info!("Saved screenshot to {}", SCREENSHOT_PATH),
                        Err(e) => warn!("Failed to save screenshot: {}", e),
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Key releases while unfocused never arrive
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let tick = game_loop.begin_frame();
                controller.advance_clock(tick.elapsed);

                for _ in 0..tick.updates {
                    controller.update(&input.frame_input());
                    // Edge-triggered keys are consumed by the first update
                    input.end_frame();
                }

                // The recorded frame is presented through `Rasterizer` on F12
                draw_list.clear();
                draw_scene(&controller, &scene_assets, &mut draw_list);

                if game_loop.frame_count() % 300 == 0 {
                    debug!(
                        "{:.1} fps, {} draw commands",
                        game_loop.fps(),
                        draw_list.len()
                    );
                }
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

fn is_screenshot_key(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && !event.repeat
        && event.physical_key == PhysicalKey::Code(KeyCode::F12)
}
