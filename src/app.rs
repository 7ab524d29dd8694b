use crate::error::AppError;
use crate::io::cli::Cli;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::passes::{post_process_to_buffer, render_frame};
use crate::pipeline::renderer::Renderer;
use crate::scene::desk::build_scene;
use crate::scene::state::SceneState;
use crate::scene::texture::TextureBank;
use crate::ui::input::InputController;
use log::{debug, info};
use minifb::{Window, WindowOptions};
use std::path::Path;
use std::time::Instant;

pub const WINDOW_TITLE: &str = "Desk Scene";
pub const INITIAL_WIDTH: usize = 800;
pub const INITIAL_HEIGHT: usize = 600;

/// Runs the application in GUI mode with real-time rendering and interactivity.
pub fn run_gui(cli: &Cli) -> Result<(), AppError> {
    let textures = TextureBank::load(&cli.textures)?;
    let mesh = build_scene();
    let mut state = SceneState::default();

    info!(
        "Starting GUI mode ({}x{})...",
        INITIAL_WIDTH, INITIAL_HEIGHT
    );
    info!(
        "Controls: WASD=Move, Q/E=Up/Down, Mouse=Look, Scroll=Zoom, 1-4=Wrap mode, [/]=UV scale, L/K=Orbit on/off"
    );

    let mut window = Window::new(
        WINDOW_TITLE,
        INITIAL_WIDTH,
        INITIAL_HEIGHT,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    let mut renderer = Renderer::new(INITIAL_WIDTH, INITIAL_HEIGHT, cli.samples.into());
    let mut input = InputController::new();
    let mut buffer = vec![0u32; INITIAL_WIDTH * INITIAL_HEIGHT];

    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();
    let mut last_frame_time = Instant::now();

    while window.is_open() && !InputController::quit_requested(&window) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // --- Viewport ---
        let (width, height) = window.get_size();
        if renderer.resize(width.max(1), height.max(1)) {
            buffer.resize(renderer.width() * renderer.height(), 0);
            debug!("Viewport resized to {}x{}", renderer.width(), renderer.height());
        }

        // --- Input ---
        for command in input.poll(&window, &state) {
            state.apply(command, dt);
        }
        state.advance(dt);

        // --- Render ---
        render_frame(&state, &mesh, &textures, &mut renderer);

        // --- Display ---
        post_process_to_buffer(&renderer.framebuffer, &mut buffer);
        window.update_with_buffer(&buffer, renderer.width(), renderer.height())?;

        window.set_title(&format!(
            "{} - {:.1} FPS - FOV: {:.1}",
            WINDOW_TITLE,
            1.0 / dt.max(f32::EPSILON),
            state.camera.zoom
        ));

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            info!(
                "Average FPS: {:.1}",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32()
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }

    info!("Window closed.");
    Ok(())
}

/// Renders the startup view once and writes it to `output`.
pub fn run_headless(cli: &Cli, output: &Path) -> Result<(), AppError> {
    info!("Starting headless mode...");
    let textures = TextureBank::load(&cli.textures)?;
    let mesh = build_scene();
    let state = SceneState::default();
    let start_time = Instant::now();

    let mut renderer = Renderer::new(INITIAL_WIDTH, INITIAL_HEIGHT, cli.samples.into());
    render_frame(&state, &mesh, &textures, &mut renderer);
    info!("Render completed in {:.2?}", start_time.elapsed());

    info!("Saving output to {:?}...", output);
    let mut buffer = vec![0u32; INITIAL_WIDTH * INITIAL_HEIGHT];
    post_process_to_buffer(&renderer.framebuffer, &mut buffer);
    save_buffer_to_image(&buffer, INITIAL_WIDTH, INITIAL_HEIGHT, output)?;
    info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_texture_directory_fails_before_rendering() {
        let cli = Cli::parse_from([
            "desk-scene",
            "--textures",
            "/nonexistent/desk-scene/textures",
        ]);
        let out = std::env::temp_dir().join("desk-scene-never-written.png");
        let err = run_headless(&cli, &out).unwrap_err();
        match err {
            AppError::Texture { path, .. } => assert!(path.ends_with("mouse.jpg")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out.exists());
    }
}
