use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use raylib::prelude::*;
use tracing::{error, info, trace};
use tracing_subscriber::EnvFilter;

use tinycaster::core::process_events::process_events;
use tinycaster::framebuffer::Framebuffer;
use tinycaster::game::GameState;
use tinycaster::render::render3d::{FrameReport, Renderer};
use tinycaster::settings::{Cli, Settings};

/// Text drawn over the frame while the camera stands next to a door.
struct PromptOverlay {
    text: &'static str,
    x: i32,
    y: i32,
    font_size: i32,
}

impl PromptOverlay {
    fn new(width: usize, height: usize) -> Self {
        Self {
            text: "F to open",
            x: width as i32 / 2 - 50,
            y: height as i32 / 2 + 20,
            font_size: 20,
        }
    }

    fn draw(&self, d: &mut impl RaylibDraw, report: FrameReport) {
        if report.door_prompt {
            d.draw_text(self.text, self.x, self.y, self.font_size, Color::YELLOW);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run().inspect_err(|e| error!("{e:#}"))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())
        .context("loading settings")?
        .with_cli(&cli);
    settings.validate().context("checking command-line overrides")?;

    let mut game = GameState::from_settings(&settings).context("building the scene")?;
    let mut renderer = Renderer::new(settings.render());
    let mut framebuffer = Framebuffer::new(settings.width, settings.height);

    if let Some(path) = &cli.snapshot {
        renderer.render(&mut framebuffer, &game.scene(Instant::now()));
        framebuffer
            .save_ppm(path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        info!("Wrote snapshot to {}", path.display());
        return Ok(());
    }

    let (mut window, raylib_thread) = raylib::init()
        .size(settings.width as i32, settings.height as i32)
        .title("tinycaster")
        .build();

    let blank = Image::gen_image_color(settings.width as i32, settings.height as i32, Color::BLACK);
    let mut screen = window
        .load_texture_from_image(&raylib_thread, &blank)
        .map_err(|e| anyhow!("creating screen texture: {e:?}"))?;
    let prompt = PromptOverlay::new(settings.width, settings.height);

    let tick = settings.tick();
    let mut last_tick = Instant::now();
    info!("Running at {} ms per tick", settings.tick_ms);

    while !window.window_should_close() {
        let now = Instant::now();
        if now.duration_since(last_tick) < tick {
            thread::sleep(Duration::from_millis(1));
            continue;
        }
        last_tick = now;

        let intents = process_events(&window);
        if intents.quit {
            break;
        }
        game.apply(&intents, now);
        game.tick();

        let report = renderer.render(&mut framebuffer, &game.scene(now));
        framebuffer.upload_to_texture(&mut screen);
        trace!(frame_us = now.elapsed().as_micros() as u64, "frame");

        let fps_now = window.get_fps();
        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&screen, 0, 0, Color::WHITE);
        d.draw_text(&format!("FPS: {fps_now}"), 10, 10, 20, Color::WHITE);
        prompt.draw(&mut d, report);
    }

    info!("Bye, {} monsters left", game.monsters.len());
    Ok(())
}
