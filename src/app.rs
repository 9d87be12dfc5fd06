use std::time::Instant;

use ggez::{
    conf::FullscreenType,
    event::EventHandler,
    input::keyboard::KeyInput,
    Context, GameResult,
};

use crate::audio::{Audio, AudioEvent, AudioQueue};
use crate::config::AppConfig;
use crate::geometry::Bounds;
use crate::input::{self, Outcome};
use crate::render::Renderer;
use crate::session::GameSession;

pub const WINDOW_TITLE: &str = "Lite Cycles - Press F for Fullscreen";
const FULLSCREEN_TITLE: &str = "Lite Cycles - Press F to Exit Fullscreen";

/// Event loop glue: runs the session at a fixed tick rate and forwards keys.
pub struct App {
    session: GameSession,
    renderer: Renderer,
    audio: Audio,
    sounds: AudioQueue,
    target_fps: u32,
    fullscreen: bool,
}

impl App {
    /// Loads sound clips and starts the background hum when sound is enabled.
    pub fn new(ctx: &mut Context, config: &AppConfig) -> Self {
        let mut audio = if config.sound_enabled {
            Audio::new(ctx)
        } else {
            Audio::silent()
        };
        audio.start_hum(ctx);
        App {
            session: GameSession::new().with_ai_decision_interval(config.ai_decision_interval_ticks),
            renderer: Renderer::new(),
            audio,
            sounds: AudioQueue::default(),
            target_fps: config.target_fps,
            fullscreen: config.start_fullscreen,
        }
    }

    fn bounds(ctx: &Context) -> Bounds {
        let (width, height) = ctx.gfx.drawable_size();
        Bounds::new(width, height)
    }

    fn toggle_display(&mut self, ctx: &mut Context) -> GameResult {
        self.fullscreen = !self.fullscreen;
        let (mode, title) = if self.fullscreen {
            (FullscreenType::Desktop, FULLSCREEN_TITLE)
        } else {
            (FullscreenType::Windowed, WINDOW_TITLE)
        };
        ctx.gfx.set_fullscreen(mode)?;
        ctx.gfx.set_window_title(title);
        tracing::info!(fullscreen = self.fullscreen, "display mode toggled");
        Ok(())
    }

    fn alive_flags(&self) -> [bool; 2] {
        self.session
            .players()
            .map_or([false; 2], |[one, two]| [one.is_alive(), two.is_alive()])
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let dt = 1.0 / self.target_fps as f32;
        while ctx.time.check_update_time(self.target_fps) {
            let before = self.alive_flags();
            self.session.tick(Self::bounds(ctx), Instant::now());

            if let Some(players) = self.session.players() {
                for (was_alive, player) in before.into_iter().zip(players) {
                    if was_alive && !player.is_alive() {
                        self.renderer.burst(player);
                        self.sounds.push(AudioEvent::Crash);
                    }
                }
            }
            self.renderer.update(dt);
        }
        self.audio.play(ctx, &mut self.sounds);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        self.renderer.draw(ctx, &self.session)
    }

    fn key_down_event(&mut self, ctx: &mut Context, key: KeyInput, repeat: bool) -> GameResult {
        if repeat {
            return Ok(());
        }
        let Some(command) = key.keycode.and_then(input::command_for_key) else {
            return Ok(());
        };

        match input::route(&mut self.session, command, Self::bounds(ctx)) {
            Outcome::Reset | Outcome::ToMenu => self.renderer.clear(),
            Outcome::ToggleDisplay => self.toggle_display(ctx)?,
            Outcome::Quit => {
                tracing::info!("quit requested");
                ctx.request_quit();
            },
            Outcome::Queued | Outcome::Ignored => {},
        }
        Ok(())
    }
}
