use ggez::{
    graphics::{self, Canvas, Color, DrawMode, DrawParam, MeshBuilder, Rect, Text, TextLayout},
    Context, GameResult,
};
use rand::Rng;

use crate::geometry::{Cell, GRID_SIZE};
use crate::player::{Player, PlayerSlot};
use crate::session::{GameSession, Mode, Phase, Winner};

const NEON_BLUE: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};
const NEON_ORANGE: Color = Color {
    r: 1.0,
    g: 128.0 / 255.0,
    b: 0.0,
    a: 1.0,
};
const DARK_GRAY: Color = Color {
    r: 20.0 / 255.0,
    g: 20.0 / 255.0,
    b: 20.0 / 255.0,
    a: 1.0,
};
const HINT_GRAY: Color = Color {
    r: 0.6,
    g: 0.6,
    b: 0.6,
    a: 1.0,
};

const TITLE_SCALE: f32 = 96.0;
const HEADING_SCALE: f32 = 48.0;
const BODY_SCALE: f32 = 30.0;

pub fn player_color(slot: PlayerSlot) -> Color {
    match slot {
        PlayerSlot::One => NEON_BLUE,
        PlayerSlot::Two => NEON_ORANGE,
    }
}

fn brighten(color: Color, amount: f32) -> Color {
    Color::new(
        (color.r + amount).min(1.0),
        (color.g + amount).min(1.0),
        (color.b + amount).min(1.0),
        color.a,
    )
}

fn with_alpha(color: Color, a: f32) -> Color {
    Color::new(color.r, color.g, color.b, a)
}

const BURST_PARTICLES: usize = 50;
const BURST_SPEED: std::ops::Range<f32> = 50.0..200.0;
const BURST_LIFETIME: std::ops::Range<f32> = 0.5..1.5;
const BURST_OPACITY: std::ops::Range<f32> = 0.5..1.0;
/// Velocity kept per frame.
const BURST_DRAG: f32 = 0.98;

/// A spark thrown out of a crashed cycle. Fades as `ttl` runs out.
struct Spark {
    at: Cell,
    velocity: (f32, f32),
    ttl: f32,
    color: Color,
}

impl Spark {
    fn step(&mut self, dt: f32) {
        self.at.x += self.velocity.0 * dt;
        self.at.y += self.velocity.1 * dt;
        self.velocity.0 *= BURST_DRAG;
        self.velocity.1 *= BURST_DRAG;
        self.ttl -= dt;
    }

    fn current_color(&self) -> Color {
        let fade = (self.ttl / BURST_LIFETIME.end).min(1.0);
        with_alpha(self.color, self.color.a * fade)
    }
}

/// Draws a session snapshot once per frame. Only its own cosmetic effects
/// change here; the session is read-only.
#[derive(Default)]
pub struct Renderer {
    sparks: Vec<Spark>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }

    /// Throws sparks in every direction from the centre of a crashed head.
    pub fn burst(&mut self, player: &Player) {
        let head = player.position();
        let centre = Cell::new(head.x + GRID_SIZE / 2.0, head.y + GRID_SIZE / 2.0);
        let color = player_color(player.slot());
        let mut rng = rand::thread_rng();
        self.sparks.extend((0..BURST_PARTICLES).map(|_| {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(BURST_SPEED);
            Spark {
                at: centre,
                velocity: (angle.cos() * speed, angle.sin() * speed),
                ttl: rng.gen_range(BURST_LIFETIME),
                color: with_alpha(color, rng.gen_range(BURST_OPACITY)),
            }
        }));
    }

    pub fn update(&mut self, dt: f32) {
        for spark in &mut self.sparks {
            spark.step(dt);
        }
        self.sparks.retain(|spark| spark.ttl > 0.0);
    }

    pub fn draw(&self, ctx: &mut Context, session: &GameSession) -> GameResult {
        let mut canvas = Canvas::from_frame(ctx, Color::BLACK);
        let (width, height) = ctx.gfx.drawable_size();

        match session.phase() {
            Phase::Menu => self.draw_menu(&mut canvas, width, height),
            Phase::Playing => {
                self.draw_board(ctx, &mut canvas, session, width, height, 1.0)?;
                self.draw_hud(&mut canvas, session);
            },
            Phase::GameOver => {
                self.draw_board(ctx, &mut canvas, session, width, height, 0.35)?;
                self.draw_game_over(&mut canvas, session, width, height);
            },
        }

        canvas.finish(ctx)
    }

    fn draw_menu(&self, canvas: &mut Canvas, width: f32, height: f32) {
        centered(canvas, "LITE CYCLES", TITLE_SCALE, NEON_BLUE, width / 2.0, height / 4.0);

        let lines: [(&str, f32, Color); 12] = [
            ("Choose Game Mode:", HEADING_SCALE, NEON_BLUE),
            ("", BODY_SCALE, Color::WHITE),
            ("1 - Two Player Mode", HEADING_SCALE, NEON_ORANGE),
            ("Player 1: Arrow Keys", BODY_SCALE, Color::WHITE),
            ("Player 2: WASD", BODY_SCALE, Color::WHITE),
            ("", BODY_SCALE, Color::WHITE),
            ("2 - AI Opponent Mode", HEADING_SCALE, NEON_ORANGE),
            ("Player 1: Arrow Keys", BODY_SCALE, Color::WHITE),
            ("AI: Automatic", BODY_SCALE, Color::WHITE),
            ("", BODY_SCALE, Color::WHITE),
            ("F - Toggle Fullscreen", BODY_SCALE, HINT_GRAY),
            ("ESC - Exit Game", BODY_SCALE, HINT_GRAY),
        ];
        let mut y = height / 3.0;
        for (line, scale, color) in lines {
            if !line.is_empty() {
                centered(canvas, line, scale, color, width / 2.0, y);
            }
            y += 40.0;
        }
    }

    /// Grid, trails, heads and crash sparks. `dim` scales trail brightness.
    fn draw_board(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        session: &GameSession,
        width: f32,
        height: f32,
        dim: f32,
    ) -> GameResult {
        let mut builder = MeshBuilder::new();

        let spacing = GRID_SIZE * 5.0;
        let mut x = 0.0;
        while x < width {
            builder.line(&[[x, 0.0], [x, height]], 1.0, DARK_GRAY)?;
            x += spacing;
        }
        let mut y = 0.0;
        while y < height {
            builder.line(&[[0.0, y], [width, y]], 1.0, DARK_GRAY)?;
            y += spacing;
        }

        if let Some(players) = session.players() {
            for player in players {
                trail_cells(&mut builder, player, dim)?;
            }
            for player in players.iter().filter(|p| p.is_alive()) {
                head(&mut builder, player)?;
            }
        }

        for spark in &self.sparks {
            builder.rectangle(
                DrawMode::fill(),
                Rect::new(spark.at.x - 2.0, spark.at.y - 2.0, 4.0, 4.0),
                spark.current_color(),
            )?;
        }

        let mesh = graphics::Mesh::from_data(ctx, builder.build());
        canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }

    fn draw_hud(&self, canvas: &mut Canvas, session: &GameSession) {
        let Some(players) = session.players() else {
            return;
        };
        for (row, player) in players.iter().enumerate() {
            let label = match (player.slot(), session.mode()) {
                (PlayerSlot::One, _) => format!("{}: Arrow Keys", player.name()),
                (PlayerSlot::Two, Mode::TwoPlayer) => format!("{}: WASD", player.name()),
                (PlayerSlot::Two, Mode::VersusComputer) => player.name().to_string(),
            };
            let mut text = Text::new(label);
            text.set_scale(BODY_SCALE);
            canvas.draw(
                &text,
                DrawParam::default()
                    .dest([10.0, 10.0 + row as f32 * 30.0])
                    .color(player_color(player.slot())),
            );
        }
    }

    fn draw_game_over(&self, canvas: &mut Canvas, session: &GameSession, width: f32, height: f32) {
        let (banner, color) = match session.winner() {
            Some(Winner::Player(slot)) => (
                format!("{} WINS!", session.winner_name().unwrap_or_default()),
                player_color(slot),
            ),
            Some(Winner::Tie) | None => ("TIE GAME!".to_string(), Color::WHITE),
        };
        centered(canvas, &banner, TITLE_SCALE, color, width / 2.0, height / 2.0 - 100.0);

        let hints = ["R - Play Again", "M - Main Menu", "F - Toggle Fullscreen", "ESC - Exit Game"];
        let mut y = height / 2.0 + 50.0;
        for hint in hints {
            centered(canvas, hint, HEADING_SCALE, Color::WHITE, width / 2.0, y);
            y += 50.0;
        }
    }
}

fn centered(canvas: &mut Canvas, line: &str, scale: f32, color: Color, x: f32, y: f32) {
    let mut text = Text::new(line);
    text.set_scale(scale).set_layout(TextLayout::center());
    canvas.draw(&text, DrawParam::default().dest([x, y]).color(color));
}

/// Trail squares fade in from the oldest cell, each with a brighter core.
fn trail_cells(builder: &mut MeshBuilder, player: &Player, dim: f32) -> GameResult {
    let color = player_color(player.slot());
    let core = brighten(color, 50.0 / 255.0);
    let len = player.trail().len() as f32;
    for (i, cell) in player.trail().iter().enumerate() {
        let fade = i as f32 / len;
        builder.rectangle(
            DrawMode::fill(),
            Rect::new(cell.x, cell.y, GRID_SIZE, GRID_SIZE),
            with_alpha(color, fade * dim),
        )?;
        builder.rectangle(
            DrawMode::fill(),
            Rect::new(
                cell.x + GRID_SIZE / 4.0,
                cell.y + GRID_SIZE / 4.0,
                GRID_SIZE / 2.0,
                GRID_SIZE / 2.0,
            ),
            with_alpha(core, dim),
        )?;
    }
    Ok(())
}

fn head(builder: &mut MeshBuilder, player: &Player) -> GameResult {
    let at = player.position();
    builder.rectangle(
        DrawMode::fill(),
        Rect::new(at.x, at.y, GRID_SIZE, GRID_SIZE),
        brighten(player_color(player.slot()), 100.0 / 255.0),
    )?;
    builder.rectangle(
        DrawMode::fill(),
        Rect::new(at.x + 2.0, at.y + 2.0, GRID_SIZE - 4.0, GRID_SIZE - 4.0),
        Color::WHITE,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Heading;
    use crate::player::Control;

    fn crashed(slot: PlayerSlot) -> Player {
        let start = Cell::new(100.0, 60.0);
        let mut player = Player::new(slot, "test", start, Heading::Up, Control::Human);
        player.crash();
        player
    }

    #[test]
    fn burst_centres_sparks_on_the_head() {
        let mut renderer = Renderer::new();
        renderer.burst(&crashed(PlayerSlot::Two));
        assert_eq!(renderer.sparks.len(), BURST_PARTICLES);
        for spark in &renderer.sparks {
            assert_eq!(spark.at, Cell::new(110.0, 70.0));
            assert!(BURST_LIFETIME.contains(&spark.ttl));
            assert_eq!(spark.color.r, NEON_ORANGE.r);
        }
    }

    #[test]
    fn sparks_drift_fade_and_expire() {
        let mut renderer = Renderer::new();
        renderer.burst(&crashed(PlayerSlot::One));
        let before: Vec<f32> = renderer.sparks.iter().map(|s| s.current_color().a).collect();

        renderer.update(0.25);
        for (spark, alpha) in renderer.sparks.iter().zip(before) {
            assert!(spark.current_color().a < alpha);
            assert_ne!(spark.at, Cell::new(110.0, 70.0));
        }

        for _ in 0..10 {
            renderer.update(0.25);
        }
        assert!(renderer.sparks.is_empty());
    }

    #[test]
    fn clear_drops_sparks() {
        let mut renderer = Renderer::new();
        renderer.burst(&crashed(PlayerSlot::One));
        renderer.clear();
        assert!(renderer.sparks.is_empty());
    }
}
