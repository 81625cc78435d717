//! Canvas 2D renderer (web only)

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::{FrameSnapshot, Renderer};
use crate::consts::CANVAS_SIZE;

const BACKGROUND: &str = "#020205";
const RING: &str = "rgba(34, 211, 238, 0.4)";
const NODE: &str = "#fbbf24";
const ENEMY_NEAR: &str = "#ef4444";
const ENEMY_FAR: &str = "#ef444433";
const PLAYER: &str = "#22d3ee";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn disc(&self, x: f64, y: f64, r: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, r, 0.0, TAU);
        self.ctx.fill();
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        let ctx = &self.ctx;
        let cell = frame.cell_size as f64;
        let half = cell / 2.0;
        let size = CANVAS_SIZE as f64;

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, size, size);

        if let Some(ring) = frame.visible_ring() {
            ctx.set_stroke_style_str(RING);
            ctx.set_line_width(2.0);
            ctx.begin_path();
            let _ = ctx.arc(
                ring.origin.x as f64,
                ring.origin.y as f64,
                ring.radius as f64,
                0.0,
                TAU,
            );
            ctx.stroke();
        }

        if frame.target.revealed {
            ctx.set_fill_style_str(NODE);
            ctx.set_shadow_blur(15.0);
            ctx.set_shadow_color(NODE);
            ctx.fill_rect(
                frame.target.pos.x as f64 * cell + 10.0,
                frame.target.pos.y as f64 * cell + 10.0,
                20.0,
                20.0,
            );
            ctx.set_shadow_blur(0.0);
        }

        for enemy in &frame.enemies {
            let color = if frame.is_enemy_near(enemy) {
                ENEMY_NEAR
            } else {
                ENEMY_FAR
            };
            ctx.set_fill_style_str(color);
            self.disc(
                enemy.pos.x as f64 * cell + half,
                enemy.pos.y as f64 * cell + half,
                8.0,
            );
        }

        ctx.set_fill_style_str(PLAYER);
        ctx.set_shadow_blur(10.0);
        ctx.set_shadow_color(PLAYER);
        self.disc(
            frame.player.pos.x as f64 * cell + half,
            frame.player.pos.y as f64 * cell + half,
            10.0,
        );
        ctx.set_shadow_blur(0.0);
    }
}
