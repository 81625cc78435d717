//! Text renderer for terminals and headless runs
//!
//! One character per grid cell:
//! `@` player, `$` revealed node, `E`/`e` near/far enemy, `~` sonar ring.

use glam::Vec2;

use super::{FrameSnapshot, Renderer};
use crate::consts::{CELL_SIZE, GRID_SIZE};
use crate::grid_to_pixel;

const EMPTY: char = '.';

#[derive(Debug, Default)]
pub struct AsciiRenderer {
    frame: String,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last drawn frame, rows separated by newlines
    pub fn frame(&self) -> &str {
        &self.frame
    }
}

/// Nearest cell to a continuous grid position
fn cell_of(pos: Vec2) -> (usize, usize) {
    let max = (GRID_SIZE - 1) as f32;
    let x = pos.x.round().clamp(0.0, max) as usize;
    let y = pos.y.round().clamp(0.0, max) as usize;
    (x, y)
}

impl Renderer for AsciiRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        let n = GRID_SIZE as usize;
        let mut grid = vec![vec![EMPTY; n]; n];

        if let Some(ring) = frame.visible_ring() {
            for (y, row) in grid.iter_mut().enumerate() {
                for (x, cell) in row.iter_mut().enumerate() {
                    let center = grid_to_pixel(Vec2::new(x as f32, y as f32));
                    let d = crate::distance(center, ring.origin);
                    if (d - ring.radius).abs() <= CELL_SIZE / 2.0 {
                        *cell = '~';
                    }
                }
            }
        }

        if frame.target.revealed {
            let (x, y) = cell_of(frame.target.pos);
            grid[y][x] = '$';
        }

        for enemy in &frame.enemies {
            let (x, y) = cell_of(enemy.pos);
            grid[y][x] = if frame.is_enemy_near(enemy) { 'E' } else { 'e' };
        }

        let (x, y) = cell_of(frame.player.pos);
        grid[y][x] = '@';

        self.frame = grid
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
    }
}
