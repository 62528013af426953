//! Alien formations: level-scaled generation and rigid-block movement
//!
//! Normal and heavy aliens each move as one block with their own direction and
//! speed. When any active member touches a side wall the whole block (including
//! dead slots) reverses and drops.

use serde::{Deserialize, Serialize};

use super::entities::Alien;
use crate::consts::*;

/// Grid dimensions (rows, cols) of the normal formation for a level
pub fn normal_grid_size(level: u32) -> (u32, u32) {
    let step = level.saturating_sub(1);
    let rows = (4 + step / 2).min(6);
    let cols = (8 + step / 3).min(10);
    (rows, cols)
}

/// Number of heavy aliens for a level
pub fn heavy_count(level: u32) -> u32 {
    (3 + level.saturating_sub(1) / 2).min(6)
}

/// Starting hp of each heavy alien for a level
pub fn heavy_hp(level: u32) -> u32 {
    HEAVY_BASE_HP + level.saturating_sub(1) / 3
}

/// Formation speed for a level (pixels per tick)
pub fn formation_speed(base_speed: f32, level: u32) -> f32 {
    base_speed * (1.0 + level.saturating_sub(1) as f32 * LEVEL_SPEED_STEP)
}

/// A rigid block of aliens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// Slots in scan order (row-major). Dead aliens stay in place.
    pub aliens: Vec<Alien>,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl Formation {
    pub fn empty() -> Self {
        Self {
            aliens: Vec::new(),
            direction: 1.0,
            speed: 0.0,
        }
    }

    /// Build the normal alien grid for a level
    pub fn normal_for_level(level: u32) -> Self {
        let (rows, cols) = normal_grid_size(level);
        let mut aliens = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let x = ALIEN_OFFSET_LEFT + col as f32 * (ALIEN_WIDTH + ALIEN_PADDING);
                let y = ALIEN_OFFSET_TOP + row as f32 * (ALIEN_HEIGHT + ALIEN_PADDING);
                aliens.push(Alien::normal(x, y));
            }
        }
        log::debug!("Level {} normal formation: {}x{}", level, rows, cols);
        Self {
            aliens,
            direction: 1.0,
            speed: formation_speed(NORMAL_BASE_SPEED, level),
        }
    }

    /// Build the heavy alien row for a level, evenly spaced across the canvas
    pub fn heavy_for_level(level: u32) -> Self {
        let count = heavy_count(level);
        let hp = heavy_hp(level);
        let spacing = CANVAS_WIDTH / (count + 1) as f32;
        let aliens = (0..count)
            .map(|i| {
                let x = spacing * (i + 1) as f32 - HEAVY_WIDTH / 2.0;
                Alien::heavy(x, HEAVY_TOP, hp)
            })
            .collect();
        log::debug!("Level {} heavy formation: {} x hp {}", level, count, hp);
        Self {
            aliens,
            direction: 1.0,
            speed: formation_speed(HEAVY_BASE_SPEED, level),
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// True once every member has been destroyed
    pub fn is_cleared(&self) -> bool {
        self.aliens.iter().all(|a| !a.active)
    }

    /// Lowest bottom edge among active members
    pub fn lowest_bottom(&self) -> Option<f32> {
        self.active().map(|a| a.rect.bottom()).reduce(f32::max)
    }

    /// Advance one tick. Returns true if the formation bounced off a wall.
    pub fn advance(&mut self) -> bool {
        let dx = self.speed * self.direction;
        let mut hit_wall = false;
        for alien in self.aliens.iter_mut().filter(|a| a.active) {
            alien.rect.x += dx;
            if alien.rect.x <= 0.0 || alien.rect.x >= CANVAS_WIDTH - alien.rect.width {
                hit_wall = true;
            }
        }

        if hit_wall {
            self.direction = -self.direction;
            for alien in &mut self.aliens {
                alien.rect.y += FORMATION_DROP;
            }
        }
        hit_wall
    }
}
