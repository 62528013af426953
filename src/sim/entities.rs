//! Player, bullet and alien entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                (CANVAS_WIDTH - PLAYER_WIDTH) / 2.0,
                PLAYER_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
        }
    }
}

impl Player {
    /// Shift horizontally, clamped to the canvas
    pub fn move_by(&mut self, dx: f32) {
        self.rect.x += dx;
        self.rect.clamp_x(CANVAS_WIDTH);
    }

    /// Where bullets leave the ship: horizontal centre, top edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.center().x, self.rect.y)
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub active: bool,
}

impl Bullet {
    /// Spawn a bullet centred on the player's muzzle
    pub fn fired_from(player: &Player) -> Self {
        let muzzle = player.muzzle();
        Self {
            rect: Rect::new(
                muzzle.x - BULLET_WIDTH / 2.0,
                muzzle.y,
                BULLET_WIDTH,
                BULLET_HEIGHT,
            ),
            active: true,
        }
    }

    /// Move up one tick; deactivates once past the top of the canvas
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.rect.y -= BULLET_SPEED;
        if self.rect.y < 0.0 {
            self.active = false;
        }
    }
}

/// Alien variants. Hit points only exist on the heavy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienKind {
    /// Dies to any hit
    Normal,
    /// Takes several hits; `max_hp` is kept for the damage bar
    Heavy { hp: u32, max_hp: u32 },
}

impl AlienKind {
    /// Score awarded when this alien is destroyed
    pub fn points(&self) -> u64 {
        match self {
            AlienKind::Normal => NORMAL_POINTS,
            AlienKind::Heavy { .. } => HEAVY_POINTS,
        }
    }

    pub fn is_heavy(&self) -> bool {
        matches!(self, AlienKind::Heavy { .. })
    }
}

/// Result of a bullet striking an alien
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Destroyed { points: u64 },
    Damaged { hp_left: u32 },
}

/// An alien in a formation slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub rect: Rect,
    pub active: bool,
    pub kind: AlienKind,
}

impl Alien {
    pub fn normal(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, ALIEN_WIDTH, ALIEN_HEIGHT),
            active: true,
            kind: AlienKind::Normal,
        }
    }

    pub fn heavy(x: f32, y: f32, hp: u32) -> Self {
        Self {
            rect: Rect::new(x, y, HEAVY_WIDTH, HEAVY_HEIGHT),
            active: true,
            kind: AlienKind::Heavy { hp, max_hp: hp },
        }
    }

    /// Apply one bullet hit
    pub fn hit(&mut self) -> HitOutcome {
        let points = self.kind.points();
        match &mut self.kind {
            AlienKind::Normal => {
                self.active = false;
                HitOutcome::Destroyed { points }
            }
            AlienKind::Heavy { hp, .. } => {
                *hp = hp.saturating_sub(1);
                if *hp == 0 {
                    self.active = false;
                    HitOutcome::Destroyed { points }
                } else {
                    HitOutcome::Damaged { hp_left: *hp }
                }
            }
        }
    }

    /// Remaining hp (normal aliens count as 1 while alive)
    pub fn hp(&self) -> u32 {
        match self.kind {
            AlienKind::Normal => u32::from(self.active),
            AlienKind::Heavy { hp, .. } => hp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_centered() {
        let player = Player::default();
        assert_eq!(player.rect.x, (CANVAS_WIDTH - PLAYER_WIDTH) / 2.0);
        assert_eq!(player.rect.y, PLAYER_Y);
    }

    #[test]
    fn test_player_clamps_to_canvas() {
        let mut player = Player::default();
        player.move_by(-10_000.0);
        assert_eq!(player.rect.x, 0.0);
        player.move_by(10_000.0);
        assert_eq!(player.rect.x, CANVAS_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_bullet_spawns_at_muzzle() {
        let player = Player::default();
        let bullet = Bullet::fired_from(&player);
        assert!(bullet.active);
        assert_eq!(bullet.rect.center().x, player.rect.center().x);
        assert_eq!(bullet.rect.y, player.rect.y);
    }

    #[test]
    fn test_bullet_deactivates_off_top() {
        let mut bullet = Bullet::fired_from(&Player::default());
        bullet.rect.y = BULLET_SPEED - 1.0;
        bullet.advance();
        assert!(!bullet.active);

        // Inactive bullets stay put
        let y = bullet.rect.y;
        bullet.advance();
        assert_eq!(bullet.rect.y, y);
    }

    #[test]
    fn test_normal_alien_dies_in_one_hit() {
        let mut alien = Alien::normal(0.0, 0.0);
        assert_eq!(alien.hit(), HitOutcome::Destroyed { points: 10 });
        assert!(!alien.active);
        assert_eq!(alien.hp(), 0);
    }

    #[test]
    fn test_heavy_alien_takes_hits() {
        let mut alien = Alien::heavy(0.0, 0.0, 4);
        assert_eq!(alien.hit(), HitOutcome::Damaged { hp_left: 3 });
        assert_eq!(alien.hit(), HitOutcome::Damaged { hp_left: 2 });
        assert_eq!(alien.hit(), HitOutcome::Damaged { hp_left: 1 });
        assert!(alien.active);
        assert_eq!(alien.hit(), HitOutcome::Destroyed { points: 50 });
        assert!(!alien.active);
        assert_eq!(alien.hp(), 0);
    }
}
