//! One PLAYING tick of the simulation
//!
//! Movement is a fixed amount per tick and is not scaled by elapsed time, so
//! game speed follows the display refresh rate.

use super::entities::{Bullet, HitOutcome};
use super::input::Controls;
use super::state::{GameEvent, GameWorld};
use crate::consts::PLAYER_SPEED;

/// What the state machine should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// An alien reached the player's row
    GameOver,
    /// Both formations destroyed
    LevelComplete,
}

/// Advance the playfield by one tick
pub fn step(world: &mut GameWorld, controls: &Controls, events: &mut Vec<GameEvent>) -> StepOutcome {
    world.player.move_by(controls.axis() * PLAYER_SPEED);

    if world.fire_trigger.rising(controls.fire) {
        world.bullets.push(Bullet::fired_from(&world.player));
        events.push(GameEvent::BulletFired);
    }

    for bullet in &mut world.bullets {
        bullet.advance();
    }

    if world.normals.advance() {
        log::trace!("Normal formation bounced");
    }
    if world.heavies.advance() {
        log::trace!("Heavy formation bounced");
    }

    resolve_collisions(world, events);
    world.bullets.retain(|b| b.active);

    if aliens_reached_player(world) {
        return StepOutcome::GameOver;
    }
    if world.normals.is_cleared() && world.heavies.is_cleared() {
        return StepOutcome::LevelComplete;
    }
    StepOutcome::Continue
}

/// Each active bullet hits at most one alien: the first overlapping active
/// alien in scan order (normal formation, then heavy).
fn resolve_collisions(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let GameWorld {
        bullets,
        normals,
        heavies,
        session,
        ..
    } = world;

    for bullet in bullets.iter_mut().filter(|b| b.active) {
        let target = normals
            .aliens
            .iter_mut()
            .chain(heavies.aliens.iter_mut())
            .find(|a| a.active && a.rect.overlaps(&bullet.rect));

        let Some(alien) = target else {
            continue;
        };

        bullet.active = false;
        let heavy = alien.kind.is_heavy();
        match alien.hit() {
            HitOutcome::Destroyed { points } => {
                session.score += points;
                log::debug!("Alien destroyed (+{}, score {})", points, session.score);
                events.push(GameEvent::AlienDestroyed { heavy, points });
            }
            HitOutcome::Damaged { hp_left } => {
                events.push(GameEvent::AlienDamaged { hp_left });
            }
        }
    }
}

/// True if any active alien's bottom edge has reached the player's top
fn aliens_reached_player(world: &GameWorld) -> bool {
    let player_y = world.player.rect.y;
    [&world.normals, &world.heavies]
        .iter()
        .filter_map(|f| f.lowest_bottom())
        .any(|bottom| bottom >= player_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entities::{Alien, AlienKind};
    use crate::sim::formation::Formation;
    use crate::sim::rect::Rect;
    use proptest::prelude::*;

    fn playing_world() -> GameWorld {
        GameWorld::default()
    }

    /// A bullet sitting in the middle of `target`, low enough to still overlap
    /// after one tick of upward travel
    fn bullet_inside(target: &Rect) -> Bullet {
        let c = target.center();
        Bullet {
            rect: Rect::new(c.x - BULLET_WIDTH / 2.0, c.y, BULLET_WIDTH, BULLET_HEIGHT),
            active: true,
        }
    }

    fn fire() -> Controls {
        Controls {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut world = playing_world();
        let mut events = Vec::new();
        let start = world.player.rect.x;

        let right = Controls {
            right: true,
            ..Default::default()
        };
        step(&mut world, &right, &mut events);
        assert_eq!(world.player.rect.x, start + PLAYER_SPEED);

        for _ in 0..500 {
            step(&mut world, &right, &mut events);
        }
        assert_eq!(world.player.rect.x, CANVAS_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_held_fire_spawns_one_bullet() {
        let mut world = playing_world();
        let mut events = Vec::new();
        step(&mut world, &fire(), &mut events);
        step(&mut world, &fire(), &mut events);
        step(&mut world, &fire(), &mut events);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::BulletFired).count(),
            1
        );

        // Release then press again fires a second bullet
        step(&mut world, &Controls::default(), &mut events);
        step(&mut world, &fire(), &mut events);
        assert_eq!(world.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_spawn_and_travel() {
        let mut world = playing_world();
        let mut events = Vec::new();
        step(&mut world, &fire(), &mut events);
        let bullet = &world.bullets[0];
        assert_eq!(bullet.rect.center().x, world.player.rect.center().x);
        // Spawned at the player's top, then advanced in the same tick
        assert_eq!(bullet.rect.y, PLAYER_Y - BULLET_SPEED);
    }

    #[test]
    fn test_offscreen_bullets_are_purged() {
        let mut world = playing_world();
        world.bullets.push(Bullet {
            rect: Rect::new(5.0, 3.0, BULLET_WIDTH, BULLET_HEIGHT),
            active: true,
        });
        step(&mut world, &Controls::default(), &mut Vec::new());
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_normal_alien_hit() {
        let mut world = playing_world();
        let mut events = Vec::new();
        let target = world.normals.aliens[0].rect;
        world.bullets.push(bullet_inside(&target));

        step(&mut world, &Controls::default(), &mut events);

        assert!(!world.normals.aliens[0].active);
        assert_eq!(world.session.score, NORMAL_POINTS);
        assert!(world.bullets.is_empty());
        assert!(events.contains(&GameEvent::AlienDestroyed {
            heavy: false,
            points: NORMAL_POINTS
        }));
    }

    #[test]
    fn test_heavy_alien_hits() {
        let mut world = playing_world();
        let mut events = Vec::new();
        for expected_hp in [3, 2, 1] {
            let target = world.heavies.aliens[1].rect;
            world.bullets.push(bullet_inside(&target));
            step(&mut world, &Controls::default(), &mut events);
            assert_eq!(world.heavies.aliens[1].hp(), expected_hp);
            assert!(world.heavies.aliens[1].active);
            assert_eq!(world.session.score, 0);
        }

        let target = world.heavies.aliens[1].rect;
        world.bullets.push(bullet_inside(&target));
        step(&mut world, &Controls::default(), &mut events);
        assert!(!world.heavies.aliens[1].active);
        assert_eq!(world.session.score, HEAVY_POINTS);
    }

    #[test]
    fn test_bullet_hits_only_one_alien() {
        let mut world = playing_world();
        world.normals = Formation {
            aliens: vec![Alien::normal(300.0, 300.0), Alien::normal(300.0, 300.0)],
            direction: 1.0,
            speed: 0.0,
        };
        let target = world.normals.aliens[0].rect;
        world.bullets.push(bullet_inside(&target));

        step(&mut world, &Controls::default(), &mut Vec::new());

        // First in scan order wins; the overlapping twin survives
        assert!(!world.normals.aliens[0].active);
        assert!(world.normals.aliens[1].active);
        assert_eq!(world.session.score, NORMAL_POINTS);
    }

    #[test]
    fn test_inactive_aliens_are_not_hit() {
        let mut world = playing_world();
        world.normals.aliens[0].active = false;
        let target = world.normals.aliens[0].rect;
        world.bullets.push(bullet_inside(&target));

        step(&mut world, &Controls::default(), &mut Vec::new());

        assert_eq!(world.session.score, 0);
        assert_eq!(world.bullets.len(), 1);
    }

    fn ys(formation: &Formation) -> Vec<f32> {
        formation.aliens.iter().map(|a| a.rect.y).collect()
    }

    /// Slide a whole formation sideways
    fn shift(formation: &mut Formation, dx: f32) {
        for alien in &mut formation.aliens {
            alien.rect.x += dx;
        }
    }

    #[test]
    fn test_heavy_row_bounces_alone() {
        let mut world = playing_world();
        world.heavies.direction = -1.0;
        let dx = 1.0 - world.heavies.aliens[0].rect.x;
        shift(&mut world.heavies, dx);
        let heavy_ys = ys(&world.heavies);
        let normal_ys = ys(&world.normals);
        let normal_x = world.normals.aliens[0].rect.x;

        step(&mut world, &Controls::default(), &mut Vec::new());

        assert_eq!(world.heavies.direction, 1.0);
        for (y, before) in ys(&world.heavies).into_iter().zip(heavy_ys) {
            assert_eq!(y, before + FORMATION_DROP);
        }
        assert_eq!(world.normals.direction, 1.0);
        assert_eq!(ys(&world.normals), normal_ys);
        assert_eq!(world.normals.aliens[0].rect.x, normal_x + NORMAL_BASE_SPEED);
    }

    #[test]
    fn test_normal_grid_bounces_alone() {
        let mut world = playing_world();
        let rightmost = world
            .normals
            .aliens
            .iter()
            .map(|a| a.rect.x)
            .fold(f32::MIN, f32::max);
        shift(&mut world.normals, CANVAS_WIDTH - ALIEN_WIDTH - 0.5 - rightmost);
        let normal_ys = ys(&world.normals);
        let heavy_ys = ys(&world.heavies);

        step(&mut world, &Controls::default(), &mut Vec::new());

        assert_eq!(world.normals.direction, -1.0);
        for (y, before) in ys(&world.normals).into_iter().zip(normal_ys) {
            assert_eq!(y, before + FORMATION_DROP);
        }
        assert_eq!(world.heavies.direction, 1.0);
        assert_eq!(ys(&world.heavies), heavy_ys);
    }

    #[test]
    fn test_game_over_when_aliens_reach_player() {
        let mut world = playing_world();
        let last = world.normals.aliens.len() - 1;
        world.normals.aliens[last].rect.y = PLAYER_Y - ALIEN_HEIGHT;
        assert_eq!(
            step(&mut world, &Controls::default(), &mut Vec::new()),
            StepOutcome::GameOver
        );
    }

    #[test]
    fn test_dead_aliens_do_not_end_the_game() {
        let mut world = playing_world();
        world.normals.aliens[0].rect.y = PLAYER_Y;
        world.normals.aliens[0].active = false;
        assert_eq!(
            step(&mut world, &Controls::default(), &mut Vec::new()),
            StepOutcome::Continue
        );
    }

    #[test]
    fn test_clearing_level_one() {
        let mut world = playing_world();
        let mut events = Vec::new();

        // One bullet per normal alien
        let targets: Vec<Rect> = world.normals.aliens.iter().map(|a| a.rect).collect();
        world.bullets.extend(targets.iter().map(bullet_inside));
        let outcome = step(&mut world, &Controls::default(), &mut events);
        assert_eq!(outcome, StepOutcome::Continue);
        assert_eq!(world.session.score, 320);

        // Heavies: hp 4 each, 12 hits total
        let mut outcome = StepOutcome::Continue;
        for _ in 0..4 {
            let targets: Vec<Rect> = world.heavies.active().map(|a| a.rect).collect();
            world.bullets.extend(targets.iter().map(bullet_inside));
            outcome = step(&mut world, &Controls::default(), &mut events);
        }
        assert_eq!(outcome, StepOutcome::LevelComplete);
        assert_eq!(world.session.score, 470);

        let damaged = events
            .iter()
            .filter(|e| matches!(e, GameEvent::AlienDamaged { .. }))
            .count();
        let heavy_kills = events
            .iter()
            .filter(|e| matches!(e, GameEvent::AlienDestroyed { heavy: true, .. }))
            .count();
        assert_eq!(damaged + heavy_kills, 12);
        assert_eq!(heavy_kills, 3);
        assert!(world
            .heavies
            .aliens
            .iter()
            .all(|a| matches!(a.kind, AlienKind::Heavy { hp: 0, .. })));
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_canvas(moves in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..300)) {
            let mut world = playing_world();
            let mut events = Vec::new();
            for (left, right, fire) in moves {
                let controls = Controls { left, right, fire };
                step(&mut world, &controls, &mut events);
                prop_assert!(world.player.rect.x >= 0.0);
                prop_assert!(world.player.rect.x <= CANVAS_WIDTH - PLAYER_WIDTH);
            }
        }

        #[test]
        fn prop_score_never_decreases(moves in prop::collection::vec((any::<bool>(), any::<bool>()), 0..400)) {
            let mut world = playing_world();
            let mut events = Vec::new();
            let mut last = world.session.score;
            for (left, fire) in moves {
                let controls = Controls { left, right: !left, fire };
                if step(&mut world, &controls, &mut events) != StepOutcome::Continue {
                    break;
                }
                prop_assert!(world.session.score >= last);
                last = world.session.score;
            }
        }
    }
}
