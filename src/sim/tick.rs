//! Per-frame state machine
//!
//! Discrete input events are applied in arrival order against the current
//! mode, then the timed part of the current mode runs: the simulation step
//! while PLAYING, the intermission countdown while in LEVEL_TRANSITION.

use super::input::{InputEvent, KeyPress, TickInput};
use super::physics::{self, StepOutcome};
use super::state::{GameEvent, GameMode, GameWorld};
use crate::consts::{LEVEL_TRANSITION_MS, MAX_NAME_LEN};
use crate::highscores::{self, load_leaderboard};
use crate::persistence::Storage;
use crate::ui::{self, MenuChoice, PauseChoice};

/// Advance the world by one frame.
///
/// `dt_ms` is the real time since the previous frame; only the level
/// transition countdown uses it.
pub fn tick(
    world: &mut GameWorld,
    input: &TickInput,
    dt_ms: f32,
    storage: &mut dyn Storage,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    world.time_ticks += 1;

    for event in &input.events {
        handle_event(world, event, storage, &mut events);
    }

    match world.mode {
        GameMode::Playing => match physics::step(world, &input.controls, &mut events) {
            StepOutcome::Continue => {}
            StepOutcome::GameOver => finish_run(world, storage, &mut events),
            StepOutcome::LevelComplete => {
                log::info!(
                    "Level {} cleared (score {})",
                    world.session.level,
                    world.session.score
                );
                events.push(GameEvent::LevelCleared {
                    level: world.session.level,
                    score: world.session.score,
                });
                world.transition_ms = 0.0;
                world.set_mode(GameMode::LevelTransition, &mut events);
            }
        },
        GameMode::LevelTransition => {
            world.transition_ms += dt_ms;
            if world.transition_ms >= LEVEL_TRANSITION_MS {
                world.session.level += 1;
                world.transition_ms = 0.0;
                world.spawn_level();
                start_level(world, &mut events);
            }
        }
        _ => {}
    }

    events
}

fn handle_event(
    world: &mut GameWorld,
    event: &InputEvent,
    storage: &mut dyn Storage,
    events: &mut Vec<GameEvent>,
) {
    match (world.mode, *event) {
        (GameMode::Menu, InputEvent::Click(point)) => match ui::menu_choice_at(point) {
            Some(MenuChoice::Start) => {
                world.session.player_name.clear();
                world.set_mode(GameMode::NameInput, events);
            }
            Some(MenuChoice::Scoreboard) => {
                world.leaderboard = load_leaderboard(storage);
                world.set_mode(GameMode::Scoreboard, events);
            }
            Some(MenuChoice::Credits) => world.set_mode(GameMode::Credits, events),
            None => {}
        },

        (GameMode::NameInput, InputEvent::Key(key)) => name_input(world, key, events),

        (GameMode::Playing, InputEvent::Key(KeyPress::Escape)) => {
            world.set_mode(GameMode::Paused, events);
        }
        (GameMode::Playing, InputEvent::Click(point)) if ui::PAUSE_HITBOX.contains(point) => {
            world.set_mode(GameMode::Paused, events);
        }
        (GameMode::Playing, InputEvent::Pause) => world.set_mode(GameMode::Paused, events),

        (GameMode::Paused, InputEvent::Key(KeyPress::Escape)) => {
            world.set_mode(GameMode::Playing, events);
        }
        (GameMode::Paused, InputEvent::Click(point)) => match ui::pause_choice_at(point) {
            Some(PauseChoice::Resume) => world.set_mode(GameMode::Playing, events),
            Some(PauseChoice::Menu) => {
                world.reset_session();
                world.set_mode(GameMode::Menu, events);
            }
            None => {}
        },

        (GameMode::GameOver | GameMode::Scoreboard | GameMode::Credits, InputEvent::Click(_)) => {
            world.set_mode(GameMode::Menu, events);
        }

        _ => {}
    }
}

fn name_input(world: &mut GameWorld, key: KeyPress, events: &mut Vec<GameEvent>) {
    let name = &mut world.session.player_name;
    match key {
        KeyPress::Char(c) if c.is_ascii_alphanumeric() => {
            if name.len() < MAX_NAME_LEN {
                name.push(c.to_ascii_uppercase());
            }
        }
        KeyPress::Backspace => {
            name.pop();
        }
        KeyPress::Enter if !name.is_empty() => {
            log::info!("Starting run for {}", name);
            world.reset_session();
            start_level(world, events);
        }
        KeyPress::Escape => world.set_mode(GameMode::Menu, events),
        _ => {}
    }
}

fn start_level(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    log::info!("Level {} start", world.session.level);
    events.push(GameEvent::LevelStarted {
        level: world.session.level,
    });
    world.set_mode(GameMode::Playing, events);
}

/// Persist the finished run, then show the game over screen
fn finish_run(world: &mut GameWorld, storage: &mut dyn Storage, events: &mut Vec<GameEvent>) {
    let score = world.session.score;
    let (board, rank) = highscores::record_score(storage, &world.session.player_name, score);
    log::info!(
        "Game over: {} scored {} at level {} (rank {:?})",
        world.session.player_name,
        score,
        world.session.level,
        rank
    );
    world.leaderboard = board;
    world.last_rank = rank;
    events.push(GameEvent::GameOver { score, rank });
    world.set_mode(GameMode::GameOver, events);
}
