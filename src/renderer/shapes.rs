//! Shape generation for 2D primitives
//!
//! Everything is an axis-aligned rectangle in logical canvas coordinates.
//! `build_frame` reads the world and never mutates it.

use super::vertex::{Vertex, colors};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::{Alien, AlienKind, GameMode, GameWorld, Rect};
use crate::ui::{self, Button};

/// Border thickness of menu buttons
const BUTTON_BORDER: f32 = 2.0;
/// Heavy alien hp bar, drawn just above the alien
const HP_BAR_HEIGHT: f32 = 4.0;
const HP_BAR_GAP: f32 = 2.0;
/// Level transition progress bar
const PROGRESS_BAR: Rect = Rect::new(200.0, 380.0, 400.0, 16.0);

/// Two triangles covering `rect`
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

fn push_quad(out: &mut Vec<Vertex>, rect: &Rect, color: [f32; 4]) {
    out.extend_from_slice(&quad(rect, color));
}

/// Background and filled portion of a heavy alien's hp bar
pub fn hp_bar(alien: &Alien) -> Option<(Rect, Rect)> {
    let AlienKind::Heavy { hp, max_hp } = alien.kind else {
        return None;
    };
    let fraction = if max_hp == 0 {
        0.0
    } else {
        hp as f32 / max_hp as f32
    };
    let back = Rect::new(
        alien.rect.x,
        alien.rect.y - HP_BAR_GAP - HP_BAR_HEIGHT,
        alien.rect.width,
        HP_BAR_HEIGHT,
    );
    let fill = Rect {
        width: back.width * fraction,
        ..back
    };
    Some((back, fill))
}

fn push_button<T>(out: &mut Vec<Vertex>, button: &Button<T>) {
    push_quad(out, &button.rect, colors::BUTTON_BORDER);
    let inner = Rect::new(
        button.rect.x + BUTTON_BORDER,
        button.rect.y + BUTTON_BORDER,
        button.rect.width - 2.0 * BUTTON_BORDER,
        button.rect.height - 2.0 * BUTTON_BORDER,
    );
    push_quad(out, &inner, colors::BUTTON);
}

/// The in-game pause button: a square with two vertical bars
fn push_pause_icon(out: &mut Vec<Vertex>) {
    let r = ui::PAUSE_HITBOX;
    push_quad(out, &r, colors::BUTTON);
    let bar_w = r.width * 0.2;
    let bar_h = r.height * 0.6;
    let top = r.y + (r.height - bar_h) / 2.0;
    push_quad(
        out,
        &Rect::new(r.x + r.width * 0.25, top, bar_w, bar_h),
        colors::PAUSE_ICON,
    );
    push_quad(
        out,
        &Rect::new(r.x + r.width * 0.55, top, bar_w, bar_h),
        colors::PAUSE_ICON,
    );
}

fn push_playfield(out: &mut Vec<Vertex>, world: &GameWorld) {
    push_quad(out, &world.player.rect, colors::PLAYER);

    for bullet in world.bullets.iter().filter(|b| b.active) {
        push_quad(out, &bullet.rect, colors::BULLET);
    }

    for alien in world.aliens().filter(|a| a.active) {
        let color = if alien.kind.is_heavy() {
            colors::ALIEN_HEAVY
        } else {
            colors::ALIEN_NORMAL
        };
        push_quad(out, &alien.rect, color);

        if let Some((back, fill)) = hp_bar(alien) {
            push_quad(out, &back, colors::HP_BAR_BACK);
            push_quad(out, &fill, colors::HP_BAR);
        }
    }
}

/// Build the triangle list for the current frame
pub fn build_frame(world: &GameWorld) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(1024);

    if world.mode.shows_playfield() {
        push_playfield(&mut out, world);
    }

    match world.mode {
        GameMode::Menu => {
            for button in &ui::MENU_BUTTONS {
                push_button(&mut out, button);
            }
        }
        GameMode::Playing => push_pause_icon(&mut out),
        GameMode::Paused => {
            let screen = Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
            push_quad(&mut out, &screen, colors::OVERLAY);
            for button in &ui::PAUSE_BUTTONS {
                push_button(&mut out, button);
            }
        }
        GameMode::LevelTransition => {
            push_quad(&mut out, &PROGRESS_BAR, colors::PROGRESS_BACK);
            let fill = Rect {
                width: PROGRESS_BAR.width * world.transition_progress(),
                ..PROGRESS_BAR
            };
            push_quad(&mut out, &fill, colors::PROGRESS);
        }
        // Text-only screens, drawn by the DOM HUD
        GameMode::NameInput | GameMode::GameOver | GameMode::Scoreboard | GameMode::Credits => {}
    }

    out
}
