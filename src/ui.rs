//! Screen layout
//!
//! Button hitboxes in logical canvas coordinates. The state machine hit-tests
//! clicks against these and the renderer draws the same rectangles, so the
//! two can never disagree. Screen text is composed here too and written into
//! the DOM by the web shell.

use glam::Vec2;

use crate::consts::{CANVAS_WIDTH, MAX_NAME_LEN};
use crate::highscores::MAX_HIGH_SCORES;
use crate::sim::{GameMode, GameWorld, Rect};

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_X: f32 = (CANVAS_WIDTH - BUTTON_WIDTH) / 2.0;

const fn button_row(y: f32) -> Rect {
    Rect::new(BUTTON_X, y, BUTTON_WIDTH, BUTTON_HEIGHT)
}

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Scoreboard,
    Credits,
}

/// Pause overlay entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChoice {
    Resume,
    Menu,
}

/// A clickable, labelled region
#[derive(Debug, Clone, Copy)]
pub struct Button<T> {
    pub choice: T,
    pub label: &'static str,
    pub rect: Rect,
}

impl<T> Button<T> {
    /// Inline CSS placing a caption over `rect` on the 800x600 stage
    pub fn css_box(&self) -> String {
        let r = &self.rect;
        format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; line-height: {}px",
            r.x, r.y, r.width, r.height, r.height
        )
    }
}

pub const MENU_BUTTONS: [Button<MenuChoice>; 3] = [
    Button {
        choice: MenuChoice::Start,
        label: "Start",
        rect: button_row(250.0),
    },
    Button {
        choice: MenuChoice::Scoreboard,
        label: "Scoreboard",
        rect: button_row(320.0),
    },
    Button {
        choice: MenuChoice::Credits,
        label: "Credits",
        rect: button_row(390.0),
    },
];

pub const PAUSE_BUTTONS: [Button<PauseChoice>; 2] = [
    Button {
        choice: PauseChoice::Resume,
        label: "Resume",
        rect: button_row(250.0),
    },
    Button {
        choice: PauseChoice::Menu,
        label: "Menu",
        rect: button_row(320.0),
    },
];

/// In-game pause button (top-right corner)
pub const PAUSE_HITBOX: Rect = Rect::new(CANVAS_WIDTH - 50.0, 10.0, 40.0, 40.0);

fn hit<T: Copy>(buttons: &[Button<T>], point: Vec2) -> Option<T> {
    buttons
        .iter()
        .find(|b| b.rect.contains(point))
        .map(|b| b.choice)
}

pub fn menu_choice_at(point: Vec2) -> Option<MenuChoice> {
    hit(&MENU_BUTTONS, point)
}

pub fn pause_choice_at(point: Vec2) -> Option<PauseChoice> {
    hit(&PAUSE_BUTTONS, point)
}

const CREDITS: &[&str] = &[
    "CREDITS",
    "",
    "Design & code: the Alien Barrage team",
    "Rendering: wgpu",
    "",
    "Click to return",
];

fn leaderboard_lines(world: &GameWorld, lines: &mut Vec<String>) {
    if world.leaderboard.is_empty() {
        lines.push("No scores yet".to_string());
        return;
    }
    for (i, entry) in world.leaderboard.entries().iter().enumerate() {
        lines.push(format!(
            "{}. {:<width$} {:>6}",
            i + 1,
            entry.name,
            entry.score,
            width = MAX_NAME_LEN
        ));
    }
}

/// Centre-screen text for the current mode (empty when nothing is shown)
pub fn screen_lines(world: &GameWorld) -> Vec<String> {
    let mut lines = Vec::new();
    match world.mode {
        GameMode::Menu => lines.push("ALIEN BARRAGE".to_string()),
        GameMode::NameInput => {
            lines.push("ENTER YOUR NAME".to_string());
            lines.push(format!("{}_", world.session.player_name));
            lines.push("Press Enter to start".to_string());
        }
        GameMode::Playing => {}
        GameMode::LevelTransition => {
            lines.push(format!("LEVEL {} COMPLETE", world.session.level));
            lines.push(format!("Get ready for level {}", world.session.level + 1));
        }
        GameMode::Paused => lines.push("PAUSED".to_string()),
        GameMode::GameOver => {
            lines.push("GAME OVER".to_string());
            lines.push(format!("Final score: {}", world.session.score));
            if let Some(rank) = world.last_rank {
                lines.push(format!("New high score! Rank #{}", rank));
            }
            lines.push(String::new());
            leaderboard_lines(world, &mut lines);
            lines.push(String::new());
            lines.push("Click to return".to_string());
        }
        GameMode::Scoreboard => {
            lines.push(format!("TOP {}", MAX_HIGH_SCORES));
            leaderboard_lines(world, &mut lines);
            lines.push(String::new());
            lines.push("Click to return".to_string());
        }
        GameMode::Credits => lines.extend(CREDITS.iter().map(|l| l.to_string())),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{Leaderboard, ScoreEntry};

    #[test]
    fn test_menu_hit_testing() {
        assert_eq!(menu_choice_at(Vec2::new(400.0, 275.0)), Some(MenuChoice::Start));
        assert_eq!(
            menu_choice_at(Vec2::new(400.0, 345.0)),
            Some(MenuChoice::Scoreboard)
        );
        assert_eq!(menu_choice_at(Vec2::new(400.0, 415.0)), Some(MenuChoice::Credits));
        // Gap between buttons
        assert_eq!(menu_choice_at(Vec2::new(400.0, 310.0)), None);
        assert_eq!(menu_choice_at(Vec2::new(10.0, 275.0)), None);
    }

    #[test]
    fn test_pause_hit_testing() {
        assert_eq!(pause_choice_at(Vec2::new(400.0, 275.0)), Some(PauseChoice::Resume));
        assert_eq!(pause_choice_at(Vec2::new(400.0, 345.0)), Some(PauseChoice::Menu));
        assert_eq!(pause_choice_at(Vec2::new(400.0, 415.0)), None);
    }

    #[test]
    fn test_pause_hitbox_inside_canvas() {
        assert!(PAUSE_HITBOX.right() <= CANVAS_WIDTH);
        assert!(PAUSE_HITBOX.contains(Vec2::new(770.0, 30.0)));
    }

    #[test]
    fn test_caption_box_follows_rect() {
        assert_eq!(
            MENU_BUTTONS[1].css_box(),
            "left: 300px; top: 320px; width: 200px; height: 50px; line-height: 50px"
        );
        assert_eq!(PAUSE_BUTTONS[0].label, "Resume");
        assert!(PAUSE_BUTTONS[0].css_box().contains("top: 250px"));
    }

    #[test]
    fn test_playing_has_no_screen_text() {
        let mut world = GameWorld::default();
        world.mode = GameMode::Playing;
        assert!(screen_lines(&world).is_empty());
    }

    #[test]
    fn test_name_input_shows_typed_name() {
        let mut world = GameWorld::default();
        world.mode = GameMode::NameInput;
        world.session.player_name = "ZED".into();
        assert!(screen_lines(&world).contains(&"ZED_".to_string()));
    }

    #[test]
    fn test_game_over_shows_rank_and_board() {
        let mut world = GameWorld::new(Leaderboard::from_entries(vec![
            ScoreEntry::new("ACE", 900),
            ScoreEntry::new("BOB", 470),
        ]));
        world.mode = GameMode::GameOver;
        world.session.score = 470;
        world.last_rank = Some(2);

        let lines = screen_lines(&world);
        assert!(lines.contains(&"Final score: 470".to_string()));
        assert!(lines.contains(&"New high score! Rank #2".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("1. ACE")));
        assert!(lines.iter().any(|l| l.starts_with("2. BOB")));
    }

    #[test]
    fn test_game_over_without_rank() {
        let mut world = GameWorld::default();
        world.mode = GameMode::GameOver;
        world.last_rank = None;
        let lines = screen_lines(&world);
        assert!(!lines.iter().any(|l| l.contains("Rank")));
    }

    #[test]
    fn test_empty_scoreboard() {
        let mut world = GameWorld::default();
        world.mode = GameMode::Scoreboard;
        assert!(screen_lines(&world).contains(&"No scores yet".to_string()));
    }
}
