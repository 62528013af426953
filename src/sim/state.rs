//! Game world and core simulation types
//!
//! Everything the state machine, simulation and renderer share lives in one
//! owned `GameWorld`. Nothing here is global.

use serde::{Deserialize, Serialize};

use super::entities::{Alien, Bullet, Player};
use super::formation::Formation;
use super::input::EdgeTrigger;
use crate::consts::LEVEL_TRANSITION_MS;
use crate::highscores::Leaderboard;

/// Current screen / mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen with Start / Scoreboard / Credits
    #[default]
    Menu,
    /// Typing the player name
    NameInput,
    /// Active gameplay
    Playing,
    /// Timed intermission after a cleared level
    LevelTransition,
    /// Game is paused
    Paused,
    /// Run ended, score recorded
    GameOver,
    Scoreboard,
    Credits,
}

impl GameMode {
    /// Modes in which the playfield (ship, aliens, bullets) is visible
    pub fn shows_playfield(&self) -> bool {
        matches!(
            self,
            GameMode::Playing | GameMode::Paused | GameMode::LevelTransition
        )
    }
}

/// Per-run progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub player_name: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            player_name: String::new(),
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ModeChanged { from: GameMode, to: GameMode },
    BulletFired,
    /// A heavy alien absorbed a hit
    AlienDamaged { hp_left: u32 },
    AlienDestroyed { heavy: bool, points: u64 },
    LevelCleared { level: u32, score: u64 },
    LevelStarted { level: u32 },
    /// Run over; `rank` is the leaderboard position reached, if any
    GameOver { score: u64, rank: Option<usize> },
}

/// Complete game world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWorld {
    pub mode: GameMode,
    pub session: Session,
    pub player: Player,
    /// Live bullets (inactive ones are purged every tick)
    pub bullets: Vec<Bullet>,
    pub normals: Formation,
    pub heavies: Formation,
    /// Time spent in the level transition so far (ms)
    pub transition_ms: f32,
    /// Fire debounce
    pub fire_trigger: EdgeTrigger,
    /// Leaderboard as last read from storage (for the scoreboard screens)
    pub leaderboard: Leaderboard,
    /// Rank reached by the most recent finished run
    pub last_rank: Option<usize>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new(Leaderboard::new())
    }
}

impl GameWorld {
    /// Create a world at the main menu with a fresh level-1 formation
    pub fn new(leaderboard: Leaderboard) -> Self {
        let mut world = Self {
            mode: GameMode::Menu,
            session: Session::default(),
            player: Player::default(),
            bullets: Vec::new(),
            normals: Formation::empty(),
            heavies: Formation::empty(),
            transition_ms: 0.0,
            fire_trigger: EdgeTrigger::default(),
            leaderboard,
            last_rank: None,
            time_ticks: 0,
        };
        world.spawn_level();
        world
    }

    /// Switch mode, recording the transition
    pub fn set_mode(&mut self, to: GameMode, events: &mut Vec<GameEvent>) {
        let from = self.mode;
        if from == to {
            return;
        }
        log::info!("Mode {:?} -> {:?}", from, to);
        self.mode = to;
        events.push(GameEvent::ModeChanged { from, to });
    }

    /// Back to level 1 with score 0 (the player name is kept)
    pub fn reset_session(&mut self) {
        self.session.level = 1;
        self.session.score = 0;
        self.transition_ms = 0.0;
        self.player = Player::default();
        self.spawn_level();
    }

    /// Generate formations for the current level, clear stray bullets and
    /// forget any fire press carried over from before
    pub fn spawn_level(&mut self) {
        let level = self.session.level;
        self.normals = Formation::normal_for_level(level);
        self.heavies = Formation::heavy_for_level(level);
        self.bullets.clear();
        self.fire_trigger = EdgeTrigger::default();
    }

    /// Every alien slot, normal formation first (collision scan order)
    pub fn aliens(&self) -> impl Iterator<Item = &Alien> {
        self.normals.aliens.iter().chain(self.heavies.aliens.iter())
    }

    /// Level transition progress in [0, 1]
    pub fn transition_progress(&self) -> f32 {
        (self.transition_ms / LEVEL_TRANSITION_MS).clamp(0.0, 1.0)
    }
}
