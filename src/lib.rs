//! Alien Barrage - a browser arcade shooter
//!
//! Core modules:
//! - `sim`: Game world, state machine and per-tick simulation
//! - `highscores`: Top-5 leaderboard
//! - `persistence`: Key-value storage boundary (LocalStorage on web)
//! - `platform`: Input snapshot and frame timing
//! - `renderer`: Frame builder and WebGPU pipeline
//! - `ui`: Screen layout shared by input hit-testing and drawing

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::{Leaderboard, ScoreEntry};
pub use settings::{KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical canvas size (pixels). Everything in `sim` lives in this space.
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Nominal frame duration at 60 Hz (ms)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_Y: f32 = CANVAS_HEIGHT - PLAYER_HEIGHT - 20.0;
    /// Horizontal speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Upward speed (pixels per tick)
    pub const BULLET_SPEED: f32 = 7.0;

    /// Normal alien grid
    pub const ALIEN_WIDTH: f32 = 40.0;
    pub const ALIEN_HEIGHT: f32 = 30.0;
    pub const ALIEN_PADDING: f32 = 10.0;
    pub const ALIEN_OFFSET_LEFT: f32 = 30.0;
    pub const ALIEN_OFFSET_TOP: f32 = 100.0;
    pub const NORMAL_BASE_SPEED: f32 = 1.0;

    /// Heavy alien row (sits above the normal grid)
    pub const HEAVY_WIDTH: f32 = 60.0;
    pub const HEAVY_HEIGHT: f32 = 40.0;
    pub const HEAVY_TOP: f32 = 40.0;
    pub const HEAVY_BASE_SPEED: f32 = 1.5;
    pub const HEAVY_BASE_HP: u32 = 4;

    /// Vertical drop when a formation bounces off a wall
    pub const FORMATION_DROP: f32 = 20.0;
    /// Speed multiplier added per level above 1
    pub const LEVEL_SPEED_STEP: f32 = 0.3;

    /// Score values
    pub const NORMAL_POINTS: u64 = 10;
    pub const HEAVY_POINTS: u64 = 50;

    /// Intermission between levels (ms)
    pub const LEVEL_TRANSITION_MS: f32 = 3000.0;

    /// Player name limit (characters)
    pub const MAX_NAME_LEN: usize = 10;
}
