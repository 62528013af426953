//! Game simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform code:
//! - Per-tick movement (not scaled by frame time)
//! - Stable scan order for collisions
//! - Owned `GameWorld`, no global state

pub mod entities;
pub mod formation;
pub mod input;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use entities::{Alien, AlienKind, Bullet, HitOutcome, Player};
pub use formation::Formation;
pub use input::{Controls, EdgeTrigger, InputEvent, KeyPress, TickInput};
pub use physics::StepOutcome;
pub use rect::Rect;
pub use state::{GameEvent, GameMode, GameWorld, Session};
pub use tick::tick;
