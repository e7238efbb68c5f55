//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod character;
pub mod economy;
pub mod geometry;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use character::{Character, CharacterState};
pub use economy::{Resolution, resolve};
pub use geometry::{Rect, overlaps};
pub use scroll::{Layer, Tile};
pub use spawn::{Spawns, run_cadence};
pub use state::{Coin, GameEvent, GameState, Layout, Obstacle, RunState};
pub use tick::{TickInput, tick};
