//! Bank Runner - A side-scrolling runner with a bank-balance economy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, spawning, physics, economy)
//! - `daycycle`: Wall-clock driven day-night sky sampling
//! - `tuning`: Data-driven game balance
//! - `runner`: Host-facing facade (jump/reset requests, snapshots, observers)
//! - `highscores`: Best-balance tracking for the presentation layer

pub mod daycycle;
pub mod highscores;
pub mod runner;
pub mod sim;
pub mod snapshot;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use daycycle::{Rgb, Scene, SkySample};
pub use highscores::HighBank;
pub use runner::{RunObserver, Runner};
pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError, Viewport};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Balance at the start of every run
    pub const STARTING_BALANCE: i64 = 100;
    /// Balance lost per obstacle hit
    pub const OBSTACLE_PENALTY: i64 = 25;
    /// Balance gained per coin
    pub const COIN_REWARD: i64 = 10;

    /// Scroll speed at run start (pixels per tick)
    pub const BASE_SPEED: f32 = 6.0;
    /// Ticks between speed increments
    pub const SPEED_RAMP_INTERVAL: u64 = 1000;
    /// Speed added at every ramp step
    pub const SPEED_RAMP_DELTA: f32 = 0.15;

    /// Spawn cadences (ticks)
    pub const OBSTACLE_CADENCE: u64 = 90;
    pub const COIN_CADENCE: u64 = 160;

    /// Entities spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Off-screen slack on the left before entities are pruned and tiles recycled
    pub const CULL_MARGIN: f32 = 50.0;

    /// Obstacle sizing
    pub const OBSTACLE_HEIGHT_FRACTION: f32 = 0.12;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 28.0;
    pub const OBSTACLE_ASPECT: f32 = 0.6;
    pub const OBSTACLE_VARIANTS: u32 = 4;

    /// Coin sizing and placement
    pub const COIN_SIZE_FRACTION: f32 = 0.16;
    pub const COIN_FALLBACK_SIZE: f32 = 48.0;
    /// Gap between a standing character's head and a coin's bottom edge
    pub const COIN_LIFT_MIN: f32 = 20.0;
    pub const COIN_LIFT_SPAN: f32 = 60.0;

    /// Jump physics (pixels per tick, y grows downward)
    pub const JUMP_IMPULSE: f32 = -16.0;
    pub const GRAVITY: f32 = 1.2;

    /// Layout fractions of the viewport
    pub const GROUND_FRACTION: f32 = 0.28;
    pub const CHARACTER_SIZE_FRACTION: f32 = 0.18;
    pub const CHARACTER_X_FRACTION: f32 = 0.06;

    /// Playfield height band; taller or shorter canvases are clamped into it
    pub const MIN_FIELD_HEIGHT: f32 = 260.0;
    pub const MAX_FIELD_HEIGHT: f32 = 400.0;

    /// Wall-clock duration of one day-night scene
    pub const SCENE_DURATION_MS: u64 = 15_000;
}
