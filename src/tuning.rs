//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a host can override the
//! defaults from JSON without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::daycycle::{Scene, default_scenes};
use crate::sim::character::peak_lift;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{0} cadence must be at least one tick")]
    ZeroCadence(&'static str),
    #[error("speed ramp interval must be at least one tick")]
    ZeroRampInterval,
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("layer {index} has non-positive tile width {tile_width}")]
    InvalidTileWidth { index: usize, tile_width: f32 },
    #[error("layer {index} has invalid spec: {reason}")]
    InvalidLayer { index: usize, reason: &'static str },
    #[error("day-night cycle needs at least one scene")]
    NoScenes,
    #[error("scene duration must be positive")]
    ZeroSceneDuration,
    #[error("at least one obstacle variant is required")]
    NoObstacleVariants,
    #[error("jump impulse must be negative (upward), got {0}")]
    InvalidJumpImpulse(f32),
    #[error("gravity must be positive, got {0}")]
    InvalidGravity(f32),
    #[error("{field} must not be negative, got {value}")]
    NegativeSpeed { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    InvalidSize { field: &'static str, value: f32 },
    #[error("playfield height band {min}..{max} is empty or not positive")]
    InvalidFieldHeight { min: f32, max: f32 },
    #[error("obstacles are {height}px tall but a jump only lifts {lift}px")]
    ObstacleTooTall { height: f32, lift: f32 },
    #[error("coins float up to {lift}px above the head but a jump only lifts {peak}px")]
    CoinOutOfReach { lift: f32, peak: f32 },
    #[error("failed to parse tuning: {0}")]
    Json(#[from] serde_json::Error),
}

/// Visible play field size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 350.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, TuningError> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        // NaN fails both comparisons
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(TuningError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// One parallax stripe, described relative to the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Scroll speed relative to the base speed
    pub multiplier: f32,
    /// Stripe height as a fraction of viewport height
    pub height_fraction: f32,
    /// Tile width = viewport width / divisor
    pub tile_divisor: f32,
    /// Gap between the stripe bottom and the viewport bottom
    pub baseline_offset: f32,
}

impl LayerSpec {
    pub fn tile_width(&self, viewport: &Viewport) -> f32 {
        (viewport.width / self.tile_divisor).round()
    }

    pub fn height(&self, viewport: &Viewport) -> f32 {
        (viewport.height * self.height_fraction).round()
    }
}

/// Three building layers, slowest and shortest at the back
pub fn default_layers() -> Vec<LayerSpec> {
    (0..3)
        .map(|i| {
            let i = i as f32;
            LayerSpec {
                multiplier: 0.18 + i * 0.12,
                height_fraction: 0.18 + i * 0.05,
                tile_divisor: 2.0 + i,
                baseline_offset: 40.0 + i * 6.0,
            }
        })
        .collect()
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Economy ===
    pub starting_balance: i64,
    pub obstacle_penalty: i64,
    pub coin_reward: i64,

    // === Speed ===
    pub base_speed: f32,
    pub speed_ramp_interval: u64,
    pub speed_ramp_delta: f32,

    // === Spawning ===
    pub obstacle_cadence: u64,
    pub coin_cadence: u64,
    pub spawn_margin: f32,
    pub cull_margin: f32,
    pub obstacle_height_fraction: f32,
    pub obstacle_min_height: f32,
    pub obstacle_aspect: f32,
    pub obstacle_variants: u32,
    pub coin_size_fraction: f32,
    pub coin_lift_min: f32,
    pub coin_lift_span: f32,

    // === Character ===
    pub jump_impulse: f32,
    pub gravity: f32,
    pub ground_fraction: f32,
    pub character_size_fraction: f32,
    pub character_x_fraction: f32,
    /// Canvas heights outside this band are clamped into it
    pub min_field_height: f32,
    pub max_field_height: f32,

    // === Scenery ===
    pub layers: Vec<LayerSpec>,
    pub scenes: Vec<Scene>,
    pub scene_duration_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            obstacle_penalty: OBSTACLE_PENALTY,
            coin_reward: COIN_REWARD,

            base_speed: BASE_SPEED,
            speed_ramp_interval: SPEED_RAMP_INTERVAL,
            speed_ramp_delta: SPEED_RAMP_DELTA,

            obstacle_cadence: OBSTACLE_CADENCE,
            coin_cadence: COIN_CADENCE,
            spawn_margin: SPAWN_MARGIN,
            cull_margin: CULL_MARGIN,
            obstacle_height_fraction: OBSTACLE_HEIGHT_FRACTION,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_aspect: OBSTACLE_ASPECT,
            obstacle_variants: OBSTACLE_VARIANTS,
            coin_size_fraction: COIN_SIZE_FRACTION,
            coin_lift_min: COIN_LIFT_MIN,
            coin_lift_span: COIN_LIFT_SPAN,

            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            ground_fraction: GROUND_FRACTION,
            character_size_fraction: CHARACTER_SIZE_FRACTION,
            character_x_fraction: CHARACTER_X_FRACTION,
            min_field_height: MIN_FIELD_HEIGHT,
            max_field_height: MAX_FIELD_HEIGHT,

            layers: default_layers(),
            scenes: default_scenes(),
            scene_duration_ms: SCENE_DURATION_MS,
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from the JSON file named by `BANK_RUNNER_TUNING`, or use defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        let Ok(path) = std::env::var("BANK_RUNNER_TUNING") else {
            return Self::default();
        };
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning file '{}': {}, using defaults", path, e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from '{}'", path);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning in '{}': {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// The field actually simulated for a canvas: full width, height clamped
    /// into the playable band
    pub fn playfield(&self, viewport: &Viewport) -> Viewport {
        Viewport {
            width: viewport.width,
            height: viewport
                .height
                .clamp(self.min_field_height, self.max_field_height),
        }
    }

    /// Height of every obstacle on a field `field_height` tall
    pub fn obstacle_height(&self, field_height: f32) -> f32 {
        (field_height * self.obstacle_height_fraction)
            .round()
            .max(self.obstacle_min_height)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check everything the simulation assumes but never re-checks per tick
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.obstacle_cadence == 0 {
            return Err(TuningError::ZeroCadence("obstacle"));
        }
        if self.coin_cadence == 0 {
            return Err(TuningError::ZeroCadence("coin"));
        }
        if self.speed_ramp_interval == 0 {
            return Err(TuningError::ZeroRampInterval);
        }
        if self.obstacle_variants == 0 {
            return Err(TuningError::NoObstacleVariants);
        }
        if !(self.jump_impulse < 0.0) {
            return Err(TuningError::InvalidJumpImpulse(self.jump_impulse));
        }
        if !(self.gravity > 0.0) {
            return Err(TuningError::InvalidGravity(self.gravity));
        }
        for (field, value) in [
            ("base_speed", self.base_speed),
            ("speed_ramp_delta", self.speed_ramp_delta),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::NegativeSpeed { field, value });
            }
        }
        for (field, value) in [
            ("obstacle_height_fraction", self.obstacle_height_fraction),
            ("obstacle_aspect", self.obstacle_aspect),
            ("coin_size_fraction", self.coin_size_fraction),
            ("coin_lift_min", self.coin_lift_min),
            ("character_size_fraction", self.character_size_fraction),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::InvalidSize { field, value });
            }
        }
        for (field, value) in [
            ("obstacle_min_height", self.obstacle_min_height),
            ("coin_lift_span", self.coin_lift_span),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::InvalidSize { field, value });
            }
        }
        if !(self.min_field_height > 0.0 && self.max_field_height >= self.min_field_height) {
            return Err(TuningError::InvalidFieldHeight {
                min: self.min_field_height,
                max: self.max_field_height,
            });
        }
        let peak = peak_lift(self.jump_impulse, self.gravity);
        let lift = self.coin_lift_min + self.coin_lift_span;
        if lift >= peak {
            return Err(TuningError::CoinOutOfReach { lift, peak });
        }
        // Obstacles are tallest on the tallest field
        let tallest = self.obstacle_height(self.max_field_height);
        if tallest >= peak {
            return Err(TuningError::ObstacleTooTall {
                height: tallest,
                lift: peak,
            });
        }
        if self.scenes.is_empty() {
            return Err(TuningError::NoScenes);
        }
        if self.scene_duration_ms == 0 {
            return Err(TuningError::ZeroSceneDuration);
        }
        for (index, layer) in self.layers.iter().enumerate() {
            if !(layer.tile_divisor > 0.0) {
                return Err(TuningError::InvalidLayer {
                    index,
                    reason: "tile divisor must be positive",
                });
            }
            if !(layer.multiplier >= 0.0) {
                return Err(TuningError::InvalidLayer {
                    index,
                    reason: "multiplier must not be negative",
                });
            }
        }
        Ok(())
    }

    /// Validate the parts that depend on the canvas size (tile widths round to pixels)
    pub fn validate_for(&self, viewport: &Viewport) -> Result<(), TuningError> {
        viewport.validate()?;
        self.validate()?;
        let field = self.playfield(viewport);
        for (index, layer) in self.layers.iter().enumerate() {
            let tile_width = layer.tile_width(&field);
            if !(tile_width > 0.0) {
                return Err(TuningError::InvalidTileWidth { index, tile_width });
            }
        }
        Ok(())
    }
}
