//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::geometry::Rect;
use super::scroll::Layer;
use crate::tuning::{Tuning, TuningError, Viewport};

/// Positions derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Resting `y` of the character's top edge
    pub ground_y: f32,
    /// Fixed column the character runs in
    pub character_x: f32,
    /// Character side length (square)
    pub character_size: f32,
}

impl Layout {
    pub fn new(tuning: &Tuning, viewport: &Viewport) -> Self {
        Self {
            ground_y: viewport.height - (viewport.height * tuning.ground_fraction).round(),
            character_x: (viewport.width * tuning.character_x_fraction).round(),
            character_size: (viewport.height * tuning.character_size_fraction).round(),
        }
    }

    /// `y` of the character's feet when standing, where obstacles rest
    #[inline]
    pub fn foot_y(&self) -> f32 {
        self.ground_y + self.character_size
    }
}

/// Something to jump over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Visual variant for the renderer (no gameplay effect)
    pub variant: u32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Something to jump into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    /// Balance added on pickup
    pub value: i64,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Per-run bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Bank balance; the run ends when it reaches zero
    pub balance: i64,
    /// Highest balance seen this run
    pub peak_balance: i64,
    /// Ticks since the run started
    pub tick: u64,
    /// Current scroll speed in pixels per tick (never decreases within a run)
    pub speed: f32,
    /// Run over, ticks are no-ops until reset
    pub terminal: bool,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            balance: tuning.starting_balance,
            peak_balance: tuning.starting_balance,
            tick: 0,
            speed: tuning.base_speed,
            terminal: false,
        }
    }

    pub fn charge(&mut self, penalty: i64) {
        self.balance -= penalty;
    }

    pub fn credit(&mut self, reward: i64) {
        self.balance += reward;
        self.peak_balance = self.peak_balance.max(self.balance);
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    ObstacleSpawned { variant: u32 },
    CoinSpawned,
    ObstacleHit { penalty: i64, balance: i64 },
    CoinCollected { reward: i64, balance: i64 },
    SpeedIncreased { speed: f32 },
    /// Emitted once, on the tick the balance runs out
    RunOver { final_balance: i64, peak_balance: i64 },
    Reset,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Simulated field: the canvas width, height clamped to the playable band
    pub viewport: Viewport,
    pub layout: Layout,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub run: RunState,
    pub character: Character,
    /// Spawn order
    pub obstacles: Vec<Obstacle>,
    /// Spawn order
    pub coins: Vec<Coin>,
    /// Back to front
    pub layers: Vec<Layer>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run. Fails on configuration the tick loop cannot honor.
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Result<Self, TuningError> {
        tuning.validate_for(&viewport)?;
        let viewport = tuning.playfield(&viewport);
        let layout = Layout::new(&tuning, &viewport);
        let layers = Layer::build_all(&tuning, &viewport);
        Ok(Self {
            run: RunState::new(&tuning),
            character: Character::new(&layout),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            obstacles: Vec::new(),
            coins: Vec::new(),
            layers,
            events: Vec::new(),
            layout,
            viewport,
            tuning,
        })
    }

    /// Start a new run with the same configuration and viewport
    ///
    /// The RNG keeps advancing so consecutive runs differ.
    pub fn reset(&mut self) {
        self.run = RunState::new(&self.tuning);
        self.character = Character::new(&self.layout);
        self.obstacles.clear();
        self.coins.clear();
        self.layers = Layer::build_all(&self.tuning, &self.viewport);
        self.events.clear();
    }

    /// Re-derive layout for a new viewport, keeping the run going
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), TuningError> {
        self.tuning.validate_for(&viewport)?;
        let viewport = self.tuning.playfield(&viewport);
        self.viewport = viewport;
        self.layout = Layout::new(&self.tuning, &viewport);
        self.character.relayout(&self.layout);
        self.layers = Layer::build_all(&self.tuning, &viewport);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_viewport() {
        let layout = Layout::new(
            &Tuning::default(),
            &Viewport {
                width: 800.0,
                height: 350.0,
            },
        );
        // 350 - round(98)
        assert_eq!(layout.ground_y, 252.0);
        assert_eq!(layout.character_x, 48.0);
        assert_eq!(layout.character_size, 63.0);
        assert_eq!(layout.foot_y(), 315.0);
    }

    #[test]
    fn test_new_state_is_fresh_run() {
        let state = GameState::new(Tuning::default(), Viewport::default(), 7).unwrap();
        assert_eq!(state.run.balance, 100);
        assert_eq!(state.run.tick, 0);
        assert!(!state.run.terminal);
        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(state.layers.len(), 3);
    }

    #[test]
    fn test_new_rejects_bad_viewport() {
        let result = GameState::new(
            Tuning::default(),
            Viewport {
                width: 0.0,
                height: 350.0,
            },
            1,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_credit_tracks_peak() {
        let mut run = RunState::new(&Tuning::default());
        run.credit(10);
        run.charge(25);
        assert_eq!(run.balance, 85);
        assert_eq!(run.peak_balance, 110);
    }

    #[test]
    fn test_tall_canvas_is_clamped_to_playfield() {
        let state = GameState::new(
            Tuning::default(),
            Viewport {
                width: 1200.0,
                height: 800.0,
            },
            7,
        )
        .unwrap();
        assert_eq!(state.viewport.width, 1200.0);
        assert_eq!(state.viewport.height, 400.0);
        // 400 - round(112), character round(72)
        assert_eq!(state.layout.ground_y, 288.0);
        assert_eq!(state.layout.character_size, 72.0);
    }

    #[test]
    fn test_resize_keeps_run_progress() {
        let mut state = GameState::new(Tuning::default(), Viewport::default(), 7).unwrap();
        state.run.tick = 500;
        state.run.balance = 40;
        state
            .resize(Viewport {
                width: 1000.0,
                height: 400.0,
            })
            .unwrap();
        assert_eq!(state.run.tick, 500);
        assert_eq!(state.run.balance, 40);
        assert_eq!(state.layout.ground_y, 400.0 - 112.0);
        assert_eq!(state.character.pos.y, state.layout.ground_y);
    }
}
