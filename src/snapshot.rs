//! Read-only view of a run for the presentation layer
//!
//! A snapshot is everything a renderer or HUD needs for one frame. It owns its
//! data, so hosts can keep it around or serialize it across an FFI boundary.

use serde::Serialize;

use crate::daycycle::SkySample;
use crate::sim::{CharacterState, GameState, Rect};
use crate::tuning::Viewport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterView {
    pub rect: Rect,
    pub state: CharacterState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub rect: Rect,
    pub variant: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinView {
    pub rect: Rect,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerView {
    /// Source layer, back (0) to front
    pub id: usize,
    pub multiplier: f32,
    /// Left to right
    pub tiles: Vec<Rect>,
}

/// One frame's worth of state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub balance: i64,
    pub peak_balance: i64,
    pub terminal: bool,
    pub tick: u64,
    pub speed: f32,
    /// Simulated field; hosts letterbox it when the canvas is taller or shorter
    pub viewport: Viewport,
    pub ground_y: f32,
    pub character: CharacterView,
    pub obstacles: Vec<ObstacleView>,
    pub coins: Vec<CoinView>,
    pub layers: Vec<LayerView>,
    pub sky: SkySample,
}

impl Snapshot {
    pub fn capture(state: &GameState, sky: SkySample) -> Self {
        Self {
            balance: state.run.balance,
            peak_balance: state.run.peak_balance,
            terminal: state.run.terminal,
            tick: state.run.tick,
            speed: state.run.speed,
            viewport: state.viewport,
            ground_y: state.layout.ground_y,
            character: CharacterView {
                rect: state.character.rect(),
                state: state.character.state,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    rect: o.rect(),
                    variant: o.variant,
                })
                .collect(),
            coins: state
                .coins
                .iter()
                .map(|c| CoinView {
                    rect: c.rect(),
                    value: c.value,
                })
                .collect(),
            layers: state
                .layers
                .iter()
                .map(|l| LayerView {
                    id: l.id,
                    multiplier: l.multiplier,
                    tiles: l.tile_rects().collect(),
                })
                .collect(),
            sky,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
