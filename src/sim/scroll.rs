//! Parallax background layers
//!
//! Each layer is a row of equal-width tiles. Tiles slide left every tick and
//! the leftmost one is moved to the back of the row once it is fully past the
//! recycle threshold, so a fixed set of tiles scrolls forever.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::{LayerSpec, Tuning, Viewport};

/// One repeating background unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Vec2,
}

/// A parallax stripe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Position in the back-to-front layer list
    pub id: usize,
    /// Scroll speed relative to the base speed
    pub multiplier: f32,
    pub tile_width: f32,
    pub height: f32,
    /// Left to right
    pub tiles: VecDeque<Tile>,
}

impl Layer {
    /// Lay out `count` contiguous tiles starting at `start_x`
    ///
    /// # Panics
    ///
    /// Panics if `tile_width` is not positive; recycling would never terminate.
    pub fn new(
        id: usize,
        multiplier: f32,
        tile_width: f32,
        height: f32,
        y: f32,
        start_x: f32,
        count: usize,
    ) -> Self {
        assert!(tile_width > 0.0, "tile width must be positive, got {tile_width}");
        let tiles = (0..count)
            .map(|i| Tile {
                pos: Vec2::new(start_x + i as f32 * tile_width, y),
            })
            .collect();
        Self {
            id,
            multiplier,
            tile_width,
            height,
            tiles,
        }
    }

    /// Build a layer whose tiles span the viewport plus `margin` on each side
    pub fn from_spec(id: usize, spec: &LayerSpec, viewport: &Viewport, margin: f32) -> Self {
        let tile_width = spec.tile_width(viewport);
        let height = spec.height(viewport);
        let y = viewport.height - height - spec.baseline_offset;
        // One spare tile covers the recycle slack, one covers the tick's shift
        let count = ((viewport.width + 2.0 * margin) / tile_width).ceil() as usize + 2;
        Self::new(id, spec.multiplier, tile_width, height, y, -margin, count)
    }

    /// All layers from the tuning, back to front
    pub fn build_all(tuning: &Tuning, viewport: &Viewport) -> Vec<Layer> {
        tuning
            .layers
            .iter()
            .enumerate()
            .map(|(id, spec)| Layer::from_spec(id, spec, viewport, tuning.cull_margin))
            .collect()
    }

    /// Total width of the tile row
    pub fn span(&self) -> f32 {
        self.tile_width * self.tiles.len() as f32
    }

    /// Slide tiles left by `base_speed * multiplier` and recycle the ones
    /// whose right edge fell past `-margin`. Returns the number recycled.
    pub fn advance(&mut self, base_speed: f32, margin: f32) -> usize {
        let shift = base_speed * self.multiplier;
        for tile in &mut self.tiles {
            tile.pos.x -= shift;
        }

        // A huge shift can push the whole row off-screen; jump it forward by
        // whole spans first so the loop below stays bounded.
        if let Some(last) = self.tiles.back() {
            let right = last.pos.x + self.tile_width;
            if right < -margin {
                let span = self.span();
                let spans = ((-margin - right) / span).floor() + 1.0;
                for tile in &mut self.tiles {
                    tile.pos.x += spans * span;
                }
            }
        }

        let mut recycled = 0;
        while let Some(front) = self.tiles.front() {
            if front.pos.x + self.tile_width >= -margin {
                break;
            }
            let last_x = self.tiles.back().map_or(front.pos.x, |t| t.pos.x);
            if let Some(mut tile) = self.tiles.pop_front() {
                tile.pos.x = last_x + self.tile_width;
                self.tiles.push_back(tile);
                recycled += 1;
            }
        }
        recycled
    }

    pub fn tile_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.tiles
            .iter()
            .map(|t| Rect::new(t.pos.x, t.pos.y, self.tile_width, self.height))
    }

    /// True if the tiles cover `[left, right]` without gaps larger than `tolerance`
    pub fn covers(&self, left: f32, right: f32, tolerance: f32) -> bool {
        let Some(first) = self.tiles.front() else {
            return false;
        };
        if first.pos.x > left + tolerance {
            return false;
        }
        let mut reach = first.pos.x + self.tile_width;
        for tile in self.tiles.iter().skip(1) {
            if tile.pos.x > reach + tolerance {
                return false;
            }
            reach = reach.max(tile.pos.x + self.tile_width);
        }
        reach + tolerance >= right
    }
}
