//! Runner character and its vertical jump state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::Layout;

/// Vertical movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterState {
    /// Resting on the ground line, can jump
    #[default]
    Grounded,
    /// In the air, integrating gravity until landing
    Airborne,
}

/// The player-controlled runner
///
/// `pos` is the top-left corner; the ground line is the resting value of
/// `pos.y`, so larger `y` means lower on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in pixels per tick (negative is upward)
    pub vel_y: f32,
    pub state: CharacterState,
}

impl Character {
    /// A grounded character placed by `layout`
    pub fn new(layout: &Layout) -> Self {
        Self {
            pos: Vec2::new(layout.character_x, layout.ground_y),
            size: Vec2::splat(layout.character_size),
            vel_y: 0.0,
            state: CharacterState::Grounded,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.state == CharacterState::Airborne
    }

    /// Start a jump if grounded. Returns false when already in the air.
    pub fn try_jump(&mut self, impulse: f32) -> bool {
        if self.is_airborne() {
            return false;
        }
        self.state = CharacterState::Airborne;
        self.vel_y = impulse;
        true
    }

    /// Advance one tick of flight. Returns true on the tick the character lands.
    pub fn integrate(&mut self, gravity: f32, ground_y: f32) -> bool {
        if !self.is_airborne() {
            return false;
        }
        self.pos.y += self.vel_y;
        self.vel_y += gravity;
        if self.pos.y >= ground_y {
            self.land(ground_y);
            return true;
        }
        false
    }

    fn land(&mut self, ground_y: f32) {
        self.pos.y = ground_y;
        self.vel_y = 0.0;
        self.state = CharacterState::Grounded;
    }

    /// Re-seat after a viewport change, keeping any jump in progress
    pub fn relayout(&mut self, layout: &Layout) {
        self.pos.x = layout.character_x;
        self.size = Vec2::splat(layout.character_size);
        if !self.is_airborne() || self.pos.y >= layout.ground_y {
            self.land(layout.ground_y);
        }
    }
}

/// Lift after `ticks` steps of [`Character::integrate`] from a fresh jump
#[inline]
pub fn lift_after(impulse: f32, gravity: f32, ticks: u32) -> f32 {
    let n = ticks as f32;
    -impulse * n - gravity * n * (n - 1.0) / 2.0
}

/// Highest point of a jump above the ground line
pub fn peak_lift(impulse: f32, gravity: f32) -> f32 {
    // Velocity turns non-negative after about |impulse| / gravity steps
    let apex = (-impulse / gravity + 0.5).max(0.0);
    let below = lift_after(impulse, gravity, apex.floor() as u32);
    let above = lift_after(impulse, gravity, apex.ceil() as u32);
    below.max(above).max(0.0)
}
