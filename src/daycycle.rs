//! Day-night sky cycle
//!
//! The sky is sampled from elapsed wall-clock time rather than tick count, so
//! it keeps drifting while a run is over or the host stops ticking. Sampling
//! is pure: the same elapsed time always yields the same sky.

use std::f32::consts::TAU;
use std::fmt;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::{TuningError, Viewport};

/// Rejected `#rrggbb` color string
#[derive(Debug, Error)]
#[error("invalid hex color '{0}', expected #rrggbb")]
pub struct ColorParseError(String);

/// An 8-bit RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ColorParseError(hex.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ColorParseError(hex.to_string()))?;
        Ok(Self::new(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ))
    }

    /// Per-channel linear blend, rounded to the nearest integer
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let channel = |a: u8, b: u8| -> u8 {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// A named lighting preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    /// Sky gradient top
    pub top: Rgb,
    /// Sky gradient bottom
    pub bottom: Rgb,
    /// Sun (or moon) color
    pub sun: Rgb,
}

impl Scene {
    pub fn new(name: &str, top: Rgb, bottom: Rgb, sun: Rgb) -> Self {
        Self {
            name: name.to_string(),
            top,
            bottom,
            sun,
        }
    }
}

/// Morning, day, evening, night
pub fn default_scenes() -> Vec<Scene> {
    vec![
        Scene::new(
            "morning",
            Rgb::new(0xa8, 0xd0, 0xff),
            Rgb::new(0xea, 0xf6, 0xff),
            Rgb::new(0xff, 0xd1, 0x66),
        ),
        Scene::new(
            "day",
            Rgb::new(0x87, 0xce, 0xeb),
            Rgb::new(0xbf, 0xef, 0xff),
            Rgb::new(0xff, 0xf5, 0x9d),
        ),
        Scene::new(
            "evening",
            Rgb::new(0xff, 0xcf, 0x9b),
            Rgb::new(0xff, 0x9a, 0xa2),
            Rgb::new(0xff, 0xd1, 0x66),
        ),
        Scene::new(
            "night",
            Rgb::new(0x0b, 0x24, 0x47),
            Rgb::new(0x07, 0x11, 0x33),
            Rgb::new(0xf5, 0xf3, 0xce),
        ),
    ]
}

/// Sky state for one rendered frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkySample {
    /// Index of the scene being blended from
    pub scene: usize,
    /// Index of the scene being blended toward
    pub next_scene: usize,
    /// Blend factor in [0, 1)
    pub blend: f32,
    pub top: Rgb,
    pub bottom: Rgb,
    pub sun_color: Rgb,
    /// Sun center in viewport pixels
    pub sun_pos: Vec2,
    pub sun_radius: f32,
}

/// Looping sequence of scenes, each held for a fixed duration
#[derive(Debug, Clone)]
pub struct DayCycle {
    scenes: Vec<Scene>,
    scene_duration_ms: u64,
}

impl DayCycle {
    pub fn new(scenes: Vec<Scene>, scene_duration_ms: u64) -> Result<Self, TuningError> {
        if scenes.is_empty() {
            return Err(TuningError::NoScenes);
        }
        if scene_duration_ms == 0 {
            return Err(TuningError::ZeroSceneDuration);
        }
        Ok(Self {
            scenes,
            scene_duration_ms,
        })
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Length of one full day in milliseconds
    pub fn cycle_ms(&self) -> u64 {
        self.scene_duration_ms * self.scenes.len() as u64
    }

    /// Sample the sky `elapsed` after the run started
    pub fn sample(&self, elapsed: Duration, viewport: &Viewport) -> SkySample {
        let count = self.scenes.len();
        let total = self.cycle_ms() as f64;
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

        // Fraction of the full cycle, then position in scene units
        let cycle_t = (elapsed_ms % total) / total;
        let pos = cycle_t * count as f64;
        let index = (pos.floor() as usize) % count;
        let next = (index + 1) % count;
        let blend = (pos - pos.floor()) as f32;

        let from = &self.scenes[index];
        let to = &self.scenes[next];

        let cycle_t = cycle_t as f32;
        let sun_x = (viewport.width * cycle_t).round();
        let sun_y = (viewport.height * 0.18 + (cycle_t * TAU).sin() * viewport.height * 0.06).round();

        SkySample {
            scene: index,
            next_scene: next,
            blend,
            top: from.top.lerp(to.top, blend),
            bottom: from.bottom.lerp(to.bottom, blend),
            sun_color: from.sun.lerp(to.sun, blend),
            sun_pos: Vec2::new(sun_x, sun_y),
            sun_radius: (viewport.height * 0.06).max(10.0),
        }
    }
}
