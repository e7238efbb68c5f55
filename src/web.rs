//! Browser bindings
//!
//! A page drives the run from `requestAnimationFrame`: call `tick()` once per
//! frame, then draw from `snapshot_json()`. Input handlers only ever call
//! `request_jump()` and `request_reset()`.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::highscores::HighBank;
use crate::runner::Runner;
use crate::tuning::{Tuning, Viewport};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Bank Runner wasm module loaded");
}

#[wasm_bindgen]
pub struct WebRunner {
    runner: Runner<HighBank>,
    /// `Date.now()` when the page created the runner; drives the sky
    started_at: f64,
}

#[wasm_bindgen]
impl WebRunner {
    /// Create a runner for a `width` x `height` canvas (CSS pixels)
    ///
    /// `tuning_json` optionally overrides gameplay constants.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        seed: u64,
        tuning_json: Option<String>,
    ) -> Result<WebRunner, JsError> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json)?,
            None => Tuning::default(),
        };
        let viewport = Viewport::new(width, height)?;
        let runner = Runner::with_observer(tuning, viewport, seed, HighBank::load())?;
        Ok(Self {
            runner,
            started_at: js_sys::Date::now(),
        })
    }

    pub fn request_jump(&mut self) -> bool {
        self.runner.request_jump()
    }

    /// Start a new run. The sky keeps its clock, so it does not jump back to morning.
    pub fn request_reset(&mut self) {
        self.runner.request_reset();
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsError> {
        self.runner.resize(Viewport::new(width, height)?)?;
        Ok(())
    }

    pub fn tick(&mut self) {
        self.runner.tick();
    }

    /// Full frame state as JSON
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(self.runner.snapshot(self.elapsed()).to_json()?)
    }

    pub fn balance(&self) -> i64 {
        self.runner.balance()
    }

    pub fn is_over(&self) -> bool {
        self.runner.is_over()
    }

    pub fn high_bank(&self) -> i64 {
        self.runner.observer().best
    }
}

impl WebRunner {
    fn elapsed(&self) -> Duration {
        let ms = (js_sys::Date::now() - self.started_at).max(0.0);
        Duration::from_secs_f64(ms / 1000.0)
    }
}
