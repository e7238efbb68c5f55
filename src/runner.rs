//! Host-facing runner
//!
//! Wraps [`GameState`] with the two inbound calls a presentation layer is
//! allowed to make (jump and reset), forwards tick events to an observer, and
//! hands out snapshots for rendering.

use std::time::Duration;

use crate::daycycle::{DayCycle, SkySample};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::snapshot::Snapshot;
use crate::tuning::{Tuning, TuningError, Viewport};

/// Receives run events (balance changes, run over, resets)
///
/// Hosts use this for HUD updates and best-balance persistence; the core
/// never reads anything back from it.
pub trait RunObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// No observer
impl RunObserver for () {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// A run plus its pending input and observer
pub struct Runner<O: RunObserver = ()> {
    state: GameState,
    cycle: DayCycle,
    /// Depth-1 jump queue, consumed by the next tick
    pending_jump: bool,
    observer: O,
}

impl Runner {
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Result<Self, TuningError> {
        Self::with_observer(tuning, viewport, seed, ())
    }
}

impl<O: RunObserver> Runner<O> {
    pub fn with_observer(
        tuning: Tuning,
        viewport: Viewport,
        seed: u64,
        observer: O,
    ) -> Result<Self, TuningError> {
        let cycle = DayCycle::new(tuning.scenes.clone(), tuning.scene_duration_ms)?;
        let state = GameState::new(tuning, viewport, seed)?;
        log::info!(
            "Run started: seed {}, viewport {}x{}",
            seed,
            viewport.width,
            viewport.height
        );
        Ok(Self {
            state,
            cycle,
            pending_jump: false,
            observer,
        })
    }

    /// Queue a jump for the next tick
    ///
    /// Returns false when the request was dropped: the run is over, the
    /// character is already airborne, or a jump is already queued.
    pub fn request_jump(&mut self) -> bool {
        if self.state.run.terminal || self.state.character.is_airborne() || self.pending_jump {
            return false;
        }
        self.pending_jump = true;
        true
    }

    /// Start a new run immediately, from any state
    pub fn request_reset(&mut self) {
        self.state.reset();
        self.pending_jump = false;
        log::info!("Run reset");
        self.observer.on_event(&GameEvent::Reset);
    }

    /// Advance one frame and report what happened to the observer
    pub fn tick(&mut self) {
        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
        };
        tick(&mut self.state, &input);
        for event in &self.state.events {
            self.observer.on_event(event);
        }
    }

    /// Adapt the layout to a new viewport without restarting the run
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), TuningError> {
        self.state.resize(viewport)?;
        log::info!("Resized to {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    /// Sky for `elapsed` wall-clock time since the run started
    pub fn sky(&self, elapsed: Duration) -> SkySample {
        self.cycle.sample(elapsed, &self.state.viewport)
    }

    pub fn snapshot(&self, elapsed: Duration) -> Snapshot {
        Snapshot::capture(&self.state, self.sky(elapsed))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Events from the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn balance(&self) -> i64 {
        self.state.run.balance
    }

    pub fn is_over(&self) -> bool {
        self.state.run.terminal
    }

    pub fn has_pending_jump(&self) -> bool {
        self.pending_jump
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}
