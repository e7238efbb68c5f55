//! Best bank balance across runs
//!
//! Persisted to LocalStorage. Lives outside the simulation: it only listens to
//! run events and never feeds anything back into a run.

use serde::{Deserialize, Serialize};

use crate::runner::RunObserver;
use crate::sim::GameEvent;

/// Best balance record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighBank {
    /// Highest peak balance of any finished run
    pub best: i64,
    /// Peak balance of the most recently finished run
    #[serde(default)]
    pub last: Option<i64>,
    /// Finished runs
    #[serde(default)]
    pub runs: u32,
}

impl HighBank {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bank_runner_high_bank";

    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a balance beats the stored best
    pub fn qualifies(&self, balance: i64) -> bool {
        balance > self.best
    }

    /// Record a finished run. Returns true on a new best.
    pub fn record(&mut self, balance: i64) -> bool {
        self.last = Some(balance);
        self.runs += 1;
        if !self.qualifies(balance) {
            return false;
        }
        log::info!("New high bank: {} (was {})", balance, self.best);
        self.best = balance;
        true
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(high) = serde_json::from_str::<HighBank>(&json) {
                    log::info!("Loaded high bank {}", high.best);
                    return high;
                }
            }
        }

        log::info!("No high bank found, starting fresh");
        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High bank saved ({})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

impl RunObserver for HighBank {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::RunOver { peak_balance, .. } = event {
            // The final balance is always zero; the peak is what the player earned
            if self.record(*peak_balance) {
                self.save();
            }
        }
    }
}
