//! Bank Runner entry point
//!
//! On the web the library's `WebRunner` is driven by the page. Natively this
//! runs a headless autopilot game and reports how far it got.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::Duration;

    use bank_runner::sim::GameState;
    use bank_runner::{HighBank, Runner, Tuning, Viewport};

    /// Ticks of warning the autopilot wants before an obstacle reaches it
    const LEAD_TICKS: f32 = 5.0;

    /// Jump when the nearest obstacle ahead is about to touch the character
    fn should_jump(state: &GameState) -> bool {
        let character = state.character.rect();
        let window = state.run.speed * LEAD_TICKS;
        state.obstacles.iter().any(|o| {
            let gap = o.rect().x - character.right();
            (0.0..=window).contains(&gap)
        })
    }

    pub fn run(seed: u64, max_ticks: u64) {
        let tuning = Tuning::load_or_default();
        let runner = Runner::with_observer(tuning, Viewport::default(), seed, HighBank::load());
        let mut runner = match runner {
            Ok(runner) => runner,
            Err(e) => {
                log::error!("Cannot start run: {}", e);
                return;
            }
        };

        let mut jumps = 0u32;
        while !runner.is_over() && runner.state().run.tick < max_ticks {
            if should_jump(runner.state()) && runner.request_jump() {
                jumps += 1;
            }
            runner.tick();
        }

        // 60 Hz frames
        let elapsed = Duration::from_secs_f64(runner.state().run.tick as f64 / 60.0);
        let snapshot = runner.snapshot(elapsed);
        let scene = &runner.state().tuning.scenes[snapshot.sky.scene].name;

        println!(
            "Seed {}: {} ticks, {} jumps, balance {} (peak {}), speed {:.2}, sky '{}'{}",
            seed,
            snapshot.tick,
            jumps,
            snapshot.balance,
            snapshot.peak_balance,
            snapshot.speed,
            scene,
            if snapshot.terminal { ", bankrupt" } else { "" }
        );
        let high = runner.observer();
        if high.runs > 0 {
            println!("High bank: {}", high.best);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bank Runner (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let max_ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(20_000);
    headless::run(seed, max_ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
