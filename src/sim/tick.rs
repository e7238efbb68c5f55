//! Fixed-step simulation tick
//!
//! Core game loop that advances the run deterministically. One call is one
//! rendered frame.

use super::economy;
use super::spawn;
use super::state::{GameEvent, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// A pending jump request, consumed by this tick's physics step
    pub jump: bool,
}

/// Advance the game state by one tick
///
/// Order: tick counter, speed ramp, spawn cadence, entity scroll and cull,
/// parallax layers, character physics, collisions. Once the run is over every
/// call is a no-op until the state is reset.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if state.run.terminal {
        return;
    }

    let tuning = &state.tuning;
    let run = &mut state.run;

    run.tick += 1;

    // Speed ramp
    if run.tick % tuning.speed_ramp_interval == 0 {
        run.speed += tuning.speed_ramp_delta;
        log::info!("Speed up to {:.2} at tick {}", run.speed, run.tick);
        state.events.push(GameEvent::SpeedIncreased { speed: run.speed });
    }

    // New entities join after the scroll step, so they first move next tick
    let spawns = spawn::run_cadence(
        run.tick,
        tuning,
        &state.viewport,
        &state.layout,
        &mut state.rng,
    );

    // Scroll and cull
    let speed = run.speed;
    let cull = -tuning.cull_margin;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    state.obstacles.retain(|o| o.rect().right() > cull);
    for coin in &mut state.coins {
        coin.pos.x -= speed;
    }
    state.coins.retain(|c| c.rect().right() > cull);

    if let Some(obstacle) = spawns.obstacle {
        log::debug!("Spawned obstacle variant {} at tick {}", obstacle.variant, run.tick);
        state.events.push(GameEvent::ObstacleSpawned {
            variant: obstacle.variant,
        });
        state.obstacles.push(obstacle);
    }
    if let Some(coin) = spawns.coin {
        log::debug!("Spawned coin at tick {}", run.tick);
        state.events.push(GameEvent::CoinSpawned);
        state.coins.push(coin);
    }

    // Parallax
    for layer in &mut state.layers {
        layer.advance(speed, tuning.cull_margin);
    }

    // Character physics
    let character = &mut state.character;
    if input.jump && character.try_jump(tuning.jump_impulse) {
        state.events.push(GameEvent::Jumped);
    }
    if character.integrate(tuning.gravity, state.layout.ground_y) {
        state.events.push(GameEvent::Landed);
    }

    // Collisions and balance
    economy::resolve(
        run,
        &character.rect(),
        &mut state.obstacles,
        &mut state.coins,
        tuning.obstacle_penalty,
        &mut state.events,
    );
}
