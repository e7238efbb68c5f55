//! Collision resolution and the bank balance
//!
//! Obstacles are always resolved before coins. A hit obstacle or collected coin
//! is removed immediately so it can never count twice.

use super::geometry::Rect;
use super::state::{Coin, GameEvent, Obstacle, RunState};

/// What happened during one resolution pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub obstacles_hit: u32,
    pub coins_collected: u32,
    /// This pass ended the run
    pub run_over: bool,
}

/// Apply every overlap with `character` to the balance
///
/// All overlapping obstacles are charged, in sequence order. If that drains
/// the balance the run ends, the balance is clamped to zero, and coins are
/// left untouched for this tick.
pub fn resolve(
    run: &mut RunState,
    character: &Rect,
    obstacles: &mut Vec<Obstacle>,
    coins: &mut Vec<Coin>,
    penalty: i64,
    events: &mut Vec<GameEvent>,
) -> Resolution {
    let mut result = Resolution::default();
    if run.terminal {
        return result;
    }

    obstacles.retain(|obstacle| {
        if !character.overlaps(&obstacle.rect()) {
            return true;
        }
        run.charge(penalty);
        result.obstacles_hit += 1;
        log::debug!("Obstacle hit at tick {}, balance {}", run.tick, run.balance);
        events.push(GameEvent::ObstacleHit {
            penalty,
            balance: run.balance,
        });
        false
    });

    if run.balance <= 0 {
        run.balance = 0;
        run.terminal = true;
        result.run_over = true;
        log::info!(
            "Run over at tick {} (peak balance {})",
            run.tick,
            run.peak_balance
        );
        events.push(GameEvent::RunOver {
            final_balance: run.balance,
            peak_balance: run.peak_balance,
        });
        return result;
    }

    coins.retain(|coin| {
        if !character.overlaps(&coin.rect()) {
            return true;
        }
        run.credit(coin.value);
        result.coins_collected += 1;
        log::debug!("Coin collected at tick {}, balance {}", run.tick, run.balance);
        events.push(GameEvent::CoinCollected {
            reward: coin.value,
            balance: run.balance,
        });
        false
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn character() -> Rect {
        Rect::new(50.0, 200.0, 60.0, 60.0)
    }

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, 220.0),
            size: Vec2::splat(40.0),
            variant: 0,
        }
    }

    fn coin_at(x: f32) -> Coin {
        Coin {
            pos: Vec2::new(x, 210.0),
            size: Vec2::splat(30.0),
            value: 10,
        }
    }

    fn run() -> RunState {
        RunState::new(&Tuning::default())
    }

    #[test]
    fn test_no_overlap_leaves_balance_alone() {
        let mut run = run();
        let mut obstacles = vec![obstacle_at(400.0)];
        let mut coins = vec![coin_at(500.0)];
        let mut events = Vec::new();
        let r = resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert_eq!(r, Resolution::default());
        assert_eq!(run.balance, 100);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(coins.len(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_single_hit_charges_penalty_once() {
        let mut run = run();
        let mut obstacles = vec![obstacle_at(400.0), obstacle_at(80.0), obstacle_at(600.0)];
        let mut coins = Vec::new();
        let mut events = Vec::new();
        let r = resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert_eq!(r.obstacles_hit, 1);
        assert_eq!(run.balance, 75);
        assert!(!run.terminal);
        // Survivors keep their order
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0].pos.x, 400.0);
        assert_eq!(obstacles[1].pos.x, 600.0);

        // Nothing left overlapping: a second pass is free
        resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert_eq!(run.balance, 75);
    }

    #[test]
    fn test_multiple_hits_in_one_tick() {
        let mut run = run();
        let mut obstacles = vec![obstacle_at(60.0), obstacle_at(90.0)];
        let mut coins = Vec::new();
        let mut events = Vec::new();
        let r = resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert_eq!(r.obstacles_hit, 2);
        assert_eq!(run.balance, 50);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_two_coins_same_tick() {
        let mut run = run();
        let mut obstacles = Vec::new();
        let mut coins = vec![coin_at(60.0), coin_at(70.0)];
        let mut events = Vec::new();
        let r = resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert_eq!(r.coins_collected, 2);
        assert_eq!(run.balance, 120);
        assert_eq!(run.peak_balance, 120);
        assert!(coins.is_empty());
        assert_eq!(
            events,
            vec![
                GameEvent::CoinCollected {
                    reward: 10,
                    balance: 110
                },
                GameEvent::CoinCollected {
                    reward: 10,
                    balance: 120
                },
            ]
        );
    }

    #[test]
    fn test_draining_hit_ends_run_and_skips_coins() {
        let mut run = run();
        run.balance = 25;
        let mut obstacles = vec![obstacle_at(60.0)];
        let mut coins = vec![coin_at(60.0)];
        let mut events = Vec::new();
        let r = resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert!(r.run_over);
        assert!(run.terminal);
        assert_eq!(run.balance, 0);
        assert_eq!(r.coins_collected, 0);
        assert_eq!(coins.len(), 1);
        assert!(matches!(
            events.last(),
            Some(GameEvent::RunOver {
                final_balance: 0,
                peak_balance: 100
            })
        ));
    }

    #[test]
    fn test_overdraft_clamps_to_zero() {
        let mut run = run();
        run.balance = 10;
        let mut obstacles = vec![obstacle_at(60.0), obstacle_at(70.0)];
        let mut coins = Vec::new();
        let mut events = Vec::new();
        resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert_eq!(run.balance, 0);
        assert!(run.terminal);
        // Both obstacles were charged and removed before the run ended
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_terminal_run_is_frozen() {
        let mut run = run();
        run.terminal = true;
        let mut obstacles = vec![obstacle_at(60.0)];
        let mut coins = vec![coin_at(60.0)];
        let mut events = Vec::new();
        let r = resolve(&mut run, &character(), &mut obstacles, &mut coins, 25, &mut events);
        assert_eq!(r, Resolution::default());
        assert_eq!(obstacles.len(), 1);
        assert_eq!(coins.len(), 1);
        assert_eq!(run.balance, 100);
    }
}
