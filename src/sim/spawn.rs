//! Cadence-driven obstacle and coin spawning
//!
//! Spawning is stateless: whether something appears this tick depends only on
//! the tick counter and the cadence. Randomness comes from the run's seeded
//! RNG so runs replay exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Layout, Obstacle};
use crate::consts::COIN_FALLBACK_SIZE;
use crate::tuning::{Tuning, Viewport};

/// Entities created on one tick
#[derive(Debug, Default)]
pub struct Spawns {
    pub obstacle: Option<Obstacle>,
    pub coin: Option<Coin>,
}

/// True when `tick` lands on the cadence
#[inline]
pub fn is_due(tick: u64, cadence: u64) -> bool {
    tick % cadence == 0
}

/// Run both cadence checks for `tick`
pub fn run_cadence<R: Rng>(
    tick: u64,
    tuning: &Tuning,
    viewport: &Viewport,
    layout: &Layout,
    rng: &mut R,
) -> Spawns {
    let obstacle = is_due(tick, tuning.obstacle_cadence)
        .then(|| spawn_obstacle(tuning, viewport, layout, rng));
    let coin = is_due(tick, tuning.coin_cadence).then(|| spawn_coin(tuning, viewport, layout, rng));
    Spawns { obstacle, coin }
}

/// Obstacle resting on the ground just past the right edge
pub fn spawn_obstacle<R: Rng>(
    tuning: &Tuning,
    viewport: &Viewport,
    layout: &Layout,
    rng: &mut R,
) -> Obstacle {
    let height = tuning.obstacle_height(viewport.height);
    let width = (height * tuning.obstacle_aspect).round();
    Obstacle {
        pos: Vec2::new(viewport.width + tuning.spawn_margin, layout.foot_y() - height),
        size: Vec2::new(width, height),
        variant: rng.random_range(0..tuning.obstacle_variants),
    }
}

/// Coin floating in a band above a standing character's head
///
/// The band is measured from the coin's bottom edge, so a coin never touches
/// a character that stays on the ground.
pub fn spawn_coin<R: Rng>(
    tuning: &Tuning,
    viewport: &Viewport,
    layout: &Layout,
    rng: &mut R,
) -> Coin {
    let mut size = (viewport.height * tuning.coin_size_fraction).round();
    if size <= 0.0 {
        size = COIN_FALLBACK_SIZE;
    }
    let lift = tuning.coin_lift_min + rng.random::<f32>() * tuning.coin_lift_span;
    Coin {
        pos: Vec2::new(
            viewport.width + tuning.spawn_margin,
            layout.ground_y - lift - size,
        ),
        size: Vec2::splat(size),
        value: tuning.coin_reward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::character::peak_lift;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Tuning, Viewport, Layout) {
        let tuning = Tuning::default();
        let viewport = Viewport {
            width: 800.0,
            height: 350.0,
        };
        let layout = Layout::new(&tuning, &viewport);
        (tuning, viewport, layout)
    }

    #[test]
    fn test_cadence_is_modulo_tick() {
        assert!(!is_due(1, 90));
        assert!(!is_due(89, 90));
        assert!(is_due(90, 90));
        assert!(is_due(180, 90));
        assert!(is_due(7, 1));
    }

    #[test]
    fn test_independent_cadences() {
        let (tuning, viewport, layout) = setup();
        let mut rng = Pcg32::seed_from_u64(1);

        let s = run_cadence(90, &tuning, &viewport, &layout, &mut rng);
        assert!(s.obstacle.is_some() && s.coin.is_none());

        let s = run_cadence(160, &tuning, &viewport, &layout, &mut rng);
        assert!(s.obstacle.is_none() && s.coin.is_some());

        // lcm(90, 160)
        let s = run_cadence(1440, &tuning, &viewport, &layout, &mut rng);
        assert!(s.obstacle.is_some() && s.coin.is_some());

        let s = run_cadence(91, &tuning, &viewport, &layout, &mut rng);
        assert!(s.obstacle.is_none() && s.coin.is_none());
    }

    #[test]
    fn test_obstacle_sits_on_ground() {
        let (tuning, viewport, layout) = setup();
        let mut rng = Pcg32::seed_from_u64(2);
        let o = spawn_obstacle(&tuning, &viewport, &layout, &mut rng);

        assert_eq!(o.pos.x, 820.0);
        // round(350 * 0.12), then 0.6 of that
        assert_eq!(o.size, Vec2::new(25.0, 42.0));
        assert_eq!(o.rect().bottom(), layout.foot_y());
        assert!(o.variant < tuning.obstacle_variants);
    }

    #[test]
    fn test_obstacle_stays_below_jump_height() {
        let (tuning, viewport, layout) = setup();
        let mut rng = Pcg32::seed_from_u64(3);
        let o = spawn_obstacle(&tuning, &viewport, &layout, &mut rng);
        assert!(peak_lift(tuning.jump_impulse, tuning.gravity) > o.size.y);
    }

    #[test]
    fn test_small_viewport_uses_minimum_obstacle_height() {
        let tuning = Tuning::default();
        let viewport = Viewport {
            width: 300.0,
            height: 100.0,
        };
        let layout = Layout::new(&tuning, &viewport);
        let mut rng = Pcg32::seed_from_u64(4);
        let o = spawn_obstacle(&tuning, &viewport, &layout, &mut rng);
        assert_eq!(o.size.y, tuning.obstacle_min_height);
    }

    #[test]
    fn test_coin_floats_above_standing_character() {
        let (tuning, viewport, layout) = setup();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let c = spawn_coin(&tuning, &viewport, &layout, &mut rng);
            assert_eq!(c.value, tuning.coin_reward);
            assert_eq!(c.size, Vec2::splat(56.0));
            let lift = layout.ground_y - c.rect().bottom();
            assert!((20.0..=80.0).contains(&lift));
            // Never reachable without jumping, always reachable with one
            assert!(c.rect().bottom() < layout.ground_y);
            assert!(lift < peak_lift(tuning.jump_impulse, tuning.gravity));
        }
    }

    #[test]
    fn test_variants_cover_the_set() {
        let (tuning, viewport, layout) = setup();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let o = spawn_obstacle(&tuning, &viewport, &layout, &mut rng);
            seen[o.variant as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
