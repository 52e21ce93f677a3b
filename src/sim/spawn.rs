//! Bubble factory and population policy
//!
//! Spawning, trickle growth and time-to-live eviction of the live bubble set.

use glam::Vec2;
use rand::Rng;

use super::physics::advance;
use super::state::{Bubble, PlayArea, Rgba};
use crate::consts::*;

/// Create a bubble somewhere inside `[0, max_width) x [0, max_height)`
///
/// Overlap with existing bubbles is allowed.
pub fn create_bubble<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    max_width: f32,
    max_height: f32,
    now_ms: u64,
) -> Bubble {
    debug_assert!(max_width > 0.0 && max_height > 0.0);

    let radius = rng.random_range(BUBBLE_MIN_RADIUS..BUBBLE_MAX_RADIUS);
    let pos = Vec2::new(
        rng.random_range(0.0..max_width),
        rng.random_range(0.0..max_height),
    );
    let color = Rgba {
        r: rng.random(),
        g: rng.random(),
        b: rng.random(),
        a: BUBBLE_ALPHA,
    };
    let vel = Vec2::new(
        rng.random_range(-BUBBLE_MAX_SPEED..BUBBLE_MAX_SPEED),
        rng.random_range(-BUBBLE_MAX_SPEED..BUBBLE_MAX_SPEED),
    );

    Bubble {
        id,
        pos,
        vel,
        radius,
        color,
        created_at_ms: now_ms,
    }
}

/// Spawn rules applied every simulation tick
#[derive(Debug, Clone, Copy)]
pub struct SpawnPolicy {
    pub initial: usize,
    pub max: usize,
    pub chance: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            initial: INITIAL_BUBBLES,
            max: MAX_BUBBLES,
            chance: SPAWN_CHANCE,
        }
    }
}

/// Refill, trickle and move the population by one simulation tick
///
/// `next_id` hands out ids for any bubbles created.
pub fn populate<R: Rng + ?Sized>(
    bubbles: &[Bubble],
    policy: &SpawnPolicy,
    area: &PlayArea,
    rng: &mut R,
    now_ms: u64,
    mut next_id: impl FnMut() -> u32,
) -> Vec<Bubble> {
    let mut next: Vec<Bubble> = if bubbles.is_empty() {
        (0..policy.initial)
            .map(|_| create_bubble(rng, next_id(), area.width, area.height, now_ms))
            .collect()
    } else {
        bubbles.to_vec()
    };

    // Roll every tick so the RNG stream does not depend on population size
    let roll: f64 = rng.random();
    if roll < policy.chance && next.len() < policy.max {
        let bubble = create_bubble(rng, next_id(), area.width, area.height, now_ms);
        log::debug!("Spawned bubble {} ({} live)", bubble.id, next.len() + 1);
        next.push(bubble);
    }

    advance(&next, area.width_px(), area.height_px(), area.density)
}

/// Drop bubbles whose age reached `ttl_ms`; returns the survivors and the eviction count
pub fn expire(bubbles: &[Bubble], now_ms: u64, ttl_ms: u64) -> (Vec<Bubble>, usize) {
    let kept: Vec<Bubble> = bubbles
        .iter()
        .filter(|b| !b.is_expired(now_ms, ttl_ms))
        .cloned()
        .collect();
    let evicted = bubbles.len() - kept.len();
    (kept, evicted)
}

/// Drop the bubble(s) with the given id; returns the survivors and whether anything went
pub fn remove_by_id(bubbles: &[Bubble], id: u32) -> (Vec<Bubble>, bool) {
    let kept: Vec<Bubble> = bubbles.iter().filter(|b| b.id != id).cloned().collect();
    let removed = kept.len() != bubbles.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn counter() -> impl FnMut() -> u32 {
        let mut id = 0;
        move || {
            id += 1;
            id
        }
    }

    #[test]
    fn test_create_bubble_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        for id in 0..500 {
            let b = create_bubble(&mut rng, id, 360.0, 640.0, 42);
            assert_eq!(b.id, id);
            assert_eq!(b.created_at_ms, 42);
            assert!((30.0..60.0).contains(&b.radius));
            assert!((0.0..360.0).contains(&b.pos.x));
            assert!((0.0..640.0).contains(&b.pos.y));
            assert!((-2.0..2.0).contains(&b.vel.x));
            assert!((-2.0..2.0).contains(&b.vel.y));
            assert_eq!(b.color.a, 200);
        }
    }

    #[test]
    fn test_empty_population_refills_to_three() {
        let mut rng = Pcg32::seed_from_u64(7);
        let area = PlayArea::new(400.0, 400.0);
        let policy = SpawnPolicy {
            chance: 0.0,
            ..Default::default()
        };
        let out = populate(&[], &policy, &area, &mut rng, 0, counter());
        assert_eq!(out.len(), 3);
        assert_eq!(out.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_trickle_appends_one() {
        let mut rng = Pcg32::seed_from_u64(7);
        let area = PlayArea::new(400.0, 400.0);
        let policy = SpawnPolicy {
            chance: 1.0,
            ..Default::default()
        };
        let seed = populate(&[], &SpawnPolicy { chance: 0.0, ..policy }, &area, &mut rng, 0, counter());
        let out = populate(&seed, &policy, &area, &mut rng, 16, || 99);
        assert_eq!(out.len(), 4);
        assert_eq!(out[3].id, 99);
        assert_eq!(out[3].created_at_ms, 16);
    }

    #[test]
    fn test_population_is_moved() {
        let mut rng = Pcg32::seed_from_u64(3);
        let area = PlayArea::new(400.0, 400.0);
        let policy = SpawnPolicy {
            chance: 0.0,
            ..Default::default()
        };
        let before = populate(&[], &policy, &area, &mut rng, 0, counter());
        let after = populate(&before, &policy, &area, &mut rng, 16, counter());
        for (a, b) in before.iter().zip(&after) {
            assert_eq!(b.pos, a.pos + a.vel);
        }
    }

    #[test]
    fn test_expire_boundary() {
        let mut rng = Pcg32::seed_from_u64(5);
        let young = create_bubble(&mut rng, 1, 400.0, 400.0, 1000);
        let old = create_bubble(&mut rng, 2, 400.0, 400.0, 0);
        let (kept, evicted) = expire(&[young.clone(), old], 2999, 3000);
        assert_eq!(evicted, 0);
        assert_eq!(kept.len(), 2);

        let (kept, evicted) = expire(&kept, 3000, 3000);
        assert_eq!(evicted, 1);
        assert_eq!(kept, vec![young]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut rng = Pcg32::seed_from_u64(5);
        let bubbles = vec![create_bubble(&mut rng, 1, 400.0, 400.0, 0)];
        let (kept, removed) = remove_by_id(&bubbles, 2);
        assert!(!removed);
        assert_eq!(kept, bubbles);

        let (kept, removed) = remove_by_id(&bubbles, 1);
        assert!(removed);
        assert!(kept.is_empty());
    }

    proptest! {
        #[test]
        fn prop_trickle_never_exceeds_cap(seed in any::<u64>(), ticks in 1usize..400) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let area = PlayArea::new(360.0, 640.0);
            let policy = SpawnPolicy { chance: 0.5, ..Default::default() };
            let mut next_id = counter();
            let mut bubbles = Vec::new();
            for t in 0..ticks {
                bubbles = populate(&bubbles, &policy, &area, &mut rng, t as u64 * 16, &mut next_id);
                prop_assert!(bubbles.len() <= policy.max);
            }
        }
    }
}
