use glam::Vec2;

use super::distance::{MIN_DISTANCE, MIN_WEIGHT_SUM};
use crate::grid::SpatialHashGrid;
use crate::particle::ParticleSet;

/// A broad-phase candidate: two particles closer than one diameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionPair {
    /// Lower particle index.
    pub p: u32,
    /// Higher particle index.
    pub q: u32,
}

/// Detect all particle pairs closer than `diameter` using the spatial grid.
///
/// The grid may have been built from older positions than `positions`; it is
/// only used to propose candidates, the distance test uses `positions`.
/// Each unordered pair is proposed from its lower index only.
pub fn detect_collision_pairs(
    positions: &[Vec2],
    diameter: f32,
    grid: &SpatialHashGrid,
) -> Vec<CollisionPair> {
    let mut pairs = Vec::new();
    let min_dist_sq = diameter * diameter;

    for (p, &pos) in positions.iter().enumerate() {
        let p = p as u32;
        grid.query_neighbors(pos, |q| {
            if p >= q {
                return; // avoid duplicate pairs + self
            }
            let dist_sq = (pos - positions[q as usize]).length_squared();
            if dist_sq < min_dist_sq {
                pairs.push(CollisionPair { p, q });
            }
        });
    }

    pairs
}

/// Push every overlapping pair apart to a separation of `diameter`.
///
/// Same mass-weighted split as the distance solver but with the full
/// correction applied. Pairs already separated by more than `diameter`,
/// fully pinned pairs and coincident pairs are skipped.
pub fn solve_collision_pairs(pairs: &[CollisionPair], particles: &mut ParticleSet, diameter: f32) {
    for pair in pairs {
        let i = pair.p as usize;
        let j = pair.q as usize;

        let w_i = particles.inv_mass[i];
        let w_j = particles.inv_mass[j];
        let w_sum = w_i + w_j;
        if w_sum <= MIN_WEIGHT_SUM {
            continue; // both pinned
        }

        let diff = particles.position[i] - particles.position[j];
        let dist = diff.length();
        if dist > diameter || dist < MIN_DISTANCE {
            continue;
        }

        let n = diff / dist;
        let corr = dist - diameter;
        particles.position[i] -= n * corr * w_i / w_sum;
        particles.position[j] += n * corr * w_j / w_sum;
    }
}
