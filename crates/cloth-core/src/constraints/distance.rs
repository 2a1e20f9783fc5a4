use crate::particle::ParticleSet;
use crate::topology::Edge;

/// Below this combined inverse mass both endpoints count as pinned.
pub(crate) const MIN_WEIGHT_SUM: f32 = 1e-4;
/// Below this separation the constraint direction is undefined.
pub(crate) const MIN_DISTANCE: f32 = 1e-4;

/// Solve all distance constraints with one PBD relaxation pass.
///
/// For each edge:
/// 1. Compute constraint value C = |p0 - p1| - rest_distance
/// 2. Split the correction between the endpoints by inverse mass
/// 3. Scale it by `stiffness` in (0, 1]
///
/// Corrections are written straight into `particles.position`
/// (Gauss-Seidel), so later edges see the result of earlier ones.
/// Edges with both endpoints pinned or coincident endpoints are skipped.
pub fn solve_distance_constraints(edges: &[Edge], particles: &mut ParticleSet, stiffness: f32) {
    for edge in edges {
        let i = edge.p0 as usize;
        let j = edge.p1 as usize;

        // Inverse mass from particle data (0.0 = pinned)
        let w_i = particles.inv_mass[i];
        let w_j = particles.inv_mass[j];
        let w_sum = w_i + w_j;
        if w_sum <= MIN_WEIGHT_SUM {
            continue;
        }

        let diff = particles.position[i] - particles.position[j];
        let dist = diff.length();
        if dist < MIN_DISTANCE {
            continue;
        }

        // Constraint gradient direction (unit vector from p1 to p0)
        let n = diff / dist;
        let corr = dist - edge.rest_distance;

        particles.position[i] -= n * corr * w_i / w_sum * stiffness;
        particles.position[j] += n * corr * w_j / w_sum * stiffness;
    }
}
