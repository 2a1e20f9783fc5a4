use cloth_core::constraints::collision::{detect_collision_pairs, solve_collision_pairs, CollisionPair};
use cloth_core::constraints::distance::solve_distance_constraints;
use cloth_core::grid::SpatialHashGrid;
use cloth_core::particle::ParticleSet;
use cloth_core::topology::Edge;
use glam::Vec2;

fn particles_at(positions: &[Vec2]) -> ParticleSet {
    let mut particles = ParticleSet::with_capacity(positions.len());
    for &pos in positions {
        particles.push(pos, 1.0);
    }
    particles
}

// ---------------------------------------------------------------------------
// Distance constraint tests
// ---------------------------------------------------------------------------

#[test]
fn test_distance_constraint_preserves_rest_length() {
    // Two particles exactly at rest length apart -- constraint is already satisfied.
    let mut particles = particles_at(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
    let edges = [Edge::new(0, 1, 1.0)];

    solve_distance_constraints(&edges, &mut particles, 1.0);

    assert_eq!(particles.position[0], Vec2::new(0.0, 0.0));
    assert_eq!(particles.position[1], Vec2::new(1.0, 0.0));
}

#[test]
fn test_distance_constraint_full_stiffness_restores_in_one_pass() {
    // Equal masses share the correction: each moves half the error.
    let mut particles = particles_at(&[Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)]);
    let edges = [Edge::new(0, 1, 1.0)];

    solve_distance_constraints(&edges, &mut particles, 1.0);

    assert!((particles.position[0].x - 0.5).abs() < 1e-6);
    assert!((particles.position[1].x - 1.5).abs() < 1e-6);
    let dist = (particles.position[0] - particles.position[1]).length();
    assert!((dist - 1.0).abs() < 1e-6, "got distance {dist}");
}

#[test]
fn test_distance_constraint_stiffness_scales_correction() {
    // Pinned anchor at the origin, free particle compressed to half its rest length.
    let mut particles = particles_at(&[Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)]);
    particles.pin(0);
    let edges = [Edge::new(0, 1, 10.0)];

    solve_distance_constraints(&edges, &mut particles, 0.1);

    assert_eq!(particles.position[0], Vec2::ZERO, "pinned particle should not move");
    assert!(
        (particles.position[1] - Vec2::new(5.5, 0.0)).length() < 1e-6,
        "free particle should move corr * stiffness = 0.5, got {:?}",
        particles.position[1]
    );
}

#[test]
fn test_distance_constraint_mass_weighting() {
    // Particle 1 is three times heavier, so it takes a quarter of the correction.
    let mut particles = particles_at(&[Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0)]);
    particles.inv_mass[1] = 1.0 / 3.0;
    let edges = [Edge::new(0, 1, 1.0)];

    solve_distance_constraints(&edges, &mut particles, 1.0);

    assert!((particles.position[0].y - 0.75).abs() < 1e-5);
    assert!((particles.position[1].y - 1.75).abs() < 1e-5);
}

#[test]
fn test_distance_constraint_skips_both_pinned() {
    let mut particles = particles_at(&[Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0)]);
    particles.pin(0);
    particles.pin(1);
    let edges = [Edge::new(0, 1, 1.0)];

    solve_distance_constraints(&edges, &mut particles, 1.0);

    assert_eq!(particles.position[0], Vec2::new(0.0, 0.0));
    assert_eq!(particles.position[1], Vec2::new(3.0, 0.0));
}

#[test]
fn test_distance_constraint_skips_coincident_particles() {
    let mut particles = particles_at(&[Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)]);
    let edges = [Edge::new(0, 1, 1.0)];

    solve_distance_constraints(&edges, &mut particles, 1.0);

    for pos in &particles.position {
        assert!(pos.is_finite());
        assert_eq!(*pos, Vec2::new(1.0, 1.0));
    }
}

#[test]
fn test_distance_constraints_are_sequential() {
    // Chain 0-1-2 stretched; the second edge sees particle 1 after the first edge moved it.
    let mut particles = particles_at(&[
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(4.0, 0.0),
    ]);
    particles.pin(0);
    let edges = [Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0)];

    solve_distance_constraints(&edges, &mut particles, 1.0);

    // Edge 0 pulls particle 1 to x = 1, edge 1 then splits a 2.0 error.
    assert!((particles.position[1].x - 2.0).abs() < 1e-6);
    assert!((particles.position[2].x - 3.0).abs() < 1e-6);
}

// ---------------------------------------------------------------------------
// Collision tests
// ---------------------------------------------------------------------------

#[test]
fn test_detect_overlapping_particles() {
    let positions = vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0)];
    let mut grid = SpatialHashGrid::new(1.0, 1024, positions.len());
    grid.rebuild(&positions);

    let pairs = detect_collision_pairs(&positions, 1.0, &grid);

    assert_eq!(pairs, vec![CollisionPair { p: 0, q: 1 }]);
}

#[test]
fn test_no_pair_when_apart() {
    let positions = vec![Vec2::new(0.0, 0.0), Vec2::new(1.5, 0.0)];
    let mut grid = SpatialHashGrid::new(1.0, 1024, positions.len());
    grid.rebuild(&positions);

    let pairs = detect_collision_pairs(&positions, 1.0, &grid);

    assert!(pairs.is_empty(), "should detect no pairs, got {pairs:?}");
}

#[test]
fn test_no_pair_at_exact_diameter() {
    let positions = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
    let mut grid = SpatialHashGrid::new(1.0, 1024, positions.len());
    grid.rebuild(&positions);

    assert!(detect_collision_pairs(&positions, 1.0, &grid).is_empty());
}

#[test]
fn test_pairs_are_ordered_and_unique() {
    // A tight cluster: every particle overlaps every other.
    let positions = vec![
        Vec2::new(0.1, 0.1),
        Vec2::new(0.3, 0.2),
        Vec2::new(0.2, 0.4),
        Vec2::new(0.4, 0.4),
    ];
    let mut grid = SpatialHashGrid::new(1.0, 4096, positions.len());
    grid.rebuild(&positions);

    let pairs = detect_collision_pairs(&positions, 1.0, &grid);

    assert_eq!(pairs.len(), 6, "4 particles give 6 unordered pairs");
    for pair in &pairs {
        assert!(pair.p < pair.q, "pair {pair:?} not ordered");
    }
    for (a, pa) in pairs.iter().enumerate() {
        for pb in &pairs[a + 1..] {
            assert_ne!(pa, pb, "duplicate pair");
        }
    }
}

#[test]
fn test_detect_uses_current_positions_against_stale_grid() {
    // Grid built while the particles were apart; candidates are still proposed
    // because both stay within each other's 3x3 neighbourhood.
    let built = vec![Vec2::new(0.5, 0.5), Vec2::new(1.9, 0.5)];
    let mut grid = SpatialHashGrid::new(1.0, 1024, built.len());
    grid.rebuild(&built);

    let moved = vec![Vec2::new(0.5, 0.5), Vec2::new(1.2, 0.5)];
    let pairs = detect_collision_pairs(&moved, 1.0, &grid);

    assert_eq!(pairs, vec![CollisionPair { p: 0, q: 1 }]);
}

#[test]
fn test_solve_pushes_apart() {
    let mut particles = particles_at(&[Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0)]);
    let pairs = [CollisionPair { p: 0, q: 1 }];

    solve_collision_pairs(&pairs, &mut particles, 1.0);

    // Particle 0 should be pushed in -X, particle 1 in +X
    assert!((particles.position[0].x + 0.25).abs() < 1e-6);
    assert!((particles.position[1].x - 0.75).abs() < 1e-6);
    let dist = (particles.position[0] - particles.position[1]).length();
    assert!((dist - 1.0).abs() < 1e-6);
}

#[test]
fn test_solve_against_pinned_moves_free_particle_only() {
    let mut particles = particles_at(&[Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.4)]);
    particles.pin(0);
    let pairs = [CollisionPair { p: 0, q: 1 }];

    solve_collision_pairs(&pairs, &mut particles, 1.0);

    assert_eq!(particles.position[0], Vec2::ZERO);
    assert!((particles.position[1] - Vec2::new(0.0, 1.0)).length() < 1e-6);
}

#[test]
fn test_solve_skips_separated_pinned_and_coincident() {
    let mut particles = particles_at(&[
        Vec2::new(0.0, 0.0),
        Vec2::new(1.5, 0.0),
        Vec2::new(5.0, 5.0),
        Vec2::new(5.0, 5.0),
        Vec2::new(9.0, 9.0),
        Vec2::new(9.2, 9.0),
    ]);
    particles.pin(4);
    particles.pin(5);
    let before = particles.position.clone();
    let pairs = [
        CollisionPair { p: 0, q: 1 }, // already separated
        CollisionPair { p: 2, q: 3 }, // coincident
        CollisionPair { p: 4, q: 5 }, // both pinned
    ];

    solve_collision_pairs(&pairs, &mut particles, 1.0);

    assert_eq!(particles.position, before);
}
