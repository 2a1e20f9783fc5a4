use glam::Vec2;

use crate::config::ClothConfig;
use crate::constraints::collision::{detect_collision_pairs, solve_collision_pairs, CollisionPair};
use crate::constraints::distance::solve_distance_constraints;
use crate::error::ClothError;
use crate::grid::SpatialHashGrid;
use crate::observer::{NoOpStepObserver, StepObserver, StepPhase};
use crate::particle::ParticleSet;
use crate::topology::{grid_edges, grid_positions, Edge};

/// Frames whose substep is shorter than this are not simulated.
pub const MIN_SUB_DT: f32 = 1e-4;

/// Sub-stepped PBD cloth solver with spatial-hash self-collision.
pub struct ClothSolver {
    particles: ParticleSet,
    edges: Vec<Edge>,
    config: ClothConfig,
    gravity: Vec2,
    grid: SpatialHashGrid,
    pairs: Vec<CollisionPair>,
}

impl ClothSolver {
    /// Build the rectangular mesh described by `config`.
    pub fn new(config: ClothConfig) -> Result<Self, ClothError> {
        config.validate()?;

        let positions = grid_positions(config.rows, config.cols, config.rest_distance, config.origin);
        let mut particles = ParticleSet::with_capacity(positions.len());
        for pos in positions {
            particles.push(pos, 1.0);
        }
        for &i in &config.pinned {
            particles.pin(i);
        }

        let edges = grid_edges(config.rows, config.cols, config.rest_distance, config.shear_edges);
        Self::from_parts(config, particles, edges)
    }

    /// Build a solver over arbitrary particles and edges.
    ///
    /// The mesh fields of `config` (rows, cols, origin, pins, shear) are
    /// ignored here; the particles already carry their inverse masses.
    pub fn from_parts(
        config: ClothConfig,
        particles: ParticleSet,
        edges: Vec<Edge>,
    ) -> Result<Self, ClothError> {
        config.validate_solver()?;

        let count = particles.count;
        for len in [
            particles.position.len(),
            particles.prev_position.len(),
            particles.velocity.len(),
            particles.inv_mass.len(),
        ] {
            if len != count {
                return Err(ClothError::ParticleCountMismatch { count, len });
            }
        }
        for (index, &inv_mass) in particles.inv_mass.iter().enumerate() {
            if !(inv_mass.is_finite() && inv_mass >= 0.0) {
                return Err(ClothError::InvalidInverseMass { index, inv_mass });
            }
        }
        for (e, edge) in edges.iter().enumerate() {
            for index in [edge.p0 as usize, edge.p1 as usize] {
                if index >= count {
                    return Err(ClothError::EdgeOutOfBounds { edge: e, index, count });
                }
            }
        }

        let grid = SpatialHashGrid::new(config.particle_diameter(), config.table_size, count);
        tracing::debug!(
            particles = count,
            edges = edges.len(),
            table_size = config.table_size,
            "cloth solver created"
        );

        Ok(Self {
            particles,
            edges,
            gravity: config.gravity,
            config,
            grid,
            pairs: Vec::new(),
        })
    }

    /// Step the simulation by one rendered frame of `frame_dt` seconds.
    pub fn advance(&mut self, frame_dt: f32) {
        self.advance_observed(frame_dt, &mut NoOpStepObserver);
    }

    /// Same as [`advance`](Self::advance), reporting each completed stage to `observer`.
    ///
    /// The spatial hash is rebuilt once from the pre-frame positions and
    /// reused by every substep's broad-phase, so pairs that only come within
    /// range mid-frame may be missed until the next frame.
    pub fn advance_observed<O: StepObserver>(&mut self, frame_dt: f32, observer: &mut O) {
        let substeps = self.config.substep_count;
        let sub_dt = frame_dt / substeps as f32;

        // Negated so a NaN frame time is skipped too.
        if !(sub_dt > MIN_SUB_DT) {
            tracing::trace!(frame_dt, "frame too short, skipping");
            observer.on_phase(StepPhase::Idle, 0);
            observer.on_frame_complete(0);
            return;
        }

        let count = self.particles.count;
        let diameter = self.config.particle_diameter();

        self.grid.rebuild(&self.particles.position);

        for substep in 0..substeps {
            for i in 0..count {
                self.particles.apply_gravity(i, self.gravity, sub_dt);
            }
            observer.on_phase(StepPhase::GravityApplied, substep);

            for i in 0..count {
                self.particles.apply_velocity(i, sub_dt);
            }
            observer.on_phase(StepPhase::VelocityIntegrated, substep);

            solve_distance_constraints(&self.edges, &mut self.particles, self.config.stiffness);
            observer.on_phase(StepPhase::DistanceSolved, substep);

            self.pairs = detect_collision_pairs(&self.particles.position, diameter, &self.grid);
            observer.on_phase(StepPhase::BroadPhased, substep);

            solve_collision_pairs(&self.pairs, &mut self.particles, diameter);
            observer.on_phase(StepPhase::CollisionSolved, substep);

            for i in 0..count {
                self.particles.reconstruct_velocity(i, sub_dt);
            }
            observer.on_phase(StepPhase::VelocityReconstructed, substep);
        }

        tracing::trace!(frame_dt, substeps, pairs = self.pairs.len(), "frame advanced");
        observer.on_phase(StepPhase::Idle, substeps);
        observer.on_frame_complete(substeps);
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Replace the gravity vector; read at the start of the next frame.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.count
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.particles.position
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Broad-phase pairs found in the last substep that ran.
    pub fn collision_pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }

    /// The hash as of the last simulated frame.
    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }
}
