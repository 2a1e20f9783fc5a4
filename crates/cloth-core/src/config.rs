use glam::Vec2;

use crate::error::ClothError;

/// Setup-time parameters of the cloth simulation.
#[derive(Clone, Debug)]
pub struct ClothConfig {
    /// Substeps per frame.
    pub substep_count: u32,
    /// Distance-constraint relaxation factor in (0, 1].
    pub stiffness: f32,
    /// Particle radius. Twice this is both the collision separation and the
    /// spatial hash cell spacing.
    pub particle_radius: f32,
    /// Spatial hash slot count.
    pub table_size: usize,
    pub rows: usize,
    pub cols: usize,
    /// Spacing between adjacent mesh particles and rest length of structural edges.
    pub rest_distance: f32,
    /// Position of the top-left particle.
    pub origin: Vec2,
    /// Initial gravity, screen space (+y down).
    pub gravity: Vec2,
    /// Row-major indices of particles given infinite mass.
    pub pinned: Vec<usize>,
    /// Add both quad diagonals as shear edges.
    pub shear_edges: bool,
}

impl Default for ClothConfig {
    fn default() -> Self {
        let rows = 20;
        let cols = 20;
        Self {
            substep_count: 6,
            stiffness: 0.1,
            particle_radius: 10.0,
            table_size: 5 * rows * cols,
            rows,
            cols,
            rest_distance: 20.0,
            origin: Vec2::new(-200.0, -250.0),
            gravity: Vec2::new(0.0, 981.0),
            pinned: vec![cols / 2],
            shear_edges: false,
        }
    }
}

impl ClothConfig {
    #[inline]
    pub fn particle_diameter(&self) -> f32 {
        self.particle_radius * 2.0
    }

    pub fn particle_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn with_substeps(mut self, substep_count: u32) -> Self {
        self.substep_count = substep_count;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_particle_radius(mut self, radius: f32) -> Self {
        self.particle_radius = radius;
        self
    }

    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size;
        self
    }

    /// Set the mesh size. Also resets the pins to the middle of the top row.
    pub fn with_mesh(mut self, rows: usize, cols: usize, rest_distance: f32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self.rest_distance = rest_distance;
        self.pinned = vec![cols / 2];
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_pinned(mut self, pinned: Vec<usize>) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_shear_edges(mut self, shear_edges: bool) -> Self {
        self.shear_edges = shear_edges;
        self
    }

    /// Check the solver-level parameters shared by every construction path.
    pub fn validate_solver(&self) -> Result<(), ClothError> {
        if self.substep_count == 0 {
            return Err(ClothError::InvalidSubstepCount);
        }
        if !(self.stiffness > 0.0 && self.stiffness <= 1.0) {
            return Err(ClothError::InvalidStiffness(self.stiffness));
        }
        if !(self.particle_radius.is_finite() && self.particle_radius > 0.0) {
            return Err(ClothError::InvalidParticleRadius(self.particle_radius));
        }
        if self.table_size == 0 {
            return Err(ClothError::InvalidTableSize);
        }
        Ok(())
    }

    /// Check every parameter, including mesh shape and pins.
    pub fn validate(&self) -> Result<(), ClothError> {
        self.validate_solver()?;
        if self.rows == 0 || self.cols == 0 {
            return Err(ClothError::InvalidMeshDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(self.rest_distance.is_finite() && self.rest_distance > 0.0) {
            return Err(ClothError::InvalidRestDistance(self.rest_distance));
        }
        let count = self.particle_count();
        if let Some(&index) = self.pinned.iter().find(|&&i| i >= count) {
            return Err(ClothError::PinOutOfBounds { index, count });
        }
        Ok(())
    }
}
