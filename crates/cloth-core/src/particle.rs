use glam::Vec2;

/// Inverse masses below this are treated as pinned by the integrator.
pub const PINNED_EPSILON: f32 = 1e-4;

/// SoA particle storage
pub struct ParticleSet {
    pub count: usize,
    /// Current positions.
    pub position: Vec<Vec2>,
    /// Positions at the start of the current substep.
    pub prev_position: Vec<Vec2>,
    /// Derived each substep from the position change (see `reconstruct_velocity`).
    pub velocity: Vec<Vec2>,
    /// Inverse mass, 0.0 = pinned (infinite mass)
    pub inv_mass: Vec<f32>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec2::ZERO; count],
            prev_position: vec![Vec2::ZERO; count],
            velocity: vec![Vec2::ZERO; count],
            inv_mass: vec![1.0; count],
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count: 0,
            position: Vec::with_capacity(capacity),
            prev_position: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            inv_mass: Vec::with_capacity(capacity),
        }
    }

    /// Append a particle at rest and return its index.
    pub fn push(&mut self, position: Vec2, inv_mass: f32) -> usize {
        debug_assert!(
            inv_mass.is_finite() && inv_mass >= 0.0,
            "inverse mass must be finite and >= 0, got {inv_mass}"
        );
        let idx = self.count;
        self.position.push(position);
        self.prev_position.push(position);
        self.velocity.push(Vec2::ZERO);
        self.inv_mass.push(inv_mass);
        self.count += 1;
        idx
    }

    /// Give particle `i` infinite mass.
    pub fn pin(&mut self, i: usize) {
        self.inv_mass[i] = 0.0;
    }

    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.inv_mass[i] < PINNED_EPSILON
    }

    #[inline]
    pub fn apply_gravity(&mut self, i: usize, gravity: Vec2, dt: f32) {
        if self.is_pinned(i) {
            return;
        }
        self.velocity[i] += gravity * dt;
    }

    #[inline]
    pub fn apply_velocity(&mut self, i: usize, dt: f32) {
        if self.is_pinned(i) {
            return;
        }
        self.position[i] += self.velocity[i] * dt;
    }

    /// Overwrite velocity with the constraint-corrected displacement of this
    /// substep and start the next one from the current position.
    ///
    /// Must run exactly once per substep, after every constraint pass.
    #[inline]
    pub fn reconstruct_velocity(&mut self, i: usize, dt: f32) {
        self.velocity[i] = (self.position[i] - self.prev_position[i]) / dt;
        self.prev_position[i] = self.position[i];
    }
}
