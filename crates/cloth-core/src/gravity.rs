use glam::Vec2;
use rand::Rng;

/// Re-aims gravity in a random direction while keeping its magnitude.
///
/// The generator is supplied by the caller, so a seeded `StdRng` gives a
/// reproducible sequence of directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityCommand {
    pub magnitude: f32,
}

impl GravityCommand {
    pub fn new(magnitude: f32) -> Self {
        Self { magnitude }
    }

    /// Draw an angle uniformly in [0, 360) degrees and return the gravity
    /// vector pointing that way.
    pub fn randomize<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let angle_deg: f32 = rng.random_range(0.0..360.0);
        let gravity = Vec2::from_angle(angle_deg.to_radians()) * self.magnitude;
        tracing::info!(x = gravity.x, y = gravity.y, "gravity changed");
        gravity
    }
}
