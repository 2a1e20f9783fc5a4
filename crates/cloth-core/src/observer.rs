//! Hooks for watching the substep pipeline.

/// Stage a substep has just completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPhase {
    /// Between frames.
    Idle,
    GravityApplied,
    VelocityIntegrated,
    DistanceSolved,
    BroadPhased,
    CollisionSolved,
    VelocityReconstructed,
}

/// Trait for observing simulation steps.
///
/// All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after each stage of substep `substep`.
    fn on_phase(&mut self, _phase: StepPhase, _substep: u32) {}

    /// Called when a frame ends, with the number of substeps that ran
    /// (0 when the frame was too short to simulate).
    fn on_frame_complete(&mut self, _substeps_run: u32) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
