//! 2D position-based cloth with spatial-hash self-collision.
//!
//! A rectangular mass-spring mesh is advanced in fixed substeps: gravity,
//! velocity integration, one relaxation pass over the distance constraints,
//! broad-phase pair discovery through a counting-sort spatial hash, collision
//! resolution and velocity reconstruction. Drawing, windowing and input are
//! left to the host; it reads [`ClothSolver::positions`] and
//! [`ClothSolver::edges`] and may change gravity between frames.

pub mod config;
pub mod constraints;
pub mod error;
pub mod gravity;
pub mod grid;
pub mod observer;
pub mod particle;
pub mod solver;
pub mod topology;

pub use config::ClothConfig;
pub use constraints::collision::CollisionPair;
pub use error::ClothError;
pub use gravity::GravityCommand;
pub use grid::SpatialHashGrid;
pub use observer::{NoOpStepObserver, StepObserver, StepPhase};
pub use particle::ParticleSet;
pub use solver::ClothSolver;
pub use topology::Edge;
