//! # Particle Cosmos core
//!
//! Fixed-step 2D particle simulation driven by transient force emitters.

pub mod config;
pub mod engine;
pub mod explosion;
pub mod field;
pub mod integrator;
pub mod kind;
pub mod particle;
pub mod runtime;

pub use config::{ConfigError, SimConfig, Tunables, Turbulence};
pub use engine::World;
pub use explosion::{create_explosion, DEFAULT_SHARD_COUNT};
pub use field::{FieldPreset, FieldType, ForceField};
pub use kind::{KindProfile, ParticleKind, Rgb};
pub use particle::{Particle, StepParams};
pub use runtime::{
    build_simulation_context, get_field_states, get_particle_states, run_headless,
    step_simulation, FieldState, FrameClock, ParticleState, SimulationContext, SimulationStats,
    STEPS_PER_SECOND,
};
