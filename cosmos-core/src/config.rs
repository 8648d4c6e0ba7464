//! Static simulation configuration and user-adjustable tunables

use crate::kind::ParticleKind;
use glam::Vec2;
use log::debug;
use thiserror::Error;

pub const FORCE_STRENGTH_MIN: f32 = 0.1;
pub const FORCE_STRENGTH_MAX: f32 = 5.0;
pub const SIZE_MULTIPLIER_MIN: f32 = 0.2;
pub const SIZE_MULTIPLIER_MAX: f32 = 3.0;

/// Rejected static configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world bounds must be positive and finite, got {width} x {height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("{name} cap must be at least 1")]
    ZeroCap { name: &'static str },
    #[error("spawn probability must lie in [0, 1], got {0}")]
    SpawnProbability(f32),
    #[error("spawn margin {margin} leaves no room inside {width} x {height}")]
    SpawnMargin { margin: f32, width: f32, height: f32 },
    #[error("turbulence {name} must be finite and non-negative, got {value}")]
    Turbulence { name: &'static str, value: f32 },
}

/// Fixed smooth-noise perturbation constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turbulence {
    pub strength: f32,
    pub scale: f32,
}

impl Default for Turbulence {
    fn default() -> Self {
        Self {
            strength: 0.3,
            scale: 0.005,
        }
    }
}

/// Static configuration, fixed for the lifetime of a simulation context
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub max_particles: usize,
    pub max_fields: usize,
    pub initial_particles: usize,
    /// Chance per step of spawning one particle while below the cap
    pub spawn_probability: f64,
    /// Inset from each edge for periodic spawns
    pub spawn_margin: f32,
    pub turbulence: Turbulence,
    /// Pins the random stream; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            max_particles: 400,
            max_fields: 60,
            initial_particles: 120,
            spawn_probability: 0.2,
            spawn_margin: 50.0,
            turbulence: Turbulence::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds_ok = |v: f32| v.is_finite() && v > 0.0;
        if !bounds_ok(self.width) || !bounds_ok(self.height) {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroCap { name: "particle" });
        }
        if self.max_fields == 0 {
            return Err(ConfigError::ZeroCap { name: "field" });
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::SpawnProbability(self.spawn_probability as f32));
        }
        let margin = self.spawn_margin;
        if !margin.is_finite() || margin < 0.0 || 2.0 * margin > self.width || 2.0 * margin > self.height {
            return Err(ConfigError::SpawnMargin {
                margin,
                width: self.width,
                height: self.height,
            });
        }
        for (name, value) in [
            ("strength", self.turbulence.strength),
            ("scale", self.turbulence.scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Turbulence { name, value });
            }
        }
        Ok(())
    }
}

/// Knobs the user turns while the simulation runs.
///
/// Passed into every step rather than held as ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    /// Multiplier for newly created fields only
    pub force_strength: f32,
    /// Multiplier for newly created particles' base size only
    pub size_multiplier: f32,
    pub turbulence: bool,
    /// Kind used for periodic and manual spawns
    pub kind: ParticleKind,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            force_strength: 1.0,
            size_multiplier: 1.0,
            turbulence: false,
            kind: ParticleKind::Normal,
        }
    }
}

impl Tunables {
    pub fn adjust_force_strength(&mut self, delta: f32) {
        self.force_strength =
            (self.force_strength + delta).clamp(FORCE_STRENGTH_MIN, FORCE_STRENGTH_MAX);
        debug!("force strength now {:.1}x", self.force_strength);
    }

    pub fn adjust_size_multiplier(&mut self, delta: f32) {
        self.size_multiplier =
            (self.size_multiplier + delta).clamp(SIZE_MULTIPLIER_MIN, SIZE_MULTIPLIER_MAX);
        debug!("size multiplier now {:.1}x", self.size_multiplier);
    }

    pub fn toggle_turbulence(&mut self) -> bool {
        self.turbulence = !self.turbulence;
        debug!("turbulence {}", if self.turbulence { "on" } else { "off" });
        self.turbulence
    }

    pub fn select_kind(&mut self, kind: ParticleKind) {
        self.kind = kind;
    }

    /// Restore multipliers and turbulence. The selected kind is kept.
    pub fn reset(&mut self) {
        let kind = self.kind;
        *self = Self { kind, ..Self::default() };
    }
}
