//! Simulated bodies and the per-step update

use crate::config::Turbulence;
use crate::field::ForceField;
use crate::kind::{ParticleKind, Rgb};
use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;

pub const TRAIL_CAPACITY: usize = 6;
pub const MAX_ENERGY: f32 = 100.0;

/// Speed limit per step
pub const MAX_SPEED: f32 = 15.0;
/// Position advance per unit of velocity per step
pub const POSITION_SCALE: f32 = 2.0;
/// Velocity kept (and reversed) on a wall bounce
pub const RESTITUTION: f32 = 0.6;
pub const SIZE_EASING: f32 = 0.1;

const TURBULENCE_AGE_RATE: f32 = 0.02;
const GLOW_GAIN: f32 = 0.5;
const GLOW_DECAY: f32 = 0.3;
const HIGH_ENERGY: f32 = 80.0;
const LOW_ENERGY: f32 = 20.0;

/// Per-step inputs shared by every particle
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub bounds: Vec2,
    /// `None` when turbulence is switched off
    pub turbulence: Option<Turbulence>,
}

/// A single simulated body
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub mass: f32,
    pub drag: f32,
    pub base_size: f32,
    pub size: f32,
    pub target_size: f32,
    pub color: Rgb,
    pub trail: VecDeque<Vec2>,
    pub energy: f32,
    pub age: u32,
    pub max_age: u32,
    pub glow: f32,
    /// Counts down while positive. Nothing reads it yet.
    pub merge_cooldown: u32,
    pub charged: bool,
    /// +1.0 or -1.0, fixed at creation
    pub charge: f32,
}

impl Particle {
    /// New particle with randomized velocity, size, charge and lifetime
    pub fn spawn<R: Rng + ?Sized>(
        pos: Vec2,
        kind: ParticleKind,
        size_multiplier: f32,
        rng: &mut R,
    ) -> Self {
        let profile = kind.profile();
        let base_size = rng.random_range(2.0f32..=5.0) * size_multiplier;
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0)),
            kind,
            mass: profile.mass,
            drag: profile.drag,
            base_size,
            size: base_size,
            target_size: base_size,
            color: profile.color,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
            energy: MAX_ENERGY,
            age: 0,
            max_age: rng.random_range(400..=1200),
            glow: 0.0,
            merge_cooldown: 0,
            charged: rng.random_bool(0.3),
            charge: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        }
    }

    /// Advance one fixed step. Returns `false` once the particle should be
    /// removed from the live set.
    pub fn update(&mut self, fields: &[ForceField], params: &StepParams) -> bool {
        self.age += 1;
        self.merge_cooldown = self.merge_cooldown.saturating_sub(1);

        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }

        if let Some(turbulence) = params.turbulence {
            self.vel += turbulence_kick(self.pos, self.age, &turbulence);
        }

        for field in fields {
            if !field.influences(self.pos) {
                continue;
            }
            self.vel += field.acceleration_on(self.pos, self.mass, self.charge);
        }

        self.vel *= self.drag;

        let speed_sq = self.vel.length_squared();
        if speed_sq > MAX_SPEED * MAX_SPEED {
            self.vel *= MAX_SPEED / speed_sq.sqrt();
        }

        self.pos += self.vel * POSITION_SCALE;
        self.bounce(params.bounds);

        self.size += (self.target_size - self.size) * SIZE_EASING;
        self.color = energy_color(self.energy / MAX_ENERGY);

        self.glow = if self.energy > HIGH_ENERGY {
            self.glow + GLOW_GAIN
        } else {
            (self.glow - GLOW_DECAY).max(0.0)
        };

        self.target_size = if self.energy < LOW_ENERGY {
            (self.base_size * 0.7).max(1.0)
        } else if self.energy > HIGH_ENERGY {
            (self.base_size * 2.0).min(self.size * 1.01)
        } else {
            self.base_size
        };

        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.age <= self.max_age && self.energy > 0.0
    }

    /// Lossy reflection off the world edges
    fn bounce(&mut self, bounds: Vec2) {
        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x *= -RESTITUTION;
            self.pos.x = self.pos.x.clamp(0.0, bounds.x);
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y *= -RESTITUTION;
            self.pos.y = self.pos.y.clamp(0.0, bounds.y);
        }
    }
}

/// Smooth position/age driven drift. Deterministic, no random state.
pub fn turbulence_kick(pos: Vec2, age: u32, turbulence: &Turbulence) -> Vec2 {
    let phase = age as f32 * TURBULENCE_AGE_RATE;
    Vec2::new(
        (pos.x * turbulence.scale + phase).sin() * turbulence.strength,
        (pos.y * turbulence.scale + phase).cos() * turbulence.strength,
    )
}

/// Hot/cold mapping: red rises with energy, blue rises as it drains
pub fn energy_color(ratio: f32) -> Rgb {
    let channel = |v: f32| v.floor().clamp(0.0, 255.0) as u8;
    [
        channel(100.0 + 155.0 * ratio),
        channel(150.0 + 100.0 * ratio),
        channel(100.0 + 155.0 * (1.0 - ratio)),
    ]
}
