//! Shard bursts

use crate::kind::{ParticleKind, Rgb};
use crate::particle::Particle;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

pub const DEFAULT_SHARD_COUNT: usize = 15;
pub const SHARD_ENERGY: f32 = 50.0;
/// Steeper than any kind's drag so shards stall quickly
pub const SHARD_DRAG: f32 = 0.90;
const COLOR_JITTER: i16 = 30;

/// Build `count` light shards flying out of `origin`.
///
/// Shards start small but ease toward a base size scaled by
/// `size_multiplier`, like any other new particle. The caller appends them
/// to the live set; no cap is applied here.
pub fn create_explosion<R: Rng + ?Sized>(
    origin: Vec2,
    color: Rgb,
    count: usize,
    size_multiplier: f32,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(2.0f32..=6.0);

            let mut shard = Particle::spawn(origin, ParticleKind::Light, size_multiplier, rng);
            shard.vel = Vec2::from_angle(angle) * speed;
            shard.size = rng.random_range(1.0..=2.0);
            shard.target_size = shard.size;
            shard.color = color.map(|c| {
                let jitter = rng.random_range(-COLOR_JITTER..=COLOR_JITTER);
                (c as i16 + jitter).clamp(0, 255) as u8
            });
            shard.max_age = rng.random_range(40..=80);
            shard.energy = SHARD_ENERGY;
            shard.drag = SHARD_DRAG;
            shard
        })
        .collect()
}
