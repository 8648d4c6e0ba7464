use crate::config::{ConfigError, SimConfig};
use crate::explosion::create_explosion;
use crate::field::ForceField;
use crate::kind::{ParticleKind, Rgb};
use crate::particle::Particle;
use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest distance from the pick point at which a particle can be exploded
pub const PICK_RADIUS: f32 = 60.0;
/// Slack added to a particle's size when testing whether a pick hit it
pub const PICK_SLACK: f32 = 10.0;

/// The live particle and field collections plus the random stream they draw from
#[derive(Debug)]
pub struct World {
    pub particles: Vec<Particle>,
    pub fields: Vec<ForceField>,
    pub config: SimConfig,
    pub rng: StdRng,
}

impl World {
    /// Empty world. Rejects configs that would make spawning panic later,
    /// such as a spawn margin wider than the world.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            particles: Vec::with_capacity(config.max_particles),
            fields: Vec::with_capacity(config.max_fields),
            config,
            rng,
        })
    }

    pub fn bounds(&self) -> Vec2 {
        self.config.bounds()
    }

    pub fn has_particle_room(&self) -> bool {
        self.particles.len() < self.config.max_particles
    }

    pub fn has_field_room(&self) -> bool {
        self.fields.len() < self.config.max_fields
    }

    /// Add a field unless the field cap is reached. Returns whether it was added.
    pub fn add_field(&mut self, field: ForceField) -> bool {
        if !self.has_field_room() {
            debug!(
                "field cap {} reached, dropping {} field",
                self.config.max_fields,
                field.field_type.name()
            );
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Spawn a fresh particle of `kind` at `pos`, subject to the cap
    pub fn spawn_particle(&mut self, pos: Vec2, kind: ParticleKind, size_multiplier: f32) -> bool {
        if !self.has_particle_room() {
            debug!("particle cap {} reached", self.config.max_particles);
            return false;
        }
        let particle = Particle::spawn(pos, kind, size_multiplier, &mut self.rng);
        self.particles.push(particle);
        true
    }

    /// Spawn up to `count` particles at `pos`; stops at the cap.
    /// Returns how many were added.
    pub fn spawn_burst(
        &mut self,
        pos: Vec2,
        kind: ParticleKind,
        size_multiplier: f32,
        count: usize,
    ) -> usize {
        (0..count)
            .take_while(|_| self.spawn_particle(pos, kind, size_multiplier))
            .count()
    }

    /// Scatter `count` normal particles over the whole world, subject to the cap
    pub fn seed_population(&mut self, count: usize, size_multiplier: f32) -> usize {
        let bounds = self.bounds();
        let mut added = 0;
        for _ in 0..count {
            let pos = Vec2::new(
                self.rng.random_range(0.0..=bounds.x),
                self.rng.random_range(0.0..=bounds.y),
            );
            if !self.spawn_particle(pos, ParticleKind::Normal, size_multiplier) {
                break;
            }
            added += 1;
        }
        added
    }

    /// Uniform position inside the bounds inset by the spawn margin
    pub fn random_interior_point(&mut self) -> Vec2 {
        let margin = self.config.spawn_margin;
        let bounds = self.bounds();
        Vec2::new(
            self.rng.random_range(margin..=bounds.x - margin),
            self.rng.random_range(margin..=bounds.y - margin),
        )
    }

    /// Append a shard burst. Not cap-checked, the population may overshoot.
    pub fn explode_at(&mut self, origin: Vec2, color: Rgb, count: usize, size_multiplier: f32) {
        let shards = create_explosion(origin, color, count, size_multiplier, &mut self.rng);
        debug!(
            "explosion at ({:.0}, {:.0}) added {} shards",
            origin.x,
            origin.y,
            shards.len()
        );
        self.particles.extend(shards);
    }

    /// Index of the particle a pick at `point` lands on, if any.
    ///
    /// The particle must lie within [`PICK_RADIUS`] of the point and within
    /// its own size plus [`PICK_SLACK`]; the closest such particle wins.
    pub fn pick_particle(&self, point: Vec2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, particle) in self.particles.iter().enumerate() {
            let dist_sq = particle.pos.distance_squared(point);
            let hit_radius = particle.size + PICK_SLACK;
            if dist_sq >= hit_radius * hit_radius {
                continue;
            }
            let limit = best.map_or(PICK_RADIUS * PICK_RADIUS, |(_, d)| d);
            if dist_sq < limit {
                best = Some((idx, dist_sq));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Remove the particle under `point` and replace it with a shard burst.
    /// Returns whether anything exploded.
    pub fn explode_nearest(&mut self, point: Vec2, count: usize, size_multiplier: f32) -> bool {
        let Some(idx) = self.pick_particle(point) else {
            return false;
        };
        let victim = self.particles.remove(idx);
        self.explode_at(victim.pos, victim.color, count, size_multiplier);
        true
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.fields.clear();
    }
}
