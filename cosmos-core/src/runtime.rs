use crate::config::{ConfigError, SimConfig, Tunables};
use crate::engine::World;
use crate::explosion::DEFAULT_SHARD_COUNT;
use crate::field::{FieldPreset, FieldType, ForceField};
use crate::integrator::step;
use crate::kind::{ParticleKind, Rgb};
use glam::Vec2;
use log::info;
use std::time::{Duration, Instant};

/// Fixed step rate the simulation constants are tuned for
pub const STEPS_PER_SECOND: u32 = 60;

/// Everything a running sandbox needs: the world, the user's tunables and a step counter
#[derive(Debug)]
pub struct SimulationContext {
    pub world: World,
    pub tunables: Tunables,
    pub current_step: u64,
}

/// What a renderer needs to draw one particle
#[derive(Debug, Clone)]
pub struct ParticleState {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgb,
    pub glow: f32,
    pub trail: Vec<Vec2>,
    /// `Some(sign)` for charged particles
    pub charge: Option<f32>,
    pub kind: ParticleKind,
}

/// What a renderer needs to draw one field
#[derive(Debug, Clone)]
pub struct FieldState {
    pub pos: Vec2,
    pub field_type: FieldType,
    pub radius: f32,
    pub age: u32,
    pub max_age: u32,
}

/// Aggregate counters for a HUD or a headless report
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStats {
    pub step: u64,
    pub particles: usize,
    pub fields: usize,
    /// Indexed by [`ParticleKind::index`]
    pub per_kind: [usize; 4],
    pub tunables: Tunables,
}

/// Validate `config`, build a world and scatter the initial population
pub fn build_simulation_context(config: SimConfig) -> Result<SimulationContext, ConfigError> {
    let tunables = Tunables::default();
    let initial = config.initial_particles;
    let mut world = World::new(config)?;
    let seeded = world.seed_population(initial, tunables.size_multiplier);
    info!(
        "sandbox {}x{} ready with {} particles (cap {}, field cap {})",
        world.config.width,
        world.config.height,
        seeded,
        world.config.max_particles,
        world.config.max_fields
    );
    Ok(SimulationContext {
        world,
        tunables,
        current_step: 0,
    })
}

/// Advance the context by exactly one step
pub fn step_simulation(ctx: &mut SimulationContext) {
    step(&mut ctx.world, &ctx.tunables);
    ctx.current_step += 1;
}

/// Build a context and run it headless for `steps` steps
pub fn run_headless(config: SimConfig, steps: u64) -> Result<SimulationStats, ConfigError> {
    let mut ctx = build_simulation_context(config)?;
    for _ in 0..steps {
        step_simulation(&mut ctx);
    }
    Ok(ctx.stats())
}

pub fn get_particle_states(ctx: &SimulationContext) -> Vec<ParticleState> {
    ctx.world
        .particles
        .iter()
        .map(|p| ParticleState {
            pos: p.pos,
            size: p.size,
            color: p.color,
            glow: p.glow,
            trail: p.trail.iter().copied().collect(),
            charge: p.charged.then_some(p.charge),
            kind: p.kind,
        })
        .collect()
}

pub fn get_field_states(ctx: &SimulationContext) -> Vec<FieldState> {
    ctx.world
        .fields
        .iter()
        .map(|f| FieldState {
            pos: f.pos,
            field_type: f.field_type,
            radius: f.radius(),
            age: f.age,
            max_age: f.max_age,
        })
        .collect()
}

impl SimulationContext {
    /// Add a field of the given shape; strength is scaled by the force multiplier
    pub fn add_field(
        &mut self,
        field_type: FieldType,
        pos: Vec2,
        strength: f32,
        radius: f32,
        duration: u32,
    ) -> bool {
        let strength = strength * self.tunables.force_strength;
        self.world
            .add_field(ForceField::new(pos, strength, radius, field_type, duration))
    }

    /// Add a field from a gesture preset
    pub fn emit(&mut self, preset: FieldPreset, pos: Vec2) -> bool {
        self.world
            .add_field(preset.build(pos, self.tunables.force_strength))
    }

    pub fn add_particle(&mut self, pos: Vec2, kind: ParticleKind) -> bool {
        self.world
            .spawn_particle(pos, kind, self.tunables.size_multiplier)
    }

    /// Spawn up to `count` particles of the selected kind at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize) -> usize {
        self.world
            .spawn_burst(pos, self.tunables.kind, self.tunables.size_multiplier, count)
    }

    /// Shard burst at `pos`; shards are scaled by the size multiplier
    pub fn explode_at(&mut self, pos: Vec2, color: Rgb) {
        self.world.explode_at(
            pos,
            color,
            DEFAULT_SHARD_COUNT,
            self.tunables.size_multiplier,
        );
    }

    pub fn explode_nearest(&mut self, pos: Vec2) -> bool {
        self.world.explode_nearest(
            pos,
            DEFAULT_SHARD_COUNT,
            self.tunables.size_multiplier,
        )
    }

    pub fn clear(&mut self) {
        self.world.clear();
        info!("cleared all particles and fields");
    }

    pub fn reset_tunables(&mut self) {
        self.tunables.reset();
        info!("tunables reset");
    }

    pub fn toggle_turbulence(&mut self) -> bool {
        self.tunables.toggle_turbulence()
    }

    pub fn adjust_force_strength(&mut self, delta: f32) {
        self.tunables.adjust_force_strength(delta);
    }

    pub fn adjust_size_multiplier(&mut self, delta: f32) {
        self.tunables.adjust_size_multiplier(delta);
    }

    pub fn select_kind(&mut self, kind: ParticleKind) {
        self.tunables.select_kind(kind);
    }

    pub fn stats(&self) -> SimulationStats {
        let mut per_kind = [0; 4];
        for particle in &self.world.particles {
            per_kind[particle.kind.index()] += 1;
        }
        SimulationStats {
            step: self.current_step,
            particles: self.world.particles.len(),
            fields: self.world.fields.len(),
            per_kind,
            tunables: self.tunables,
        }
    }
}

/// Paces frames for the one-step-per-frame contract.
///
/// A frame is due once a full interval has passed since the last one. Late
/// frames never trigger catch-up steps; the schedule restarts from the late
/// frame instead.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(STEPS_PER_SECOND)
    }
}

impl FrameClock {
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / frames_per_second.max(1),
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame is due at `now`. Marks the frame as taken when it is.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time left until the next frame is due
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// How long a viewer should wait before its next frame. A paused viewer
    /// never ticks the clock, so it polls at the plain interval instead of
    /// spinning on an overdue frame.
    pub fn repaint_delay(&self, now: Instant, running: bool) -> Duration {
        if running {
            self.until_next(now)
        } else {
            self.interval
        }
    }
}
