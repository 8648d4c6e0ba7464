use crate::config::Tunables;
use crate::engine::World;
use crate::particle::StepParams;
use log::trace;
use rand::Rng;

/// Advance the world by one fixed step.
///
/// Order: periodic spawn gate, field aging and expiry, then particle update
/// and expiry against the surviving fields. Both collections are compacted
/// in place in a single pass each.
pub fn step(world: &mut World, tunables: &Tunables) {
    if world.has_particle_room() && world.rng.random_bool(world.config.spawn_probability) {
        let pos = world.random_interior_point();
        world.spawn_particle(pos, tunables.kind, tunables.size_multiplier);
    }

    world.fields.retain_mut(|field| field.update());

    let params = StepParams {
        bounds: world.bounds(),
        turbulence: tunables.turbulence.then_some(world.config.turbulence),
    };
    let fields = &world.fields;
    world
        .particles
        .retain_mut(|particle| particle.update(fields, &params));

    trace!(
        "step: {} particles, {} fields",
        world.particles.len(),
        world.fields.len()
    );
}
