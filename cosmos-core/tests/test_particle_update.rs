//! Unit tests for the per-step particle update

use cosmos_core::field::{FieldType, ForceField};
use cosmos_core::kind::ParticleKind;
use cosmos_core::particle::{MAX_SPEED, RESTITUTION, TRAIL_CAPACITY};
use cosmos_core::tests::test_helpers::{approx_eq_f32, default_params, test_particle};
use cosmos_core::Tunables;
use glam::Vec2;

fn calm() -> cosmos_core::StepParams {
    default_params(&Tunables::default())
}

#[test]
fn test_free_flight_applies_drag_then_moves() {
    let mut p = test_particle(Vec2::new(500.0, 350.0), Vec2::new(1.0, -2.0), ParticleKind::Normal);
    assert!(p.update(&[], &calm()));

    // v *= 0.98, then x += 2v
    assert!(approx_eq_f32(p.vel.x, 0.98, 1e-6));
    assert!(approx_eq_f32(p.vel.y, -1.96, 1e-6));
    assert!(approx_eq_f32(p.pos.x, 501.96, 1e-3));
    assert!(approx_eq_f32(p.pos.y, 346.08, 1e-3));
    assert_eq!(p.age, 1);
}

#[test]
fn test_speed_capped_at_fifteen() {
    let mut p = test_particle(Vec2::new(500.0, 350.0), Vec2::new(30.0, 40.0), ParticleKind::Normal);
    p.update(&[], &calm());

    assert!(approx_eq_f32(p.vel.length(), MAX_SPEED, 1e-4));
    // Direction preserved
    assert!(approx_eq_f32(p.vel.x / p.vel.y, 0.75, 1e-5));
}

#[test]
fn test_strong_field_still_capped() {
    let fields: Vec<ForceField> = (0..40)
        .map(|_| ForceField::new(Vec2::new(500.0, 350.0), 50.0, 120.0, FieldType::Gravity, 100))
        .collect();
    let mut p = test_particle(Vec2::new(505.0, 350.0), Vec2::ZERO, ParticleKind::Heavy);
    for _ in 0..20 {
        p.update(&fields, &calm());
        assert!(p.vel.length_squared() <= MAX_SPEED * MAX_SPEED + 1e-3);
    }
}

#[test]
fn test_bounce_off_right_wall() {
    let mut p = test_particle(Vec2::new(1000.0, 350.0), Vec2::new(5.0, 0.0), ParticleKind::Normal);
    p.update(&[], &calm());

    // 5.0 * 0.98 = 4.9 outward, reflected with 0.6 restitution
    assert!(approx_eq_f32(p.vel.x, -4.9 * RESTITUTION, 1e-5));
    assert_eq!(p.pos.x, 1000.0);
    assert_eq!(p.vel.y, 0.0);
}

#[test]
fn test_bounce_off_top_wall() {
    let mut p = test_particle(Vec2::new(200.0, 0.0), Vec2::new(0.0, -3.0), ParticleKind::Heavy);
    p.update(&[], &calm());

    assert!(approx_eq_f32(p.vel.y, 3.0 * 0.99 * RESTITUTION, 1e-5));
    assert_eq!(p.pos.y, 0.0);
    assert!(p.vel.y > 0.0);
}

#[test]
fn test_bounce_loses_speed() {
    let mut p = test_particle(Vec2::new(999.0, 699.0), Vec2::new(8.0, 8.0), ParticleKind::Light);
    let before = p.vel.length() * ParticleKind::Light.profile().drag;
    p.update(&[], &calm());

    assert!(p.vel.length() < before);
    assert_eq!(p.pos, Vec2::new(1000.0, 700.0));
}

#[test]
fn test_trail_bounded_and_ordered() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), ParticleKind::Normal);
    let mut last = p.pos;
    for _ in 0..10 {
        last = p.pos;
        p.update(&[], &calm());
        assert!(p.trail.len() <= TRAIL_CAPACITY);
    }
    assert_eq!(p.trail.len(), TRAIL_CAPACITY);
    assert_eq!(p.trail.back().copied(), Some(last));
    // Oldest first: x grows along the trail
    let xs: Vec<f32> = p.trail.iter().map(|t| t.x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_size_eases_toward_target() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.energy = 50.0;
    p.size = 1.0;
    p.target_size = 3.0;
    p.update(&[], &calm());

    assert!(approx_eq_f32(p.size, 1.2, 1e-6));
    assert_eq!(p.target_size, p.base_size);
}

#[test]
fn test_high_energy_grows_and_glows() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.update(&[], &calm());

    assert!(approx_eq_f32(p.glow, 0.5, 1e-6));
    assert!(approx_eq_f32(p.target_size, 3.0 * 1.01, 1e-5));

    for _ in 0..2000 {
        p.max_age = u32::MAX;
        p.update(&[], &calm());
    }
    // Growth is ratcheted but capped at twice the base size
    assert!(p.target_size <= 2.0 * p.base_size + 1e-5);
    assert!(p.size <= 2.0 * p.base_size + 1e-5);
}

#[test]
fn test_low_energy_shrinks_with_floor() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.energy = 10.0;
    p.glow = 1.0;
    p.update(&[], &calm());

    assert!(approx_eq_f32(p.target_size, 2.1, 1e-6));
    assert!(approx_eq_f32(p.glow, 0.7, 1e-6));

    p.base_size = 1.0;
    p.update(&[], &calm());
    assert_eq!(p.target_size, 1.0);
}

#[test]
fn test_glow_never_negative() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.energy = 50.0;
    p.glow = 0.4;
    p.update(&[], &calm());
    assert!(approx_eq_f32(p.glow, 0.1, 1e-6));
    p.update(&[], &calm());
    assert_eq!(p.glow, 0.0);
}

#[test]
fn test_color_follows_energy() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Heavy);
    p.update(&[], &calm());
    assert_eq!(p.color, [255, 250, 100]);

    p.energy = 0.0;
    p.update(&[], &calm());
    assert_eq!(p.color, [100, 150, 255]);
}

#[test]
fn test_expires_after_max_age() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.max_age = 3;
    assert!(p.update(&[], &calm())); // age 1
    assert!(p.update(&[], &calm())); // age 2
    assert!(p.update(&[], &calm())); // age 3
    assert!(!p.update(&[], &calm())); // age 4 > 3
}

#[test]
fn test_drained_energy_expires() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.energy = 0.0;
    assert!(!p.update(&[], &calm()));
}

#[test]
fn test_energy_untouched_by_update() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::new(3.0, 1.0), ParticleKind::Energy);
    for _ in 0..100 {
        p.update(&[], &calm());
    }
    assert_eq!(p.energy, 100.0);
}

#[test]
fn test_merge_cooldown_counts_down_to_zero() {
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.merge_cooldown = 2;
    p.update(&[], &calm());
    assert_eq!(p.merge_cooldown, 1);
    p.update(&[], &calm());
    p.update(&[], &calm());
    assert_eq!(p.merge_cooldown, 0);
}

#[test]
fn test_charge_fixed_across_updates() {
    let magnetic = [ForceField::new(Vec2::new(120.0, 100.0), 4.0, 90.0, FieldType::Magnetic, 100)];
    let mut p = test_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, ParticleKind::Normal);
    p.charged = true;
    p.charge = -1.0;
    for _ in 0..10 {
        p.update(&magnetic, &calm());
    }
    assert!(p.charged);
    assert_eq!(p.charge, -1.0);
}
