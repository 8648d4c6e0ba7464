//! Unit tests for field aging, expiry and presets

use cosmos_core::field::{FieldPreset, FieldType, ForceField};
use cosmos_core::integrator::step;
use cosmos_core::tests::test_helpers::{approx_eq_f32, quiet_world};
use cosmos_core::Tunables;
use glam::Vec2;

#[test]
fn test_update_reports_alive_until_max_age() {
    let mut field = ForceField::new(Vec2::ZERO, 1.0, 50.0, FieldType::Gravity, 4);
    assert!(field.update()); // age 1
    assert!(field.update()); // age 2
    assert!(field.update()); // age 3
    assert!(!field.update()); // age 4 == max age
    assert_eq!(field.age, 4);
}

#[test]
fn test_field_removed_at_step_n() {
    let mut world = quiet_world(1);
    let tunables = Tunables::default();
    let n = 10;
    assert!(world.add_field(ForceField::new(
        Vec2::new(500.0, 350.0),
        1.0,
        80.0,
        FieldType::Repulsion,
        n,
    )));

    for _ in 0..n - 1 {
        step(&mut world, &tunables);
        assert_eq!(world.fields.len(), 1);
    }
    step(&mut world, &tunables);
    assert!(world.fields.is_empty());
}

#[test]
fn test_zero_duration_field_lasts_no_steps() {
    let mut world = quiet_world(2);
    world.add_field(ForceField::new(Vec2::ZERO, 1.0, 50.0, FieldType::Magnetic, 0));
    step(&mut world, &Tunables::default());
    assert!(world.fields.is_empty());
}

#[test]
fn test_click_presets() {
    let gravity = FieldPreset::click(FieldType::Gravity);
    assert_eq!((gravity.strength, gravity.radius, gravity.duration), (2.0, 120.0, 120));

    let repulsion = FieldPreset::click(FieldType::Repulsion);
    assert_eq!((repulsion.strength, repulsion.radius), (3.0, 100.0));

    let magnetic = FieldPreset::click(FieldType::Magnetic);
    assert_eq!((magnetic.strength, magnetic.radius), (4.0, 90.0));
}

#[test]
fn test_hold_presets_are_short_lived() {
    for field_type in [FieldType::Gravity, FieldType::Repulsion, FieldType::Magnetic] {
        let preset = FieldPreset::hold(field_type);
        assert_eq!(preset.duration, 10);
        assert!(preset.strength < FieldPreset::click(field_type).strength);
    }
}

#[test]
fn test_preset_applies_strength_multiplier() {
    let field = FieldPreset::click(FieldType::Gravity).build(Vec2::new(1.0, 2.0), 1.5);
    assert!(approx_eq_f32(field.strength, 3.0, 1e-6));
    assert!(approx_eq_f32(field.radius(), 120.0, 1e-4));
    assert_eq!(field.max_age, 120);
    assert_eq!(field.pos, Vec2::new(1.0, 2.0));
}
