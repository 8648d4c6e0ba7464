//! Transient force emitters and the per-field force kernels

use glam::Vec2;

/// Extra reach added to the influence radius for the cheap pre-filter
pub const ACTIVE_MARGIN: f32 = 20.0;

/// Scale applied to every field acceleration
pub const FORCE_SCALE: f32 = 0.8;

/// Lower bound on squared distance, keeps the 1/r kernels finite at the center
pub const MIN_DIST_SQ: f32 = 1.0;

/// Kind of force a field exerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Pulls particles in, proportional to mass
    Gravity,
    /// Pushes particles out, proportional to mass
    Repulsion,
    /// Pulls or pushes depending on the particle's charge sign
    Magnetic,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Gravity => "gravity",
            FieldType::Repulsion => "repulsion",
            FieldType::Magnetic => "magnetic",
        }
    }
}

/// A point emitter with an age-based lifetime
#[derive(Debug, Clone)]
pub struct ForceField {
    pub pos: Vec2,
    pub strength: f32,
    pub field_type: FieldType,
    pub age: u32,
    pub max_age: u32,
    radius_sq: f32,
    active_radius_sq: f32,
}

impl ForceField {
    pub fn new(pos: Vec2, strength: f32, radius: f32, field_type: FieldType, duration: u32) -> Self {
        let radius = radius.max(0.0);
        Self {
            pos,
            strength,
            field_type,
            age: 0,
            max_age: duration,
            radius_sq: radius * radius,
            active_radius_sq: (radius + ACTIVE_MARGIN) * (radius + ACTIVE_MARGIN),
        }
    }

    /// Advance one step. Returns whether the field is still alive.
    pub fn update(&mut self) -> bool {
        self.age += 1;
        self.age < self.max_age
    }

    /// Cheap pre-filter against the enlarged active radius
    pub fn influences(&self, point: Vec2) -> bool {
        point.distance_squared(self.pos) < self.active_radius_sq
    }

    pub fn radius_sq(&self) -> f32 {
        self.radius_sq
    }

    pub fn active_radius_sq(&self) -> f32 {
        self.active_radius_sq
    }

    pub fn radius(&self) -> f32 {
        self.radius_sq.sqrt()
    }

    /// Velocity change this field applies to a body at `point` this step.
    ///
    /// Returns zero outside the influence radius. Callers are expected to
    /// have already checked [`ForceField::influences`].
    pub fn acceleration_on(&self, point: Vec2, mass: f32, charge: f32) -> Vec2 {
        let delta = self.pos - point;
        let dist_sq = delta.length_squared().max(MIN_DIST_SQ);
        let distance = dist_sq.sqrt();

        if distance >= self.radius_sq.sqrt() {
            return Vec2::ZERO;
        }

        let force = match self.field_type {
            FieldType::Gravity => self.strength * mass / distance,
            FieldType::Repulsion => -self.strength * mass / distance,
            FieldType::Magnetic => self.strength * charge / distance,
        };

        delta / distance * force * FORCE_SCALE
    }
}

/// Strength, radius and duration for a user gesture.
///
/// Strength is the base value; the global force multiplier is applied when
/// the field is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPreset {
    pub field_type: FieldType,
    pub strength: f32,
    pub radius: f32,
    pub duration: u32,
}

impl FieldPreset {
    /// Single click: a strong, long-lived emitter
    pub fn click(field_type: FieldType) -> Self {
        let (strength, radius) = match field_type {
            FieldType::Gravity => (2.0, 120.0),
            FieldType::Repulsion => (3.0, 100.0),
            FieldType::Magnetic => (4.0, 90.0),
        };
        Self {
            field_type,
            strength,
            radius,
            duration: 120,
        }
    }

    /// Button held down: a weak emitter dropped every frame
    pub fn hold(field_type: FieldType) -> Self {
        let (strength, radius) = match field_type {
            FieldType::Gravity => (1.2, 80.0),
            FieldType::Repulsion => (1.8, 70.0),
            FieldType::Magnetic => (2.2, 80.0),
        };
        Self {
            field_type,
            strength,
            radius,
            duration: 10,
        }
    }

    pub fn build(&self, pos: Vec2, strength_multiplier: f32) -> ForceField {
        ForceField::new(
            pos,
            self.strength * strength_multiplier,
            self.radius,
            self.field_type,
            self.duration,
        )
    }
}
