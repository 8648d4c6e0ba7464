//! Particle archetypes and their fixed physical constants

/// RGB color triple
pub type Rgb = [u8; 3];

/// The four fixed particle archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleKind {
    #[default]
    Normal,
    Heavy,
    Light,
    Energy,
}

/// Immutable constants attached to a particle kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    pub mass: f32,
    pub color: Rgb,
    /// Per-step velocity multiplier in (0, 1]
    pub drag: f32,
}

const NORMAL: KindProfile = KindProfile {
    mass: 1.0,
    color: [100, 200, 255],
    drag: 0.98,
};

const HEAVY: KindProfile = KindProfile {
    mass: 2.0,
    color: [255, 150, 50],
    drag: 0.99,
};

const LIGHT: KindProfile = KindProfile {
    mass: 0.5,
    color: [150, 255, 100],
    drag: 0.96,
};

const ENERGY: KindProfile = KindProfile {
    mass: 0.3,
    color: [255, 100, 255],
    drag: 0.94,
};

impl ParticleKind {
    /// All kinds, in selector order (keys 1-4)
    pub const ALL: [ParticleKind; 4] = [
        ParticleKind::Normal,
        ParticleKind::Heavy,
        ParticleKind::Light,
        ParticleKind::Energy,
    ];

    pub fn profile(self) -> &'static KindProfile {
        match self {
            ParticleKind::Normal => &NORMAL,
            ParticleKind::Heavy => &HEAVY,
            ParticleKind::Light => &LIGHT,
            ParticleKind::Energy => &ENERGY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Normal => "NORMAL",
            ParticleKind::Heavy => "HEAVY",
            ParticleKind::Light => "LIGHT",
            ParticleKind::Energy => "ENERGY",
        }
    }

    /// Look up a kind by its zero-based selector slot
    pub fn from_index(index: usize) -> Option<ParticleKind> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            ParticleKind::Normal => 0,
            ParticleKind::Heavy => 1,
            ParticleKind::Light => 2,
            ParticleKind::Energy => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_are_physical() {
        for kind in ParticleKind::ALL {
            let profile = kind.profile();
            assert!(profile.mass > 0.0, "{} mass must be positive", kind.name());
            assert!(profile.drag > 0.0 && profile.drag <= 1.0);
        }
    }

    #[test]
    fn test_index_roundtrip() {
        for kind in ParticleKind::ALL {
            assert_eq!(ParticleKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(ParticleKind::from_index(4), None);
    }
}
