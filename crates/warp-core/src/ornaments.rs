//! Decorative bodies whose motion is a closed-form function of elapsed time
//! and the pointer. None of them carries mutable state.

use glam::{EulerRot, Quat, Vec3};

use crate::constants::{
    CORE_CENTER, CORE_RADIUS, CORE_TILT_GAIN, NEBULA_OPACITY, ORBITER_OPACITY,
    ORBITER_POINTER_GAIN,
};
use crate::palette::ThemeColor;
use crate::pointer::PointerVector;

/// `amplitude * wave(frequency * t)` on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub amplitude: f32,
    pub frequency: f32,
    pub cosine: bool,
}

impl Wave {
    pub const fn sin(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
            cosine: false,
        }
    }

    pub const fn cos(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
            cosine: true,
        }
    }

    #[inline]
    pub fn at(self, t: f32) -> f32 {
        let phase = self.frequency * t;
        let w = if self.cosine { phase.cos() } else { phase.sin() };
        self.amplitude * w
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbiter {
    pub base: Vec3,
    pub color: ThemeColor,
    pub size: f32,
    pub pointer_gain: f32,
    pub waves: [Wave; 3],
}

/// Sway used by every orbiter in the hero scene.
pub const ORBITER_WAVES: [Wave; 3] = [Wave::sin(2.0, 0.5), Wave::cos(1.5, 0.3), Wave::sin(1.0, 0.4)];

impl Orbiter {
    pub const fn new(base: Vec3, color: ThemeColor, size: f32) -> Self {
        Self {
            base,
            color,
            size,
            pointer_gain: ORBITER_POINTER_GAIN,
            waves: ORBITER_WAVES,
        }
    }

    /// Rendered position at `elapsed` seconds with the given pointer.
    pub fn position_at(&self, elapsed: f32, pointer: PointerVector) -> Vec3 {
        let p = pointer.as_vec2();
        Vec3::new(
            self.base.x + self.waves[0].at(elapsed) + p.x * self.pointer_gain,
            self.base.y + self.waves[1].at(elapsed) + p.y * self.pointer_gain,
            self.base.z + self.waves[2].at(elapsed),
        )
    }

    pub fn opacity(&self) -> f32 {
        ORBITER_OPACITY
    }
}

pub fn default_orbiters() -> Vec<Orbiter> {
    vec![
        Orbiter::new(Vec3::new(-8.0, 3.0, -20.0), ThemeColor::Accent1, 0.35),
        Orbiter::new(Vec3::new(10.0, -4.0, -25.0), ThemeColor::Cyan, 0.25),
        Orbiter::new(Vec3::new(5.0, 6.0, -18.0), ThemeColor::Pink, 0.2),
        Orbiter::new(Vec3::new(-12.0, -6.0, -22.0), ThemeColor::Accent2, 0.3),
    ]
}

/// Large translucent cloud slowly tumbling in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nebula {
    pub position: Vec3,
    pub color: ThemeColor,
    pub scale: f32,
}

impl Nebula {
    pub const SPIN_X: f32 = 0.02;
    pub const SPIN_Y: f32 = 0.015;

    pub fn rotation_at(&self, elapsed: f32) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            elapsed * Self::SPIN_X,
            elapsed * Self::SPIN_Y,
            0.0,
        )
    }

    pub fn opacity(&self) -> f32 {
        NEBULA_OPACITY
    }
}

pub fn default_nebulae() -> Vec<Nebula> {
    vec![
        Nebula {
            position: Vec3::new(-15.0, 5.0, -50.0),
            color: ThemeColor::Primary,
            scale: 15.0,
        },
        Nebula {
            position: Vec3::new(20.0, -8.0, -60.0),
            color: ThemeColor::Pink,
            scale: 18.0,
        },
        Nebula {
            position: Vec3::new(0.0, 15.0, -70.0),
            color: ThemeColor::Cyan,
            scale: 12.0,
        },
        Nebula {
            position: Vec3::new(-25.0, -10.0, -55.0),
            color: ThemeColor::Secondary,
            scale: 16.0,
        },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub color: ThemeColor,
    pub opacity: f32,
    pub rotation: Quat,
}

/// Pose of the central energy core for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorePose {
    pub center: Vec3,
    pub radius: f32,
    pub color: ThemeColor,
    /// Breathing scale applied to `radius`.
    pub scale: f32,
    pub spin: Quat,
    /// Pointer-driven tilt of the whole assembly (core and rings).
    pub tilt: Quat,
    pub rings: [Ring; 2],
}

impl CorePose {
    pub fn at(elapsed: f32, pointer: PointerVector) -> Self {
        let t = elapsed;
        let p = pointer.as_vec2();
        Self {
            center: CORE_CENTER,
            radius: CORE_RADIUS,
            color: ThemeColor::Primary,
            scale: 1.0 + (t * 1.5).sin() * 0.08,
            spin: Quat::from_rotation_y(t * 0.3),
            tilt: Quat::from_euler(EulerRot::XYZ, p.y * CORE_TILT_GAIN, p.x * CORE_TILT_GAIN, 0.0),
            rings: [
                Ring {
                    radius: 2.5,
                    color: ThemeColor::Cyan,
                    opacity: 0.6,
                    rotation: Quat::from_euler(EulerRot::XYZ, t * 0.5, t * 0.3, 0.0),
                },
                Ring {
                    radius: 3.0,
                    color: ThemeColor::Pink,
                    opacity: 0.4,
                    rotation: Quat::from_euler(EulerRot::XYZ, -t * 0.4, 0.0, t * 0.3),
                },
            ],
        }
    }

    pub fn effective_radius(&self) -> f32 {
        self.radius * self.scale
    }
}
