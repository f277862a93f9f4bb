//! The whole hero scene advanced as one unit.
//!
//! Every updater in a tick receives the same pointer snapshot, so the camera,
//! stars, streaks and ornaments never disagree about where the pointer is.

use glam::{Mat4, Vec3};

use crate::backdrop::generate_backdrop;
use crate::camera::{Camera, CameraRig};
use crate::config::{SceneConfig, STREAM_BACKDROP, STREAM_PARTICLES, STREAM_STREAKS};
use crate::ornaments::{default_nebulae, default_orbiters, CorePose, Nebula, Orbiter};
use crate::palette::ThemeColor;
use crate::particles::{Particle, ParticleField};
use crate::pointer::PointerVector;
use crate::streaks::{LineVertex, StreakField};

pub struct Scene {
    pub particles: ParticleField,
    pub streaks: StreakField,
    pub camera: CameraRig,
    pub orbiters: Vec<Orbiter>,
    pub nebulae: Vec<Nebula>,
    backdrop: Vec<Particle>,
    elapsed: f64,
    pointer: PointerVector,
    frames: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbiterView {
    pub position: Vec3,
    pub color: ThemeColor,
    pub size: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaView {
    pub nebula: Nebula,
    pub rotation: glam::Quat,
}

/// Everything a renderer needs for one frame.
pub struct FrameView<'a> {
    pub camera: Camera,
    pub view_proj: Mat4,
    pub stars: &'a [Particle],
    pub backdrop: &'a [Particle],
    pub streak_vertices: &'a [LineVertex],
    pub orbiters: Vec<OrbiterView>,
    pub nebulae: Vec<NebulaView>,
    pub core: CorePose,
    pub elapsed: f32,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let particles = ParticleField::new(config.particle_count, config.rng_for(STREAM_PARTICLES));
        let streaks = StreakField::new(config.streak_count, config.rng_for(STREAM_STREAKS));
        let backdrop = generate_backdrop(config.backdrop_count, &mut config.rng_for(STREAM_BACKDROP));
        log::debug!(
            "[scene] particles={} streaks={} backdrop={} seed={:?} smoothing={:?}",
            particles.len(),
            streaks.len(),
            backdrop.len(),
            config.seed,
            config.smoothing
        );
        Self {
            particles,
            streaks,
            camera: CameraRig::new(config.smoothing),
            orbiters: default_orbiters(),
            nebulae: default_nebulae(),
            backdrop,
            elapsed: 0.0,
            pointer: PointerVector::CENTER,
            frames: 0,
        }
    }

    /// Assemble a scene from prepared parts (tests, alternate layouts).
    pub fn from_parts(particles: ParticleField, streaks: StreakField, camera: CameraRig) -> Self {
        Self {
            particles,
            streaks,
            camera,
            orbiters: default_orbiters(),
            nebulae: default_nebulae(),
            backdrop: Vec::new(),
            elapsed: 0.0,
            pointer: PointerVector::CENTER,
            frames: 0,
        }
    }

    /// Advance one displayed frame by `dt` seconds.
    pub fn tick(&mut self, dt: f32, pointer: PointerVector) {
        self.pointer = pointer;
        self.elapsed += dt as f64;
        self.frames += 1;
        self.particles.tick(dt, pointer);
        self.streaks.tick(dt, pointer);
        self.camera.tick(dt, pointer);
    }

    /// Seconds accumulated over all ticks. Kept in f64 so long sessions keep
    /// advancing at 1/60 s steps.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pointer snapshot used by the latest tick.
    pub fn pointer(&self) -> PointerVector {
        self.pointer
    }

    pub fn backdrop(&self) -> &[Particle] {
        &self.backdrop
    }

    pub fn orbiter_positions(&self) -> Vec<Vec3> {
        self.orbiters
            .iter()
            .map(|o| o.position_at(self.elapsed as f32, self.pointer))
            .collect()
    }

    pub fn view(&self, aspect: f32) -> FrameView<'_> {
        let camera = self.camera.camera(aspect);
        let view_proj = camera.view_projection();
        let t = self.elapsed as f32;
        FrameView {
            camera,
            view_proj,
            stars: self.particles.particles(),
            backdrop: &self.backdrop,
            streak_vertices: self.streaks.vertices(),
            orbiters: self
                .orbiters
                .iter()
                .map(|o| OrbiterView {
                    position: o.position_at(t, self.pointer),
                    color: o.color,
                    size: o.size,
                    opacity: o.opacity(),
                })
                .collect(),
            nebulae: self
                .nebulae
                .iter()
                .map(|n| NebulaView {
                    nebula: *n,
                    rotation: n.rotation_at(t),
                })
                .collect(),
            core: CorePose::at(t, self.pointer),
            elapsed: t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_builds_configured_counts() {
        let cfg = SceneConfig {
            particle_count: 128,
            streak_count: 16,
            backdrop_count: 32,
            ..SceneConfig::seeded(1)
        };
        let scene = Scene::new(&cfg);
        let view = scene.view(1.5);
        assert_eq!(view.stars.len(), 128);
        assert_eq!(view.streak_vertices.len(), 32);
        assert_eq!(view.backdrop.len(), 32);
        assert_eq!(view.orbiters.len(), 4);
        assert_eq!(view.nebulae.len(), 4);
    }

    #[test]
    fn tick_accumulates_clock_and_pointer() {
        let mut scene = Scene::new(&SceneConfig {
            particle_count: 8,
            streak_count: 4,
            backdrop_count: 0,
            ..SceneConfig::seeded(2)
        });
        scene.tick(0.25, PointerVector::new(0.5, 0.5));
        scene.tick(0.25, PointerVector::new(-0.5, 0.0));
        assert!((scene.elapsed() - 0.5).abs() < 1e-6);
        assert_eq!(scene.frames(), 2);
        assert_eq!(scene.pointer(), PointerVector::new(-0.5, 0.0));
    }

    #[test]
    fn clock_keeps_advancing_after_days_of_uptime() {
        let mut scene = Scene::new(&SceneConfig {
            particle_count: 1,
            streak_count: 1,
            backdrop_count: 0,
            ..SceneConfig::seeded(4)
        });
        // 2^19 s is where an f32 clock stops moving at 1/60 s steps
        scene.tick(524_288.0, PointerVector::CENTER);
        let start = scene.elapsed();
        for _ in 0..60 {
            scene.tick(1.0 / 60.0, PointerVector::CENTER);
        }
        assert!((scene.elapsed() - start - 1.0).abs() < 1e-4);
        let view = scene.view(1.0);
        assert!(view.elapsed > 524_288.0);
    }

    #[test]
    fn orbiters_use_same_snapshot_as_camera() {
        let mut scene = Scene::new(&SceneConfig {
            particle_count: 1,
            streak_count: 1,
            backdrop_count: 0,
            ..SceneConfig::seeded(3)
        });
        let pointer = PointerVector::new(1.0, 0.0);
        scene.tick(0.0, pointer);
        let positions = scene.orbiter_positions();
        for (o, p) in scene.orbiters.iter().zip(positions) {
            assert_eq!(p, o.position_at(0.0, pointer));
        }
        assert!(scene.camera.offset().x > 0.0);
    }
}
