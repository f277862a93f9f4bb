//! Star field flown through at warp speed.
//!
//! The field is a fixed-capacity slot buffer: particles are created once and
//! respawned in place when they pass the near bound, so the per-frame path
//! never allocates. `Particle` is `#[repr(C)]` and `Pod`, which lets the
//! renderer upload the slice directly as an instance buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use crate::constants::{
    PARTICLE_BASE_SPEED, PARTICLE_DRIFT_GAIN, PARTICLE_HEADING_GAIN, PARTICLE_SPAWN_HALF_EXTENT,
    PARTICLE_WRAP_LIMIT, SPEED_DISTANCE_GAIN, Z_FAR, Z_NEAR,
};
use crate::palette::STAR_PALETTE;
use crate::pointer::PointerVector;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Particle {
    pub position: Vec3,
    pub color: [f32; 3],
}

impl Particle {
    pub const fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Speed factor shared by everything that flies toward the camera:
/// 1x with the pointer centered, growing linearly with its distance.
#[inline]
pub fn speed_multiplier(pointer: PointerVector) -> f32 {
    1.0 + pointer.distance() * SPEED_DISTANCE_GAIN
}

/// Mirror a lateral coordinate to the opposite side once it leaves the band.
#[inline]
pub fn wrap_lateral(v: f32) -> f32 {
    if v.abs() > PARTICLE_WRAP_LIMIT {
        -v.signum() * PARTICLE_SPAWN_HALF_EXTENT
    } else {
        v
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    base_speed: f32,
    rng: StdRng,
    respawns: u64,
}

impl ParticleField {
    /// Scatter `count` particles through the travel volume.
    pub fn new(count: usize, mut rng: StdRng) -> Self {
        let particles = (0..count)
            .map(|_| {
                let color = STAR_PALETTE[rng.gen_range(0..STAR_PALETTE.len())];
                let position = Vec3::new(
                    rng.gen_range(-PARTICLE_SPAWN_HALF_EXTENT..=PARTICLE_SPAWN_HALF_EXTENT),
                    rng.gen_range(-PARTICLE_SPAWN_HALF_EXTENT..=PARTICLE_SPAWN_HALF_EXTENT),
                    rng.gen_range(Z_FAR..=0.0),
                );
                Particle::new(position, color)
            })
            .collect();
        Self::from_particles(particles, rng)
    }

    /// Adopt an explicit set of particles; the buffer size is fixed from here on.
    pub fn from_particles(particles: Vec<Particle>, rng: StdRng) -> Self {
        Self {
            particles,
            base_speed: PARTICLE_BASE_SPEED,
            rng,
            respawns: 0,
        }
    }

    /// Forward speed in units per second for the given pointer.
    #[inline]
    pub fn speed_for(&self, pointer: PointerVector) -> f32 {
        self.base_speed * speed_multiplier(pointer)
    }

    pub fn tick(&mut self, dt: f32, pointer: PointerVector) {
        let speed = self.speed_for(pointer);
        let heading = pointer.as_vec2() * PARTICLE_HEADING_GAIN;
        let dx = dt * heading.x * PARTICLE_DRIFT_GAIN;
        let dy = dt * heading.y * PARTICLE_DRIFT_GAIN;
        let dz = dt * speed;

        for p in self.particles.iter_mut() {
            p.position.x += dx;
            p.position.y += dy;
            p.position.z += dz;

            if p.position.z > Z_NEAR {
                p.position = Vec3::new(
                    self.rng
                        .gen_range(-PARTICLE_SPAWN_HALF_EXTENT..=PARTICLE_SPAWN_HALF_EXTENT),
                    self.rng
                        .gen_range(-PARTICLE_SPAWN_HALF_EXTENT..=PARTICLE_SPAWN_HALF_EXTENT),
                    Z_FAR,
                );
                self.respawns += 1;
                continue;
            }

            p.position.x = wrap_lateral(p.position.x);
            p.position.y = wrap_lateral(p.position.y);
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of respawns since construction.
    pub fn total_respawns(&self) -> u64 {
        self.respawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field_with(particles: Vec<Particle>) -> ParticleField {
        ParticleField::from_particles(particles, StdRng::seed_from_u64(7))
    }

    #[test]
    fn new_field_starts_inside_volume() {
        let field = ParticleField::new(2_000, StdRng::seed_from_u64(1));
        assert_eq!(field.len(), 2_000);
        for p in field.particles() {
            assert!(p.position.x.abs() <= PARTICLE_SPAWN_HALF_EXTENT);
            assert!(p.position.y.abs() <= PARTICLE_SPAWN_HALF_EXTENT);
            assert!(p.position.z >= Z_FAR && p.position.z <= 0.0);
            assert!(STAR_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn wrap_lateral_mirrors_past_limit() {
        assert_eq!(wrap_lateral(80.5), -75.0);
        assert_eq!(wrap_lateral(-81.0), 75.0);
        assert_eq!(wrap_lateral(80.0), 80.0);
        assert_eq!(wrap_lateral(-12.0), -12.0);
    }

    #[test]
    fn speed_scales_with_pointer_distance() {
        let field = field_with(Vec::new());
        assert_eq!(field.speed_for(PointerVector::CENTER), 30.0);
        assert_eq!(field.speed_for(PointerVector::new(1.0, 0.0)), 90.0);
        assert_eq!(field.speed_for(PointerVector::new(0.0, -1.0)), 90.0);
    }

    #[test]
    fn lateral_drift_follows_pointer() {
        let mut field = field_with(vec![Particle::new(Vec3::new(0.0, 0.0, -100.0), [1.0; 3])]);
        field.tick(0.1, PointerVector::new(1.0, -1.0));
        let p = field.particles()[0].position;
        assert!((p.x - 0.5).abs() < 1e-5);
        assert!((p.y + 0.5).abs() < 1e-5);
    }

    #[test]
    fn respawned_particle_keeps_its_color() {
        let color = STAR_PALETTE[3];
        let mut field = field_with(vec![Particle::new(Vec3::new(10.0, 10.0, 49.9), color)]);
        field.tick(1.0, PointerVector::CENTER);
        let p = field.particles()[0];
        assert_eq!(p.position.z, Z_FAR);
        assert_eq!(p.color, color);
        assert_eq!(field.total_respawns(), 1);
    }

    #[test]
    fn wrap_applies_to_each_axis() {
        let mut field = field_with(vec![Particle::new(Vec3::new(79.9, -79.9, 0.0), [1.0; 3])]);
        field.tick(0.1, PointerVector::new(1.0, -1.0));
        let p = field.particles()[0].position;
        assert_eq!(p.x, -75.0);
        assert_eq!(p.y, 75.0);
    }
}
