//! Static shell of distant stars behind the warp field.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use crate::constants::{BACKDROP_DEPTH, BACKDROP_RADIUS, BACKDROP_SATURATION};
use crate::palette::{desaturate, STAR_PALETTE};
use crate::particles::Particle;

/// Stars placed uniformly on directions of the unit sphere, at a distance in
/// `[radius, radius + depth]`. Uses the particle layout so one pipeline draws both.
pub fn generate_backdrop(count: usize, rng: &mut StdRng) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let dir = random_unit_vector(rng);
            let dist = BACKDROP_RADIUS + rng.gen_range(0.0..=BACKDROP_DEPTH);
            let base = STAR_PALETTE[rng.gen_range(0..STAR_PALETTE.len())];
            Particle::new(dir * dist, desaturate(base, BACKDROP_SATURATION))
        })
        .collect()
}

fn random_unit_vector(rng: &mut StdRng) -> Vec3 {
    // z uniform in [-1, 1] with a uniform azimuth gives a uniform sphere
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let phi: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn backdrop_lies_on_shell() {
        let mut rng = StdRng::seed_from_u64(11);
        let stars = generate_backdrop(1_000, &mut rng);
        assert_eq!(stars.len(), 1_000);
        for s in &stars {
            let d = s.position.length();
            assert!(d >= BACKDROP_RADIUS - 1e-2);
            assert!(d <= BACKDROP_RADIUS + BACKDROP_DEPTH + 1e-2);
        }
    }

    #[test]
    fn backdrop_covers_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(5);
        let stars = generate_backdrop(500, &mut rng);
        assert!(stars.iter().any(|s| s.position.z > 0.0));
        assert!(stars.iter().any(|s| s.position.z < 0.0));
    }
}
