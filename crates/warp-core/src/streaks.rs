//! Speed-line streaks: short two-point segments that share the star field's
//! recycling pattern but travel faster and never drift sideways.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use crate::constants::{
    STREAK_BASE_SPEED, STREAK_END_COLOR, STREAK_FAR, STREAK_LENGTH, STREAK_SPAWN_HALF_EXTENT,
    STREAK_START_COLOR, Z_NEAR,
};
use crate::particles::speed_multiplier;
use crate::pointer::PointerVector;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: Vec3,
    pub color: [f32; 3],
}

/// Two endpoints laid out back to back so a streak slice is a line list.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Streak {
    pub start: LineVertex,
    pub end: LineVertex,
}

impl Streak {
    /// A streak whose start sits at `(x, y, z)` and end `STREAK_LENGTH` closer.
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            start: LineVertex {
                position: Vec3::new(x, y, z),
                color: STREAK_START_COLOR,
            },
            end: LineVertex {
                position: Vec3::new(x, y, z + STREAK_LENGTH),
                color: STREAK_END_COLOR,
            },
        }
    }

    #[inline]
    fn place(&mut self, x: f32, y: f32, z: f32) {
        self.start.position = Vec3::new(x, y, z);
        self.end.position = Vec3::new(x, y, z + STREAK_LENGTH);
    }
}

pub struct StreakField {
    streaks: Vec<Streak>,
    base_speed: f32,
    rng: StdRng,
    respawns: u64,
}

impl StreakField {
    pub fn new(count: usize, mut rng: StdRng) -> Self {
        let streaks = (0..count)
            .map(|_| {
                Streak::at(
                    rng.gen_range(-STREAK_SPAWN_HALF_EXTENT..=STREAK_SPAWN_HALF_EXTENT),
                    rng.gen_range(-STREAK_SPAWN_HALF_EXTENT..=STREAK_SPAWN_HALF_EXTENT),
                    rng.gen_range(STREAK_FAR..=0.0),
                )
            })
            .collect();
        Self::from_streaks(streaks, rng)
    }

    pub fn from_streaks(streaks: Vec<Streak>, rng: StdRng) -> Self {
        Self {
            streaks,
            base_speed: STREAK_BASE_SPEED,
            rng,
            respawns: 0,
        }
    }

    #[inline]
    pub fn speed_for(&self, pointer: PointerVector) -> f32 {
        self.base_speed * speed_multiplier(pointer)
    }

    pub fn tick(&mut self, dt: f32, pointer: PointerVector) {
        let dz = dt * self.speed_for(pointer);
        for s in self.streaks.iter_mut() {
            s.start.position.z += dz;
            s.end.position.z += dz;
            // The start endpoint decides; the end is always STREAK_LENGTH ahead of it.
            if s.start.position.z > Z_NEAR {
                let x = self
                    .rng
                    .gen_range(-STREAK_SPAWN_HALF_EXTENT..=STREAK_SPAWN_HALF_EXTENT);
                let y = self
                    .rng
                    .gen_range(-STREAK_SPAWN_HALF_EXTENT..=STREAK_SPAWN_HALF_EXTENT);
                s.place(x, y, STREAK_FAR);
                self.respawns += 1;
            }
        }
    }

    #[inline]
    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    /// Endpoints flattened in start/end order, ready for a line list.
    pub fn vertices(&self) -> &[LineVertex] {
        bytemuck::cast_slice(&self.streaks)
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }

    pub fn total_respawns(&self) -> u64 {
        self.respawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn new_streaks_have_fixed_length_and_colors() {
        let field = StreakField::new(300, StdRng::seed_from_u64(3));
        for s in field.streaks() {
            assert!((s.end.position.z - s.start.position.z - STREAK_LENGTH).abs() < 1e-4);
            assert_eq!(s.start.position.x, s.end.position.x);
            assert_eq!(s.start.color, STREAK_START_COLOR);
            assert_eq!(s.end.color, STREAK_END_COLOR);
            assert!(s.start.position.z >= STREAK_FAR && s.start.position.z <= 0.0);
        }
    }

    #[test]
    fn both_endpoints_advance_together() {
        let mut field =
            StreakField::from_streaks(vec![Streak::at(1.0, 2.0, -20.0)], StdRng::seed_from_u64(1));
        field.tick(0.5, PointerVector::CENTER);
        let s = field.streaks()[0];
        assert!((s.start.position.z - 0.0).abs() < 1e-5);
        assert!((s.end.position.z - 5.0).abs() < 1e-5);
        assert_eq!(s.start.position.x, 1.0);
        assert_eq!(s.start.position.y, 2.0);
    }

    #[test]
    fn respawn_resets_both_endpoints() {
        let mut field =
            StreakField::from_streaks(vec![Streak::at(1.0, 2.0, 45.0)], StdRng::seed_from_u64(1));
        field.tick(1.0, PointerVector::new(1.0, 0.0));
        let s = field.streaks()[0];
        assert_eq!(s.start.position.z, STREAK_FAR);
        assert_eq!(s.end.position.z, STREAK_FAR + STREAK_LENGTH);
        assert!(s.start.position.x.abs() <= STREAK_SPAWN_HALF_EXTENT);
        assert_eq!(s.start.position.x, s.end.position.x);
        assert_eq!(s.start.color, STREAK_START_COLOR);
        assert_eq!(field.total_respawns(), 1);
    }

    #[test]
    fn pointer_distance_triples_speed() {
        let field = StreakField::from_streaks(Vec::new(), StdRng::seed_from_u64(1));
        assert_eq!(field.speed_for(PointerVector::CENTER), 40.0);
        assert_eq!(field.speed_for(PointerVector::new(-1.0, 0.0)), 120.0);
    }

    #[test]
    fn vertices_interleave_start_and_end() {
        let field = StreakField::from_streaks(
            vec![Streak::at(0.0, 0.0, -10.0), Streak::at(3.0, 3.0, -20.0)],
            StdRng::seed_from_u64(1),
        );
        let v = field.vertices();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0].position.z, -10.0);
        assert_eq!(v[1].position.z, -5.0);
        assert_eq!(v[2].position.x, 3.0);
    }
}
