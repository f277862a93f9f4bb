//! Parallax camera.
//!
//! The rig eases its lateral position toward a pointer-scaled target and keeps
//! looking at a fixed focal point down the forward axis. `Camera` is the plain
//! perspective description the renderer turns into matrices.

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{
    CAMERA_FOVY_DEGREES, CAMERA_GAIN_X, CAMERA_GAIN_Y, CAMERA_LOOK_AT, CAMERA_SMOOTHING,
    CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, REFERENCE_FRAME_RATE,
};
use crate::pointer::PointerVector;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// How the rig closes the gap to its target each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
    /// Fixed fraction per tick regardless of `dt`; convergence speed follows
    /// the display refresh rate.
    PerFrame(f32),
    /// `1 - exp(-rate * dt)` per tick; same feel on every refresh rate.
    TimeNormalized { rate: f32 },
}

impl Smoothing {
    /// Time-normalized rate that reproduces `CAMERA_SMOOTHING` at 60 Hz.
    pub fn matched_rate() -> f32 {
        -(1.0 - CAMERA_SMOOTHING).ln() * REFERENCE_FRAME_RATE
    }

    #[inline]
    pub fn alpha(self, dt: f32) -> f32 {
        match self {
            Smoothing::PerFrame(alpha) => alpha,
            Smoothing::TimeNormalized { rate } => 1.0 - (-rate * dt).exp(),
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::PerFrame(CAMERA_SMOOTHING)
    }
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    offset: Vec2,
    distance: f32,
    look_at: Vec3,
    smoothing: Smoothing,
}

impl CameraRig {
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            offset: Vec2::ZERO,
            distance: CAMERA_Z,
            look_at: CAMERA_LOOK_AT,
            smoothing,
        }
    }

    /// Target lateral position for a pointer.
    #[inline]
    pub fn target_for(pointer: PointerVector) -> Vec2 {
        let p = pointer.as_vec2();
        Vec2::new(p.x * CAMERA_GAIN_X, p.y * CAMERA_GAIN_Y)
    }

    pub fn tick(&mut self, dt: f32, pointer: PointerVector) {
        let target = Self::target_for(pointer);
        let alpha = self.smoothing.alpha(dt);
        self.offset.x += (target.x - self.offset.x) * alpha;
        self.offset.y += (target.y - self.offset.y) * alpha;
    }

    /// Current lateral position `(camera_x, camera_y)`.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(self.offset.x, self.offset.y, self.distance)
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.look_at,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Smoothing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_closes_five_percent() {
        let mut rig = CameraRig::default();
        rig.tick(1.0 / 60.0, PointerVector::new(1.0, 1.0));
        assert!((rig.offset().x - 0.15).abs() < 1e-5);
        assert!((rig.offset().y - 0.10).abs() < 1e-5);
    }

    #[test]
    fn per_frame_ignores_dt() {
        let mut a = CameraRig::default();
        let mut b = CameraRig::default();
        a.tick(1.0 / 144.0, PointerVector::new(0.5, 0.0));
        b.tick(1.0 / 30.0, PointerVector::new(0.5, 0.0));
        assert_eq!(a.offset(), b.offset());
    }

    #[test]
    fn time_normalized_matches_per_frame_at_reference_rate() {
        let s = Smoothing::TimeNormalized {
            rate: Smoothing::matched_rate(),
        };
        assert!((s.alpha(1.0 / REFERENCE_FRAME_RATE) - CAMERA_SMOOTHING).abs() < 1e-5);
        assert!(s.alpha(1.0 / 30.0) > s.alpha(1.0 / 120.0));
    }

    #[test]
    fn camera_looks_at_focal_point() {
        let rig = CameraRig::default();
        let cam = rig.camera(16.0 / 9.0);
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, CAMERA_Z));
        assert_eq!(cam.target, CAMERA_LOOK_AT);
        let clip = cam.view_projection() * CAMERA_LOOK_AT.extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }
}
