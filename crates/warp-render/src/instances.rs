//! CPU-side GPU layouts and the per-frame instance lists built from a
//! [`FrameView`]. Kept free of wgpu handles so it can be tested on the host.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};
use warp_core::{
    CorePose, FrameView, ThemeColor, BACKDROP_OPACITY, BACKDROP_STAR_SIZE, FOG_FAR, FOG_NEAR,
    STAR_OPACITY, STAR_SIZE, STREAK_OPACITY,
};

// Glow detail
pub const RING_SEGMENTS: usize = 48;
pub const RING_BEAD_RADIUS: f32 = 0.06;
pub const CORE_OPACITY: f32 = 0.9;
pub const CORE_HIGHLIGHT_OPACITY: f32 = 0.5;
pub const NEBULA_LOBE_OFFSET: f32 = 0.35; // fraction of the nebula scale

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
    pub eye: [f32; 4],
    pub fog_color: [f32; 4],
    pub fog: [f32; 4],
    pub backdrop: [f32; 4],
}

impl Globals {
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        let (right, up) = billboard_axes(frame.camera.eye, frame.camera.target, frame.camera.up);
        let eye = frame.camera.eye;
        let bg = ThemeColor::Background.rgb();
        Self {
            view_proj: frame.view_proj.to_cols_array_2d(),
            cam_right: [right.x, right.y, right.z, STAR_SIZE],
            cam_up: [up.x, up.y, up.z, STAR_OPACITY],
            eye: [eye.x, eye.y, eye.z, STREAK_OPACITY],
            fog_color: [bg[0], bg[1], bg[2], 1.0],
            fog: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
            backdrop: [BACKDROP_STAR_SIZE, BACKDROP_OPACITY, 0.0, 0.0],
        }
    }
}

/// Fog blend at `dist` for the `fog` uniform, as `apply_fog` computes it
/// in the shader: 0 is untouched, 1 is fully the fog color.
pub fn fog_factor(fog: [f32; 4], dist: f32) -> f32 {
    let span = (fog[1] - fog[0]).max(0.0001);
    ((dist - fog[0]) / span).clamp(0.0, 1.0)
}

/// World-space right and up vectors of a look-at camera.
pub fn billboard_axes(eye: Vec3, target: Vec3, up: Vec3) -> (Vec3, Vec3) {
    let forward = (target - eye).normalize_or_zero();
    let right = forward.cross(up).normalize_or_zero();
    let true_up = right.cross(forward);
    (right, true_up)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GlowInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

impl GlowInstance {
    pub fn new(position: Vec3, radius: f32, color: ThemeColor, opacity: f32) -> Self {
        let rgb = color.rgb();
        Self {
            position: position.to_array(),
            radius,
            color: [rgb[0], rgb[1], rgb[2], opacity],
        }
    }
}

/// Fill `out` with glow sprites for one frame. Returns how many leading
/// entries belong to the background layer (nebulae), drawn before the stars.
pub fn build_glow_instances(frame: &FrameView<'_>, out: &mut Vec<GlowInstance>) -> usize {
    out.clear();

    for n in &frame.nebulae {
        let neb = n.nebula;
        let reach = neb.scale * NEBULA_LOBE_OFFSET;
        let lobes = [
            (Vec3::ZERO, 0.8),
            (n.rotation * Vec3::X * reach, 0.6),
            (n.rotation * Vec3::NEG_Y * reach, 0.55),
        ];
        for (offset, size) in lobes {
            out.push(GlowInstance::new(
                neb.position + offset,
                neb.scale * size,
                neb.color,
                neb.opacity(),
            ));
        }
    }
    let background = out.len();

    push_core(&frame.core, out);
    for o in &frame.orbiters {
        out.push(GlowInstance::new(o.position, o.size, o.color, o.opacity));
    }
    background
}

fn push_core(core: &CorePose, out: &mut Vec<GlowInstance>) {
    out.push(GlowInstance::new(
        core.center,
        core.effective_radius(),
        core.color,
        CORE_OPACITY,
    ));
    // Off-center highlight makes the spin visible on a billboard
    let highlight = core.tilt * core.spin * (Vec3::X * core.effective_radius() * 0.6);
    out.push(GlowInstance::new(
        core.center + highlight,
        core.effective_radius() * 0.3,
        ThemeColor::Accent2,
        CORE_HIGHLIGHT_OPACITY,
    ));
    for ring in &core.rings {
        let orient: Quat = core.tilt * ring.rotation;
        for i in 0..RING_SEGMENTS {
            let a = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
            let local = Vec3::new(a.cos() * ring.radius, a.sin() * ring.radius, 0.0);
            out.push(GlowInstance::new(
                core.center + orient * local,
                RING_BEAD_RADIUS,
                ring.color,
                ring.opacity,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_core::{
        PointerVector, Scene, SceneConfig, BACKDROP_DEPTH, BACKDROP_RADIUS, CORE_CENTER,
    };

    fn scene() -> Scene {
        Scene::new(&SceneConfig {
            particle_count: 4,
            streak_count: 2,
            backdrop_count: 0,
            ..SceneConfig::seeded(1)
        })
    }

    #[test]
    fn layouts_match_shader_strides() {
        assert_eq!(std::mem::size_of::<GlowInstance>(), 32);
        assert_eq!(std::mem::size_of::<Globals>(), 160);
        assert_eq!(std::mem::size_of::<warp_core::Particle>(), 24);
        assert_eq!(std::mem::size_of::<warp_core::LineVertex>(), 24);
    }

    #[test]
    fn glow_list_orders_background_first() {
        let s = scene();
        let view = s.view(1.0);
        let mut out = Vec::new();
        let background = build_glow_instances(&view, &mut out);
        assert_eq!(background, view.nebulae.len() * 3);
        let expected = background + 2 + 2 * RING_SEGMENTS + view.orbiters.len();
        assert_eq!(out.len(), expected);
        // Last entries are the orbiters, in order
        let tail = &out[out.len() - view.orbiters.len()..];
        for (g, o) in tail.iter().zip(&view.orbiters) {
            assert_eq!(g.position, o.position.to_array());
            assert_eq!(g.radius, o.size);
        }
    }

    #[test]
    fn ring_beads_sit_on_their_radius() {
        let mut s = scene();
        s.tick(1.3, PointerVector::new(0.4, -0.2));
        let view = s.view(1.0);
        let mut out = Vec::new();
        let background = build_glow_instances(&view, &mut out);
        let first_ring = &out[background + 2..background + 2 + RING_SEGMENTS];
        for bead in first_ring {
            let d = (Vec3::from(bead.position) - CORE_CENTER).length();
            assert!((d - view.core.rings[0].radius).abs() < 1e-3);
        }
    }

    fn wgsl_fn_body(name: &str) -> &'static str {
        let src = crate::SCENE_WGSL;
        let start = src
            .find(&format!("fn {name}("))
            .unwrap_or_else(|| panic!("missing {name}"));
        let rest = &src[start..];
        let end = rest.find("\n}").expect("unterminated fn");
        &rest[..end]
    }

    #[test]
    fn backdrop_would_vanish_in_star_fog() {
        let mut s = Scene::new(&SceneConfig {
            particle_count: 1,
            streak_count: 1,
            backdrop_count: 500,
            ..SceneConfig::seeded(1)
        });
        s.tick(1.0 / 60.0, PointerVector::new(0.7, -0.4));
        let view = s.view(16.0 / 9.0);
        let g = Globals::from_frame(&view);
        for star in view.backdrop {
            let d = (star.position - view.camera.eye).length();
            assert_eq!(fog_factor(g.fog, d), 1.0);
        }
    }

    #[test]
    fn backdrop_pass_is_unfogged() {
        let (vs, fs) = crate::renderer::BACKDROP_ENTRY_POINTS;
        assert!(wgsl_fn_body(vs).contains("globals.backdrop.x"));
        let body = wgsl_fn_body(fs);
        assert!(!body.contains("apply_fog"));
        assert!(body.contains("in.color.rgb"));
        // Star pass still fogs, so the separate entry is what keeps the shell visible
        let (_, star_fs) = crate::renderer::STAR_ENTRY_POINTS;
        assert!(wgsl_fn_body(star_fs).contains("apply_fog"));
    }

    #[test]
    fn farthest_backdrop_star_covers_pixels() {
        let s = scene();
        let view = s.view(16.0 / 9.0);
        let g = Globals::from_frame(&view);
        let far = BACKDROP_RADIUS + BACKDROP_DEPTH + view.camera.eye.length();
        let px_per_unit = 1080.0 / (2.0 * far * (view.camera.fovy_radians * 0.5).tan());
        assert!(g.backdrop[0] * px_per_unit >= 2.0);
        assert!(g.backdrop[1] > 0.0);
    }

    #[test]
    fn billboard_axes_are_orthonormal() {
        let (r, u) = billboard_axes(Vec3::new(1.0, 2.0, 15.0), Vec3::new(0.0, 0.0, -10.0), Vec3::Y);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!(u.y > 0.0);
    }
}
