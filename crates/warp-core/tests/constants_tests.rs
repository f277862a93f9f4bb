// Host-side tests for tuning constants and their relationships.

use warp_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn travel_volume_is_consistent() {
    // Respawn depths lie behind the near bound
    assert!(Z_FAR < Z_NEAR);
    assert!(STREAK_FAR < Z_NEAR);
    assert!(STREAK_FAR > Z_FAR);

    // Respawned stars never trigger an immediate wrap
    assert!(PARTICLE_SPAWN_HALF_EXTENT < PARTICLE_WRAP_LIMIT);
    assert!(STREAK_LENGTH > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn speeds_and_smoothing_are_sane() {
    assert!(PARTICLE_BASE_SPEED > 0.0);
    assert!(STREAK_BASE_SPEED > PARTICLE_BASE_SPEED);
    assert!(CAMERA_SMOOTHING > 0.0 && CAMERA_SMOOTHING < 1.0);
    assert!(REFERENCE_FRAME_RATE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_sees_the_scene() {
    // Camera sits in front of the focal point and inside the clip range
    assert!(CAMERA_Z > CAMERA_LOOK_AT.z);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZFAR > CAMERA_ZNEAR);
    assert!(CAMERA_ZFAR > BACKDROP_RADIUS + BACKDROP_DEPTH + CAMERA_Z);
    assert!(FOG_FAR > FOG_NEAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn opacities_are_in_unit_range() {
    for o in [STAR_OPACITY, STREAK_OPACITY, ORBITER_OPACITY, NEBULA_OPACITY] {
        assert!(o > 0.0 && o <= 1.0);
    }
    for c in STAR_PALETTE.iter().flatten() {
        assert!((0.0..=1.0).contains(c));
    }
}
