use glam::Vec3;

// Shared scene tuning constants used by both web and native frontends.

// Star field
pub const PARTICLE_COUNT: usize = 10_000;
pub const PARTICLE_BASE_SPEED: f32 = 30.0; // units per second with the pointer centered
pub const PARTICLE_SPAWN_HALF_EXTENT: f32 = 75.0; // respawn x/y range is [-75, 75]
pub const PARTICLE_WRAP_LIMIT: f32 = 80.0; // lateral bound that triggers a wrap
pub const PARTICLE_DRIFT_GAIN: f32 = 10.0; // lateral drift units per second per unit of heading
pub const PARTICLE_HEADING_GAIN: f32 = 0.5; // pointer -> lateral heading

// Shared travel volume
pub const Z_NEAR: f32 = 50.0; // exiting past this respawns
pub const Z_FAR: f32 = -200.0; // star respawn depth

// Pointer -> speed mapping: 1x at the center, 3x at a corner-ish distance of 1
pub const SPEED_DISTANCE_GAIN: f32 = 2.0;

// Streaks
pub const STREAK_COUNT: usize = 400;
pub const STREAK_BASE_SPEED: f32 = 40.0;
pub const STREAK_SPAWN_HALF_EXTENT: f32 = 50.0;
pub const STREAK_FAR: f32 = -150.0;
pub const STREAK_LENGTH: f32 = 5.0;
pub const STREAK_START_COLOR: [f32; 3] = [0.4, 0.4, 1.0];
pub const STREAK_END_COLOR: [f32; 3] = [0.7, 0.5, 1.0];

// Camera
pub const CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOVY_DEGREES: f32 = 70.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 0.0, -10.0);
pub const CAMERA_GAIN_X: f32 = 3.0; // pointer x -> camera x target
pub const CAMERA_GAIN_Y: f32 = 2.0; // pointer y -> camera y target
pub const CAMERA_SMOOTHING: f32 = 0.05; // fraction of the remaining gap closed per frame
pub const REFERENCE_FRAME_RATE: f32 = 60.0; // refresh rate the per-frame factor was tuned at

// Orbiters
pub const ORBITER_POINTER_GAIN: f32 = 3.0;

// Backdrop star shell
pub const BACKDROP_COUNT: usize = 2_000;
pub const BACKDROP_RADIUS: f32 = 150.0;
pub const BACKDROP_DEPTH: f32 = 100.0;
pub const BACKDROP_SATURATION: f32 = 0.5;
// Far stars are drawn larger and without fog so they read at 150+ units
pub const BACKDROP_STAR_SIZE: f32 = 1.2;
pub const BACKDROP_OPACITY: f32 = 0.8;

// Energy core
pub const CORE_CENTER: Vec3 = Vec3::new(0.0, 0.0, -8.0);
pub const CORE_RADIUS: f32 = 1.5;
pub const CORE_TILT_GAIN: f32 = 0.3;

// Material opacity
pub const STAR_SIZE: f32 = 0.2;
pub const STAR_OPACITY: f32 = 0.85;
pub const STREAK_OPACITY: f32 = 0.4;
pub const ORBITER_OPACITY: f32 = 0.7;
pub const NEBULA_OPACITY: f32 = 0.1;

// Fog
pub const FOG_NEAR: f32 = 40.0;
pub const FOG_FAR: f32 = 120.0;
