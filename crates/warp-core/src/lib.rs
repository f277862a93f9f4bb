pub mod backdrop;
pub mod camera;
pub mod config;
pub mod constants;
pub mod ornaments;
pub mod palette;
pub mod particles;
pub mod pointer;
pub mod scene;
pub mod session;
pub mod streaks;

pub use camera::{Camera, CameraRig, Smoothing};
pub use config::{split_query, ConfigError, SceneConfig};
pub use constants::*;
pub use ornaments::{CorePose, Nebula, Orbiter, Ring};
pub use palette::{ThemeColor, STAR_PALETTE};
pub use particles::{Particle, ParticleField};
pub use pointer::{PointerTracker, PointerVector};
pub use scene::{FrameView, NebulaView, OrbiterView, Scene};
pub use session::{AnimationSession, Lifecycle};
pub use streaks::{LineVertex, Streak, StreakField};
