pub mod instances;
pub mod renderer;
pub mod surface;

pub use instances::{billboard_axes, build_glow_instances, fog_factor, GlowInstance, Globals};
pub use renderer::SceneRenderer;
pub use surface::{recovery_for, SurfaceRecovery};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
