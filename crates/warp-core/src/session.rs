//! Mount-scoped animation session.
//!
//! A session owns the scene and its pointer tracker for as long as the view is
//! mounted. After `teardown` neither pointer events nor frames touch any state,
//! so a late callback racing the front-end's deregistration is harmless.

use crate::config::SceneConfig;
use crate::pointer::{PointerTracker, PointerVector};
use crate::scene::Scene;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Mounted,
    TornDown,
}

pub struct AnimationSession {
    scene: Scene,
    pointer: PointerTracker,
    state: Lifecycle,
}

impl AnimationSession {
    pub fn mount(config: &SceneConfig) -> Self {
        let session = Self::with_scene(Scene::new(config));
        log::info!(
            "[session] mounted particles={} streaks={}",
            config.particle_count,
            config.streak_count
        );
        session
    }

    pub fn with_scene(scene: Scene) -> Self {
        Self {
            scene,
            pointer: PointerTracker::new(),
            state: Lifecycle::Mounted,
        }
    }

    /// Feed a pointer-move event. Returns false once torn down.
    pub fn on_pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.pointer
            .on_pointer_move(client_x, client_y, viewport_width, viewport_height);
        true
    }

    /// Run one frame with a single pointer snapshot. Returns false once torn down.
    pub fn frame(&mut self, dt: f32) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let snapshot = self.pointer.current();
        self.scene.tick(dt, snapshot);
        true
    }

    /// Stop accepting input and frames. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.state == Lifecycle::TornDown {
            return;
        }
        self.state = Lifecycle::TornDown;
        log::info!(
            "[session] torn down after {} frames ({:.1}s), respawns stars={} streaks={}",
            self.scene.frames(),
            self.scene.elapsed(),
            self.scene.particles.total_respawns(),
            self.scene.streaks.total_respawns()
        );
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.state == Lifecycle::Mounted
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    pub fn pointer(&self) -> PointerVector {
        self.pointer.current()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SceneConfig {
        SceneConfig {
            particle_count: 16,
            streak_count: 4,
            backdrop_count: 0,
            ..SceneConfig::seeded(8)
        }
    }

    #[test]
    fn frame_reads_latest_pointer() {
        let mut s = AnimationSession::mount(&small());
        assert!(s.on_pointer_move(100.0, 0.0, 100.0, 100.0));
        assert!(s.frame(1.0 / 60.0));
        assert_eq!(s.scene().pointer(), PointerVector::new(1.0, 1.0));
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut s = AnimationSession::mount(&small());
        s.teardown();
        s.teardown();
        assert_eq!(s.lifecycle(), Lifecycle::TornDown);
    }
}
