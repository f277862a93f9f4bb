//! Pointer tracking.
//!
//! Converts viewport pixel coordinates into a normalized vector where the
//! viewport spans [-1, 1] on both axes and +y points up. The tracker keeps
//! only the most recent event; consumers take one [`PointerVector`] snapshot
//! per frame and hand it to every updater.

use glam::Vec2;

/// Normalized pointer position. Not clamped: pointers outside the viewport
/// produce components beyond [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerVector {
    pub x: f64,
    pub y: f64,
}

impl PointerVector {
    pub const CENTER: PointerVector = PointerVector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the viewport center in normalized units.
    #[inline]
    pub fn distance(self) -> f32 {
        self.as_vec2().length()
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Last-write-wins store of the latest pointer position.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    latest: Option<PointerVector>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-move event given in viewport pixels.
    pub fn on_pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) {
        self.latest = Some(normalize_pointer(
            client_x,
            client_y,
            viewport_width,
            viewport_height,
        ));
    }

    /// Latest normalized position, or the center if nothing was recorded yet.
    #[inline]
    pub fn current(&self) -> PointerVector {
        self.latest.unwrap_or_default()
    }
}

#[inline]
pub fn normalize_pointer(
    client_x: f64,
    client_y: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> PointerVector {
    PointerVector {
        x: (client_x / viewport_width) * 2.0 - 1.0,
        y: -(client_y / viewport_height) * 2.0 + 1.0,
    }
}
