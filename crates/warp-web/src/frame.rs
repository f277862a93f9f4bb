use crate::dom;
use crate::gpu::GpuState;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use warp_core::AnimationSession;
use warp_render::{recovery_for, SurfaceRecovery};
use web_sys as web;

pub type TickCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything one mounted hero needs between animation frames.
pub struct Hero {
    pub session: AnimationSession,
    pub gpu: GpuState,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
    pub raf_id: Option<i32>,
}

impl Hero {
    pub fn new(session: AnimationSession, gpu: GpuState, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            session,
            gpu,
            canvas,
            last_instant: Instant::now(),
            raf_id: None,
        }
    }

    /// Advance and draw one frame. Returns false once the session is torn down.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if !self.session.frame(dt) {
            return false;
        }

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        let view = self.session.scene().view(self.gpu.aspect());
        if let Err(e) = self.gpu.render(&view) {
            match recovery_for(&e) {
                SurfaceRecovery::Reconfigure => {
                    log::warn!("[gpu] surface {:?}; reconfiguring", e);
                    self.gpu.reconfigure();
                }
                SurfaceRecovery::Stop => {
                    log::error!("[gpu] {:?}; stopping the frame loop", e);
                    self.session.teardown();
                    return false;
                }
                SurfaceRecovery::SkipFrame => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }
        true
    }

    /// Cancel a pending animation frame, if any.
    pub fn cancel_frame(&mut self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

/// Start the requestAnimationFrame loop. The returned cell owns the callback;
/// taking it out of the cell breaks the self-reference and ends the loop.
pub fn start_loop(hero: Rc<RefCell<Hero>>) -> TickCell {
    let tick: TickCell = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let hero_tick = hero.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut h = hero_tick.borrow_mut();
        h.raf_id = None;
        if !h.frame() {
            return;
        }
        // Canvas CSS size can change without a window resize
        dom::sync_canvas_backing_size(&h.canvas);
        h.raf_id = tick_clone.borrow().as_ref().and_then(request_frame);
    }) as Box<dyn FnMut()>));

    let id = tick.borrow().as_ref().and_then(request_frame);
    hero.borrow_mut().raf_id = id;
    tick
}
