#![cfg(target_arch = "wasm32")]
mod dom;
mod frame;
mod gpu;

use frame::{Hero, TickCell};
use std::cell::RefCell;
use std::rc::Rc;
use warp_core::{split_query, AnimationSession, SceneConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Canvas mounted automatically at startup when present.
pub const DEFAULT_CANVAS_ID: &str = "warp-canvas";

const MOUSEMOVE: &str = "mousemove";
const RESIZE: &str = "resize";

thread_local! {
    static AUTO_HERO: RefCell<Option<HeroHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("warp-web starting");

    let has_default = dom::window_document()
        .and_then(|d| d.get_element_by_id(DEFAULT_CANVAS_ID))
        .is_some();
    if has_default {
        spawn_local(async move {
            match mount(DEFAULT_CANVAS_ID).await {
                Ok(handle) => AUTO_HERO.with(|slot| *slot.borrow_mut() = Some(handle)),
                Err(e) => log::error!("init error: {:?}", e),
            }
        });
    }
    Ok(())
}

/// Mount the hero scene onto the canvas with id `canvas_id`.
///
/// Scene overrides are read from the page query string (`?particles=2000&seed=7`).
/// Call `unmount` (or drop the handle) to stop the loop and detach listeners.
#[wasm_bindgen(js_name = mountHero)]
pub async fn mount_hero(canvas_id: String) -> Result<HeroHandle, JsValue> {
    mount(&canvas_id)
        .await
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Unmount the hero started automatically on `#warp-canvas`, if any.
#[wasm_bindgen(js_name = unmountDefaultHero)]
pub fn unmount_default_hero() {
    if let Some(mut handle) = AUTO_HERO.with(|slot| slot.borrow_mut().take()) {
        handle.unmount();
    }
}

fn scene_config() -> SceneConfig {
    let query = dom::location_query();
    match SceneConfig::default().apply_overrides(split_query(&query)) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[config] ignoring query overrides: {e}");
            SceneConfig::default()
        }
    }
}

async fn mount(canvas_id: &str) -> anyhow::Result<HeroHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas = dom::canvas_by_id(canvas_id)?;
    dom::sync_canvas_backing_size(&canvas);

    let gpu = gpu::GpuState::new(&canvas).await?;
    let session = AnimationSession::mount(&scene_config());
    let hero = Rc::new(RefCell::new(Hero::new(session, gpu, canvas.clone())));

    let hero_ptr = hero.clone();
    let pointer_listener: Closure<dyn FnMut(web::MouseEvent)> =
        Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let Some(w) = web::window() else { return };
            // A collapsed viewport would divide by zero; keep the last pointer instead
            let Some((vw, vh)) = dom::viewport_size(&w) else {
                return;
            };
            if let Ok(mut h) = hero_ptr.try_borrow_mut() {
                h.session
                    .on_pointer_move(ev.client_x() as f64, ev.client_y() as f64, vw, vh);
            }
        }) as Box<dyn FnMut(web::MouseEvent)>);

    let canvas_resize = canvas.clone();
    let resize_listener: Closure<dyn FnMut()> = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);

    // Closures belong to the handle before they are attached, so an early
    // return drops the handle and detaches them.
    let mut handle = HeroHandle {
        hero: hero.clone(),
        tick: Rc::new(RefCell::new(None)),
        pointer_listener: Some(pointer_listener),
        resize_listener: Some(resize_listener),
    };
    handle.attach(&window)?;

    handle.tick = frame::start_loop(hero);
    log::info!("[mount] hero running on #{canvas_id}");
    Ok(handle)
}

/// Owner of a mounted hero. Dropping it has the same effect as `unmount`.
#[wasm_bindgen]
pub struct HeroHandle {
    hero: Rc<RefCell<Hero>>,
    tick: TickCell,
    pointer_listener: Option<Closure<dyn FnMut(web::MouseEvent)>>,
    resize_listener: Option<Closure<dyn FnMut()>>,
}

impl HeroHandle {
    fn attach(&self, window: &web::Window) -> anyhow::Result<()> {
        if let Some(cb) = &self.pointer_listener {
            window
                .add_event_listener_with_callback(MOUSEMOVE, cb.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!(format!("mousemove listener: {:?}", e)))?;
        }
        if let Some(cb) = &self.resize_listener {
            window
                .add_event_listener_with_callback(RESIZE, cb.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!(format!("resize listener: {:?}", e)))?;
        }
        Ok(())
    }
}

#[wasm_bindgen]
impl HeroHandle {
    /// Stop the frame loop, detach listeners and tear the session down.
    /// Calling it again does nothing.
    pub fn unmount(&mut self) {
        if let Some(w) = web::window() {
            if let Some(cb) = self.pointer_listener.take() {
                let _ = w.remove_event_listener_with_callback(MOUSEMOVE, cb.as_ref().unchecked_ref());
            }
            if let Some(cb) = self.resize_listener.take() {
                let _ = w.remove_event_listener_with_callback(RESIZE, cb.as_ref().unchecked_ref());
            }
        }
        if let Ok(mut h) = self.hero.try_borrow_mut() {
            h.cancel_frame();
            h.session.teardown();
        }
        self.tick.borrow_mut().take();
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.hero
            .try_borrow()
            .map(|h| h.session.is_mounted())
            .unwrap_or(false)
    }

    /// Frames simulated so far.
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.hero
            .try_borrow()
            .map(|h| h.session.scene().frames() as f64)
            .unwrap_or(0.0)
    }
}

impl Drop for HeroHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}
