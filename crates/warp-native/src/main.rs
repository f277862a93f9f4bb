use std::time::Instant;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use warp_core::{AnimationSession, SceneConfig};
use warp_render::{recovery_for, SceneRenderer, SurfaceRecovery};

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
    session: AnimationSession,
    width: u32,
    height: u32,
    last_frame: Instant,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, session: AnimationSession) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        log::info!("[gpu] {:?} {}x{}", adapter.get_info().backend, config.width, config.height);

        let renderer = SceneRenderer::new(&device, format);
        Ok(Self {
            window,
            surface,
            device,
            queue,
            width: config.width,
            height: config.height,
            config,
            renderer,
            session,
            last_frame: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let size = self.window.inner_size();
        // Minimized windows report zero; keep the last pointer
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.session
            .on_pointer_move(x, y, size.width as f64, size.height as f64);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        if !self.session.frame(dt) {
            return Ok(());
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let scene_view = self.session.scene().view(aspect);
        self.renderer
            .render(&self.device, &self.queue, &view, &scene_view);
        frame.present();
        Ok(())
    }
}

/// Scene config from `key=value` command-line arguments, e.g. `particles=2000 seed=7`.
fn config_from_args() -> anyhow::Result<SceneConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let pairs = args
        .iter()
        .map(|a| a.split_once('=').unwrap_or((a.as_str(), "")));
    Ok(SceneConfig::default().apply_overrides(pairs)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = config_from_args()?;
    let session = AnimationSession::mount(&config);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Warpfield (native)")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window, session))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => state.on_cursor_moved(position.x, position.y),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            state.session.teardown();
            elwt.exit();
        }
        Event::AboutToWait => match state.render() {
            Ok(_) => state.window.request_redraw(),
            Err(e) => match recovery_for(&e) {
                SurfaceRecovery::Reconfigure => state.resize(state.window.inner_size()),
                SurfaceRecovery::Stop => {
                    log::error!("[gpu] {e:?}; exiting");
                    state.session.teardown();
                    elwt.exit();
                }
                SurfaceRecovery::SkipFrame => log::warn!("[gpu] {e:?}"),
            },
        },
        _ => {}
    })?;
    Ok(())
}
