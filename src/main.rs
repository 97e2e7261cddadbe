mod config;
mod lifecycle;
mod particle;
mod physics;
mod render;
mod renderer;
mod shaders;
mod simulation;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use config::AppSettings;
use lifecycle::{CounterStore, FileCounterStore};
use particle::{Theme, Vec2};
use render::Circle;
use renderer::CircleRenderer;
use simulation::Simulation;

/// How often the window title re-reads the persisted capture counter.
const COUNTER_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

struct State<'window> {
    window: Arc<winit::window::Window>,
    surface: wgpu::Surface<'window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    simulation: Simulation,
    circle_renderer: CircleRenderer,
    circles: Vec<Circle>,
    rng: StdRng,
    theme: Theme,
    pointer: Option<Vec2>,
    started: Instant,
    /// Independent reader over the same storage the simulation writes to.
    counter_reader: FileCounterStore,
    last_counter_poll: Instant,
}

impl<'window> State<'window> {
    async fn new(window: Arc<winit::window::Window>, settings: AppSettings) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
            flags: wgpu::InstanceFlags::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating render surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("no compatible graphics adapter"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await
            .context("requesting graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let theme = settings.theme();
        let mut rng = StdRng::from_entropy();
        let simulation = Simulation::new(
            settings,
            num_cpus::get(),
            size.width as f32,
            size.height as f32,
            Box::new(FileCounterStore::open_default()),
            theme,
            0.0,
            &mut rng,
        );

        // Field + golden glow layers and sparks.
        let capacity = simulation.config().particle_count * 2 + 8;
        let circle_renderer = CircleRenderer::new(&device, surface_format, capacity);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            simulation,
            circle_renderer,
            circles: Vec::new(),
            rng,
            theme,
            pointer: None,
            started: Instant::now(),
            counter_reader: FileCounterStore::open_default(),
            last_counter_poll: Instant::now(),
        })
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1_000.0
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.simulation.resize(
                new_size.width as f32,
                new_size.height as f32,
                num_cpus::get(),
                &mut self.rng,
            );
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(Vec2::new(position.x as f32, position.y as f32));
                let now = self.now_ms();
                self.simulation.record_activity(now);
                true
            }
            WindowEvent::CursorEntered { .. } => {
                let now = self.now_ms();
                self.simulation.record_activity(now);
                true
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, .. } => {
                let now = self.now_ms();
                self.simulation.record_activity(now);
                true
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::KeyT),
                        ..
                    },
                ..
            } => {
                self.theme = match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
                true
            }
            _ => false,
        }
    }

    fn update(&mut self) {
        let now_ms = self.now_ms();
        self.simulation.tick(now_ms, self.pointer, self.theme, &mut self.rng);

        // The title stands in for the page header: it polls the persisted
        // counter on its own interval rather than asking the simulation.
        if self.last_counter_poll.elapsed() >= COUNTER_POLL_INTERVAL {
            let count = self.counter_reader.load();
            self.window.set_title(&format!("Gravity Well - captures: {}", count));
            self.last_counter_poll = Instant::now();
        }
    }

    fn render(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        render::compose_frame(
            &self.simulation.particles,
            &self.simulation.golden,
            self.theme,
            self.now_ms(),
            &mut self.circles,
        );
        self.circle_renderer.upload(
            &self.device,
            &self.queue,
            &self.circles,
            [self.size.width as f32, self.size.height as f32],
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let clear_color = match self.theme {
            Theme::Light => wgpu::Color { r: 0.97, g: 0.98, b: 0.99, a: 1.0 },
            Theme::Dark => wgpu::Color { r: 0.05, g: 0.05, b: 0.08, a: 1.0 },
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.circle_renderer.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let settings = AppSettings::load().unwrap_or_else(|e| {
        log::warn!("could not load settings.toml ({e}), using defaults");
        AppSettings::default()
    });

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Gravity Well")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800))
            .build(&event_loop)?,
    );

    // No rendering context means no animated background, never a crash.
    let mut state = match pollster::block_on(State::new(window.clone(), settings)) {
        Ok(state) => state,
        Err(e) => {
            log::error!("rendering unavailable: {e:#}");
            return Ok(());
        }
    };

    event_loop.run(move |event, target| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == state.window.id() => {
                if !state.input(event) {
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    state: ElementState::Pressed,
                                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                                    ..
                                },
                            ..
                        } => target.exit(),
                        WindowEvent::Resized(physical_size) => {
                            state.resize(*physical_size);
                        }
                        WindowEvent::ScaleFactorChanged { .. } => {
                            let new_size = state.window.inner_size();
                            state.resize(new_size);
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                state.update();
                match state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => target.exit(),
                    Err(e) => log::warn!("surface error: {e:?}"),
                }
                state.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
