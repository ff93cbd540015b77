//! Connector Scene entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, PointerEvent};

    use connector_scene::SceneConfig;
    use connector_scene::assets::load_connector;
    use connector_scene::consts::*;
    use connector_scene::input::event_ndc;
    use connector_scene::renderer::SceneRenderState;
    use connector_scene::scene::{Camera, SceneLighting};
    use connector_scene::sim::{SceneState, TickInput, tick};

    /// Everything the page keeps alive between frames
    struct Scene {
        state: SceneState,
        render_state: SceneRenderState,
        camera: Camera,
        lighting: SceneLighting,
        config: SceneConfig,
        canvas: HtmlCanvasElement,
        input: TickInput,
        last_time: f64,
    }

    impl Scene {
        fn update(&mut self, dt: f32) {
            let viewport = self.camera.viewport(self.render_state.aspect());
            tick(&mut self.state, &self.input, viewport, dt);
            // Clicks are one-shot; the cursor position persists
            self.input.clicks = 0;
        }

        fn render(&mut self) {
            match self
                .render_state
                .render(&self.state, &self.camera, &self.lighting)
            {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Match the drawing buffer to the canvas' CSS size
        fn resize(&mut self) {
            let (width, height) = drawing_buffer_size(&self.canvas, &self.config);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.render_state.resize(width, height);
        }
    }

    fn drawing_buffer_size(canvas: &HtmlCanvasElement, config: &SceneConfig) -> (u32, u32) {
        let device_dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let dpr = config.effective_dpr(device_dpr);
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Connector scene starting...");

        if let Err(e) = start().await {
            log::error!("Scene failed to start: {:#}", e);
        }
    }

    async fn start() -> anyhow::Result<()> {
        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas"))?;

        let config = SceneConfig::load(&canvas);
        let (width, height) = drawing_buffer_size(&canvas, &config);
        canvas.set_width(width);
        canvas.set_height(height);

        // Fatal on failure: there is nothing to draw without the model
        let mesh = load_connector(&config.asset_path).await?;

        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = SceneState::new(seed);
        log::info!("Scene mounted with seed: {}", seed);

        let instance =
            wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
                ..Default::default()
            })
            .await;

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to get adapter")?;

        log::info!(
            "Using adapter: {:?} ({:?})",
            adapter.get_info().name,
            adapter.get_info().backend
        );

        let render_state =
            SceneRenderState::new(surface, &adapter, width, height, &mesh, config.sample_count())
                .await?;

        let scene = Rc::new(RefCell::new(Scene {
            state,
            render_state,
            camera: Camera::from_config(&config.camera),
            lighting: SceneLighting::default(),
            config,
            canvas: canvas.clone(),
            input: TickInput::default(),
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, scene.clone());
        request_animation_frame(scene);

        log::info!("Connector scene running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, scene: Rc<RefCell<Scene>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Track the cursor anywhere on the page, relative to the canvas
        {
            let scene = scene.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if let Some(ndc) = event_ndc(&event, &canvas) {
                    scene.borrow_mut().input.pointer = Some(ndc);
                }
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click cycles the accent palette
        {
            let scene = scene.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                scene.borrow_mut().input.clicks += 1;
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                scene.borrow_mut().resize();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(scene: Rc<RefCell<Scene>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(scene, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(scene: Rc<RefCell<Scene>>, time: f64) {
        {
            let mut s = scene.borrow_mut();

            let dt = if s.last_time > 0.0 {
                ((time - s.last_time) / 1000.0) as f32
            } else {
                PHYSICS_DT
            };
            s.last_time = time;

            s.update(dt);
            s.render();
        }

        request_animation_frame(scene);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_scene::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Connector scene (native) starting...");
    log::info!("Rendering needs a browser canvas - run with `trunk serve` for the web version");

    let config = connector_scene::SceneConfig::load();
    check_asset(&config.asset_path);
    simulate(&config);
}

/// Parse the model asset if it is present under `./assets`
#[cfg(not(target_arch = "wasm32"))]
fn check_asset(path: &str) {
    let file = std::path::Path::new("assets").join(path.trim_start_matches('/'));
    match std::fs::read(&file) {
        Ok(bytes) => match connector_scene::assets::parse_connector_glb(&bytes) {
            Ok(mesh) => log::info!("{}: {} triangles", file.display(), mesh.indices.len() / 3),
            Err(e) => log::error!("{}: {}", file.display(), e),
        },
        Err(e) => log::warn!("{} not readable: {}", file.display(), e),
    }
}

/// Headless run: sweep a synthetic cursor across the viewport and click every two seconds
#[cfg(not(target_arch = "wasm32"))]
fn simulate(config: &connector_scene::SceneConfig) {
    use connector_scene::consts::PHYSICS_DT;
    use connector_scene::scene::Camera;
    use connector_scene::sim::{SceneState, TickInput, tick};
    use glam::Vec2;

    const FRAMES: u32 = 600;

    let camera = Camera::from_config(&config.camera);
    let viewport = camera.viewport(16.0 / 9.0);
    let mut state = SceneState::new(config.seed.unwrap_or(1));

    for frame in 0..FRAMES {
        let t = frame as f32 * PHYSICS_DT;
        let input = TickInput {
            pointer: Some(Vec2::new((t * 0.7).sin(), (t * 1.3).cos() * 0.5)),
            clicks: u32::from(frame > 0 && frame % 120 == 0),
        };
        tick(&mut state, &input, viewport, PHYSICS_DT);
    }

    let spread = state
        .all_connectors()
        .filter_map(|c| state.world.translation(c.handle()))
        .map(|p| p.length())
        .fold(0.0f32, f32::max);
    log::info!(
        "Simulated {} frames: palette index {}, farthest connector {:.2} from origin",
        FRAMES,
        state.palette.index(),
        spread
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
