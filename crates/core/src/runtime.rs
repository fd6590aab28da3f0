//! Windowed frame loop: winit event loop, glutin GL context, glow loader.
//!
//! [`Runtime::run`] owns the whole lifecycle the scenes share: create the
//! window with a 3.3 core context, load GL function pointers, build the
//! scene through a caller-supplied factory, then clear/draw/swap once per
//! frame until the window closes or Escape is pressed. W toggles wireframe
//! fill on key-press edges.

use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::clock::FrameClock;
use crate::error::SceneError;
use crate::scene::{FrameCtx, Scene, CLEAR_COLOR};

/// Window parameters for a run.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial logical width.
    pub width: u32,
    /// Initial logical height.
    pub height: u32,
    /// Whether buffer swaps wait for vertical sync.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "gl-steps".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Entry point for the windowed frame loop.
pub struct Runtime;

impl Runtime {
    /// Opens a window and drives `factory`'s scene until exit.
    ///
    /// The factory runs once, after the GL context is current, so the
    /// scene constructor can upload geometry and compile shaders.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Window` for event-loop/context failures and
    /// forwards whatever the factory or the scene's `draw` returns.
    pub fn run<S, F>(config: WindowConfig, factory: F) -> Result<(), SceneError>
    where
        S: Scene,
        F: FnOnce(&glow::Context) -> Result<S, SceneError>,
    {
        let event_loop = EventLoop::new().map_err(|e| SceneError::Window(e.to_string()))?;
        let mut app = App {
            config,
            factory: Some(factory),
            state: None,
            outcome: Ok(()),
            wireframe: false,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| SceneError::Window(e.to_string()))?;
        app.outcome
    }
}

/// Everything that only exists once the window and context are up.
struct GlState<S> {
    window: Window,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    gl: glow::Context,
    clock: FrameClock,
    size: PhysicalSize<u32>,
    scene: S,
}

struct App<S, F> {
    config: WindowConfig,
    factory: Option<F>,
    state: Option<GlState<S>>,
    outcome: Result<(), SceneError>,
    wireframe: bool,
}

/// Prefers the config with the most samples, like the upstream glutin
/// examples do. `DisplayBuilder::build` only succeeds when the platform
/// returned at least one config.
fn pick_gl_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, next| {
            if next.num_samples() > best.num_samples() {
                next
            } else {
                best
            }
        })
        .expect("platform returned no GL configs")
}

impl<S, F> App<S, F>
where
    S: Scene,
    F: FnOnce(&glow::Context) -> Result<S, SceneError>,
{
    #[allow(unsafe_code)]
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<GlState<S>, SceneError> {
        let factory = self
            .factory
            .take()
            .ok_or_else(|| SceneError::Window("event loop resumed twice".into()))?;

        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                f64::from(self.config.width),
                f64::from(self.config.height),
            ));

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_gl_config)
            .map_err(|e| SceneError::Window(e.to_string()))?;
        let window =
            window.ok_or_else(|| SceneError::Window("display builder returned no window".into()))?;

        let raw_window_handle = window
            .window_handle()
            .map_err(|e| SceneError::Window(e.to_string()))?
            .as_raw();
        let gl_display = gl_config.display();

        // The whole series targets GL 3.3 core.
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));

        // SAFETY: the raw window handle stays valid for the lifetime of
        // `window`, which outlives the context and surface in GlState.
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| SceneError::Window(e.to_string()))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| SceneError::Window(e.to_string()))?;
        // SAFETY: as above, the window outlives the surface.
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| SceneError::Window(e.to_string()))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| SceneError::Window(e.to_string()))?;

        // SAFETY: the display backing this loader outlives the returned
        // glow context; both live in GlState.
        let gl =
            unsafe { glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s)) };

        let interval = if self.config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        {
            use glow::HasContext;
            // SAFETY: plain parameter queries on the freshly loaded context.
            let (version, renderer) = unsafe {
                (
                    gl.get_parameter_string(glow::VERSION),
                    gl.get_parameter_string(glow::RENDERER),
                )
            };
            log::info!("OpenGL {version} on {renderer}");
        }

        let mut scene = factory(&gl)?;

        let size = window.inner_size();
        {
            use glow::HasContext;
            // SAFETY: viewport/depth setup on the current context.
            unsafe {
                gl.viewport(0, 0, size.width as i32, size.height as i32);
                if scene.uses_depth() {
                    gl.enable(glow::DEPTH_TEST);
                }
            }
        }
        scene.resize(&gl, size.width, size.height);

        Ok(GlState {
            window,
            context,
            surface,
            gl,
            clock: FrameClock::new(),
            size,
            scene,
        })
    }

    #[allow(unsafe_code)]
    fn draw_frame(&mut self) -> Result<(), SceneError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let time = state.clock.tick();
        let frame = FrameCtx {
            elapsed_secs: time.elapsed_secs,
            delta_secs: time.delta_secs,
            frame_index: time.frame_index,
            width: state.size.width,
            height: state.size.height,
        };

        {
            use glow::HasContext;
            let mut mask = glow::COLOR_BUFFER_BIT;
            if state.scene.uses_depth() {
                mask |= glow::DEPTH_BUFFER_BIT;
            }
            // SAFETY: clear with a constant color on the current context.
            unsafe {
                state.gl.clear_color(
                    CLEAR_COLOR[0],
                    CLEAR_COLOR[1],
                    CLEAR_COLOR[2],
                    CLEAR_COLOR[3],
                );
                state.gl.clear(mask);
            }
        }

        state.scene.draw(&state.gl, &frame)?;

        state
            .surface
            .swap_buffers(&state.context)
            .map_err(|e| SceneError::Window(e.to_string()))?;
        Ok(())
    }

    #[allow(unsafe_code)]
    fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized; keep the old viewport until a real size arrives.
            return;
        };
        state.surface.resize(&state.context, width, height);
        {
            use glow::HasContext;
            // SAFETY: viewport update on the current context.
            unsafe {
                state
                    .gl
                    .viewport(0, 0, size.width as i32, size.height as i32);
            }
        }
        state.size = size;
        state.scene.resize(&state.gl, size.width, size.height);
    }

    #[allow(unsafe_code)]
    fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
        let mode = if self.wireframe {
            glow::LINE
        } else {
            glow::FILL
        };
        if let Some(state) = self.state.as_ref() {
            use glow::HasContext;
            // SAFETY: polygon-mode switch on the current context.
            unsafe {
                state.gl.polygon_mode(glow::FRONT_AND_BACK, mode);
            }
        }
        log::debug!("wireframe {}", if self.wireframe { "on" } else { "off" });
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            state.scene.destroy(&state.gl);
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SceneError) {
        log::error!("{error}");
        self.outcome = Err(error);
        self.state = None;
        event_loop.exit();
    }
}

impl<S, F> ApplicationHandler for App<S, F>
where
    S: Scene,
    F: FnOnce(&glow::Context) -> Result<S, SceneError>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        // Continuous animation: ask for the next frame as soon as this one
        // is delivered; the swap interval paces the loop.
        if let Some(state) = self.state.as_ref() {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => self.handle_resize(size),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => self.shutdown(event_loop),
                KeyCode::KeyW => self.toggle_wireframe(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.draw_frame() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_series_window() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert!(config.vsync);
    }

    #[test]
    #[ignore = "requires a display server"]
    fn run_creates_a_window_and_draws() {
        // Would test: Runtime::run with a no-op scene exits cleanly after
        // a close request.
    }
}
