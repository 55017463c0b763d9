use std::{num::NonZeroUsize, sync::Arc};

use tracing::{debug, error};
use vello::{
    AaConfig, Renderer, RendererOptions, Scene,
    kurbo::Point,
    peniko::Color,
    util::{RenderContext, RenderSurface},
    wgpu,
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{Plot, PlotError, layout::Viewport};

pub(crate) struct WanderApp<'p, 's> {
    plot: &'p Plot,
    viewport: Option<Viewport>,
    scene: Scene,
    is_plot_outdated: bool,

    context: RenderContext,
    render_state: Option<RenderState<'s>>,
    renderers: Vec<Option<Renderer>>,

    is_mouse_down: bool,
    drag_start: Option<Point>,
    prior_position: Option<Point>,

    error: Option<PlotError>,
}

impl<'p, 's> WanderApp<'p, 's> {
    pub(crate) fn new(plot: &'p Plot) -> Self {
        Self {
            plot,
            viewport: None,
            scene: Scene::new(),
            is_plot_outdated: true,
            context: RenderContext::new(),
            render_state: None,
            renderers: Vec::new(),
            is_mouse_down: false,
            drag_start: None,
            prior_position: None,
            error: None,
        }
    }

    /// Runs the event loop until the window closes. This blocks.
    pub(crate) fn display(&mut self) -> Result<(), PlotError> {
        EventLoop::new()?.run_app(self)?;
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PlotError) {
        error!(%err, "closing plot window");
        self.error = Some(err);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(RenderState { window, .. }) = &self.render_state {
            window.request_redraw();
        }
    }

    fn create_render_state(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlotError> {
        let layout = &self.plot.layout;
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_inner_size(LogicalSize::new(layout.size.0, layout.size.1))
                    .with_resizable(true)
                    .with_title(self.plot.window_title()),
            )?,
        );
        let size = window.inner_size();
        let present_mode = wgpu::PresentMode::AutoVsync;
        let surface_future =
            self.context
                .create_surface(window.clone(), size.width, size.height, present_mode);
        let surface = pollster::block_on(surface_future)
            .map_err(|err| PlotError::Surface(err.to_string()))?;

        self.renderers
            .resize_with(self.context.devices.len(), || None);

        let id = surface.dev_id;
        if self.renderers[id].is_none() {
            let device_handle = &self.context.devices[id];
            let renderer = Renderer::new(
                &device_handle.device,
                RendererOptions {
                    use_cpu: false,
                    antialiasing_support: [AaConfig::Area].iter().copied().collect(),
                    num_init_threads: NonZeroUsize::new(1),
                    pipeline_cache: None,
                },
            )
            .map_err(|err| PlotError::Renderer(err.to_string()))?;
            self.renderers[id] = Some(renderer);
        }

        let mut viewport = layout.instantiate(window.scale_factor(), self.plot.data_bounds());
        viewport.resize(size.width, size.height);
        debug!(?viewport.data_bounds, "opened plot window");

        self.viewport = Some(viewport);
        self.render_state = Some(RenderState { surface, window });
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), PlotError> {
        let (Some(RenderState { surface, .. }), Some(viewport)) =
            (&self.render_state, &self.viewport)
        else {
            return Ok(());
        };

        if self.is_plot_outdated {
            self.scene = self.plot.render(viewport);
            self.is_plot_outdated = false;
        }

        let device_handle = &self.context.devices[surface.dev_id];
        let render_params = vello::RenderParams {
            base_color: Color::WHITE,
            width: surface.config.width,
            height: surface.config.height,
            antialiasing_method: AaConfig::Area,
        };

        let renderer = self.renderers[surface.dev_id]
            .as_mut()
            .ok_or_else(|| PlotError::Renderer("no renderer for surface device".into()))?;
        renderer
            .render_to_texture(
                &device_handle.device,
                &device_handle.queue,
                &self.scene,
                &surface.target_view,
                &render_params,
            )
            .map_err(|err| PlotError::Renderer(err.to_string()))?;

        let surface_texture = surface
            .surface
            .get_current_texture()
            .map_err(|err| PlotError::Surface(err.to_string()))?;
        let mut encoder =
            device_handle
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Surface Blit"),
                });
        surface.blitter.copy(
            &device_handle.device,
            &mut encoder,
            &surface.target_view,
            &surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default()),
        );
        device_handle.queue.submit([encoder.finish()]);
        surface_texture.present();

        device_handle
            .device
            .poll(wgpu::PollType::Poll)
            .map_err(|err| PlotError::Renderer(err.to_string()))?;

        Ok(())
    }
}

impl ApplicationHandler for WanderApp<'_, '_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_state.is_some() {
            return;
        }

        if let Err(err) = self.create_render_state(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(render_state) = &self.render_state else {
            return;
        };
        if render_state.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Key::Named(NamedKey::Escape) = event.logical_key.as_ref() {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(RenderState { surface, .. }) = &mut self.render_state {
                    self.context
                        .resize_surface(surface, size.width, size.height);
                }
                if let Some(viewport) = &mut self.viewport {
                    viewport.resize(size.width, size.height);
                }
                self.is_plot_outdated = true;
                self.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(viewport) = &mut self.viewport {
                    viewport.scale_factor = scale_factor;
                }
                self.is_plot_outdated = true;
                self.request_redraw();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.is_mouse_down = state == ElementState::Pressed;
                    self.drag_start = if self.is_mouse_down {
                        self.prior_position
                    } else {
                        None
                    };
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.prior_position = None;
                self.drag_start = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let factor = match delta {
                    MouseScrollDelta::LineDelta(_, y) => 1.0 - y as f64 / 10.0,
                    MouseScrollDelta::PixelDelta(delta) => 1.0 - delta.y / 500.0,
                };

                if let (Some(prior), Some(viewport)) = (self.prior_position, &mut self.viewport) {
                    viewport.zoom(prior.into(), factor);
                    self.is_plot_outdated = true;
                }
                self.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Point {
                    x: position.x,
                    y: position.y,
                };

                if self.is_mouse_down {
                    if let (Some(start), Some(prior), Some(viewport)) =
                        (self.drag_start, self.prior_position, &mut self.viewport)
                    {
                        viewport.drag(start.into(), prior.into(), position.into());
                        self.is_plot_outdated = true;
                    }
                    self.request_redraw();
                }

                self.prior_position = Some(position);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}

struct RenderState<'s> {
    surface: RenderSurface<'s>,
    window: Arc<Window>,
}
