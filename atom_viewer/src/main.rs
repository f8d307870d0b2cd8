//! Bohr-model Atom Viewer
//!
//! 3D view of the first twenty elements with a packed nucleus and animated
//! electron shells.
//!
//! Controls:
//! - Element dropdown / PageUp / PageDown: Switch element
//! - Left mouse drag / Arrow keys: Orbit camera
//! - Scroll: Zoom in/out
//! - Space: Pause/resume
//! - R: Reset view

use atom_viewer::{
    elements,
    renderer::AtomRenderer,
    shells::{MAX_ELECTRONS, SHELL_CAPACITIES},
    ui::{draw_control_panel, PanelResponse},
    AtomState, CliArgs, LayoutConfig,
};
use clap::Parser;
use common::{GraphicsContext, OrbitCamera};
use std::process::ExitCode;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

/// Room for the heaviest nucleus in the table (40 nucleons) plus every electron slot
const MAX_SPHERES: usize = 64 + MAX_ELECTRONS as usize;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: AtomRenderer,
    atom: AtomState,
    camera: OrbitCamera,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, atom: AtomState) -> Self {
        let renderer = AtomRenderer::new(&ctx, MAX_SPHERES, SHELL_CAPACITIES.len());
        let mut camera = OrbitCamera::new(ctx.aspect_ratio());
        camera.frame(atom.scene_radius());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &ctx.device,
            ctx.config.format,
            None,
            1,
        );

        Self {
            ctx,
            renderer,
            atom,
            camera,
            mouse_pressed: false,
            last_mouse_pos: None,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.renderer
            .resize(&self.ctx.device, self.ctx.config.width, self.ctx.config.height);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
    }

    fn update(&mut self, dt: f32) {
        if let Err(e) = self.atom.advance(dt) {
            log::warn!("Skipping frame: {e}");
        }
    }

    fn reset_view(&mut self) {
        let aspect = self.camera.aspect_ratio;
        self.camera = OrbitCamera::new(aspect);
        self.camera.frame(self.atom.scene_radius());
    }

    fn select(&mut self, element: &'static elements::ElementRecord) {
        match self.atom.set_element(element) {
            Ok(()) => self.camera.frame(self.atom.scene_radius()),
            Err(e) => log::error!("Failed to select {}: {e}", element.name),
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Build egui UI first so element changes show up this frame
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let atom = &mut self.atom;
        let mut panel = PanelResponse::default();
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            panel = draw_control_panel(ctx, atom);
        });

        if panel.element_changed {
            self.camera.frame(self.atom.scene_radius());
        }
        if panel.reset_camera {
            self.reset_view();
        }

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let (num_spheres, num_ring_vertices) =
            self.renderer.update_atom(&self.ctx.queue, &self.atom);

        self.egui.state.handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self.egui.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui.renderer.update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, num_spheres, num_ring_vertices);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Space => self.atom.paused = !self.atom.paused,
            KeyCode::KeyR => self.reset_view(),
            KeyCode::PageDown => self.select(elements::next(self.atom.element())),
            KeyCode::PageUp => self.select(elements::previous(self.atom.element())),
            KeyCode::ArrowLeft => self.camera.orbit(-0.1, 0.0),
            KeyCode::ArrowRight => self.camera.orbit(0.1, 0.0),
            KeyCode::ArrowUp => self.camera.orbit(0.0, 0.1),
            KeyCode::ArrowDown => self.camera.orbit(0.0, -0.1),
            _ => {}
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if self.mouse_pressed {
            if let Some((last_x, last_y)) = self.last_mouse_pos {
                let dx = (x - last_x) as f32 * 0.005;
                let dy = (y - last_y) as f32 * 0.005;
                self.camera.orbit(-dx, dy);
            }
        }
        self.last_mouse_pos = Some((x, y));
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let layout = LayoutConfig::from_args(&args)?;
    let mut atom = AtomState::from_name(&args.element, layout)?;
    atom.paused = args.paused;

    log::info!(
        "Starting with {} ({} protons, {} neutrons, shells {:?})",
        atom.element().name,
        atom.element().protons(),
        atom.element().neutrons(),
        atom.shells()
    );

    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Atom Viewer - Bohr Model",
        args.width,
        args.height,
    ))?;

    let mut app = App::new(ctx, atom);
    let mut last_time = std::time::Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                let consumed = app.handle_window_event(event);

                // Never lose a button release to egui, or dragging sticks
                if let WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } = event
                {
                    app.mouse_pressed = *state == ElementState::Pressed && !consumed;
                    if !app.mouse_pressed {
                        app.last_mouse_pos = None;
                    }
                }

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => app.resize(*size),
                    WindowEvent::RedrawRequested => {
                        let now = std::time::Instant::now();
                        let dt = (now - last_time).as_secs_f32().min(0.1);
                        last_time = now;

                        app.update(dt);
                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("GPU out of memory, exiting");
                                elwt.exit();
                            }
                            Err(e) => log::warn!("Render error: {:?}", e),
                        }
                    }
                    _ if consumed => {}
                    WindowEvent::CursorMoved { position, .. } => {
                        app.handle_mouse_move(position.x, position.y);
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } => app.handle_key(*key, *state),
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => *y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        app.handle_scroll(scroll);
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
