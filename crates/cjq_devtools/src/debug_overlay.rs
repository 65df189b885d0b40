//! Debug overlay rendered via egui on top of the game scene.
//!
//! Integration pattern: egui requires a three-phase render split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. The phases are:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! Besides the stats window (toggled by F3), the overlay paints the title
//! and end screen text -- egui is the only text path in the stack.

use cjq_core::time::TimeState;
use winit::window::Window;

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub draw_calls: u32,
    pub sprite_count: u32,
    pub entity_count: u32,
    /// Game state label (e.g. "game", "transition")
    pub state_label: String,
    pub level_index: usize,
    pub level_name: String,
    pub cat_anchor: (f32, f32),
    pub cat_velocity: (f32, f32),
    pub tint_alpha: f32,
    pub wireframes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayActions {
    /// User clicked the wireframe toggle (same effect as Tab)
    pub toggle_wireframes: bool,
    /// User clicked the level skip button (same effect as Enter)
    pub skip_level: bool,
}

/// Full-screen text card painted over a black frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenText {
    Title,
    End,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        stats: Option<OverlayStats>,
        screen: Option<ScreenText>,
    ) -> (
        Vec<egui::ClippedPrimitive>,
        egui::TexturesDelta,
        OverlayActions,
    ) {
        let mut actions = OverlayActions::default();
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if let Some(screen) = screen {
                paint_screen_text(ctx, screen);
            }

            if self.visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 10.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                        ui.label(format!("Steps this frame: {}", time.steps_this_frame));
                        ui.label(format!("Total steps: {}", time.fixed_step_count));
                        if let Some(ref stats) = stats {
                            ui.separator();
                            ui.label(format!("State: {}", stats.state_label));
                            ui.label(format!(
                                "Level {}: {}",
                                stats.level_index, stats.level_name
                            ));
                            ui.label(format!("Entities: {}", stats.entity_count));
                            ui.label(format!(
                                "Cat anchor: ({:.1}, {:.1})",
                                stats.cat_anchor.0, stats.cat_anchor.1
                            ));
                            ui.label(format!(
                                "Cat velocity: ({:.3}, {:.3})",
                                stats.cat_velocity.0, stats.cat_velocity.1
                            ));
                            ui.label(format!("Tint alpha: {:.0}", stats.tint_alpha));
                            ui.separator();
                            ui.label(format!("Draw calls: {}", stats.draw_calls));
                            ui.label(format!("Sprites: {}", stats.sprite_count));
                            ui.separator();
                            ui.horizontal(|ui| {
                                let wf_label = if stats.wireframes {
                                    "Wireframes: on"
                                } else {
                                    "Wireframes: off"
                                };
                                if ui.button(wf_label).clicked() {
                                    actions.toggle_wireframes = true;
                                }
                                if ui.button("Skip level").clicked() {
                                    actions.skip_level = true;
                                }
                            });
                        }
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn paint_screen_text(ctx: &egui::Context, screen: ScreenText) {
    let (heading, subtitle) = match screen {
        ScreenText::Title => ("CAT - QUICK", Some("Press [space] to jump")),
        ScreenText::End => ("THE END", None),
    };

    egui::Area::new(egui::Id::new("screen_text"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(heading)
                        .size(36.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                if let Some(subtitle) = subtitle {
                    ui.add_space(24.0);
                    ui.label(
                        egui::RichText::new(subtitle)
                            .size(24.0)
                            .color(egui::Color32::WHITE),
                    );
                }
            });
        });
}
