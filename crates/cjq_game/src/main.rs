//! Cat Jump Quick -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. All
//! simulation runs inside `RedrawRequested` using a **fixed-timestep** model
//! (see `TimeState`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. `while should_step()` -- consume fixed-dt slices; each slice drives
//!      one `CatGame::step` (title/game/transition/end state machine)
//!   3. Rebuild the sprite mesh from the active level (+ wireframes)
//!   4. Upload camera uniform, issue merged draw calls, composite the egui
//!      overlay (debug stats and the title/end screen text)
//!
//! Startup is fail-fast: the sheet manifest, the sheet images and the level
//! set are all validated before the first frame; any authoring error panics
//! with context. After that the simulation has no error paths.

mod cat;
mod collision;
mod entity;
mod game;
mod level;
#[cfg(test)]
mod replay;
mod sheets;

use std::path::Path;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use cat::CatInput;
use cjq_core::animation::{Animation, EntityKind, Frame, TextureId};
use cjq_core::geom::Rect;
use cjq_core::input::{InputState, Key};
use cjq_core::time::TimeState;
use cjq_devtools::{DebugOverlay, OverlayStats, ScreenText};
use cjq_platform::window::{create_window, toggle_fullscreen, PlatformConfig};
use cjq_render::{Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture};
use game::{CatGame, GameState, StepOutcome};
use level::COL_WIDTH;

const SHEET_MANIFEST_PATH: &str = "assets/sheets.json";
const CAMERA_ZOOM: f32 = 0.5;
const FULL_UV: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

// Wireframe palette for debug draw (Tab).
const WIRE_ANI_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
const WIRE_COLL_COLOR: [f32; 4] = [0.2, 0.4, 1.0, 0.9];
const WIRE_ANCHOR_COLOR: [f32; 4] = [1.0, 0.2, 0.2, 0.9];

/// A contiguous run of indices that share the same texture binding.
/// Draw calls are merged when consecutive quads use the same texture,
/// minimizing GPU bind-group switches during the render pass.
#[derive(Debug, Clone, Copy)]
struct DrawCall {
    texture: TextureId,
    index_start: u32,
    index_count: u32,
}

struct QuadSpec {
    texture: TextureId,
    dest: Rect,
    /// u0, v0, u1, v1
    uv: [f32; 4],
    color: [f32; 4],
}

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// All mutable engine state. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface exist.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    camera: Camera2D,
    sprite_pipeline: SpritePipeline,
    debug_overlay: DebugOverlay,

    // --- Content, loaded and validated once at startup ---------------------
    textures: Vec<GpuSpriteTexture>,
    white_tex: TextureId,
    animations: Vec<Animation>,
    game: CatGame,

    // --- Per-frame GPU mesh state ------------------------------------------
    // The sprite mesh is rebuilt on the CPU each simulated frame, then
    // streamed into these buffers. Buffers grow (power-of-two), never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
    sprite_count: usize,
}

impl EngineState {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let time = TimeState::new();
        let input = InputState::new();
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let manifest = sheets::load_manifest_from_path(Path::new(SHEET_MANIFEST_PATH))
            .unwrap_or_else(|err| panic!("Failed to load sheet manifest: {err}"));

        let mut textures = Vec::new();
        let mut animations = Vec::new();
        for sheet in &manifest.sheets {
            let bytes = std::fs::read(&sheet.path)
                .unwrap_or_else(|err| panic!("Failed to read sheet '{}': {err}", sheet.path));
            let texture = Texture::from_bytes(&gpu.device, &gpu.queue, &bytes, &sheet.path)
                .unwrap_or_else(|err| panic!("{err}"));
            let bind_group = sprite_pipeline.create_texture_bind_group(&gpu.device, &texture);
            let id = TextureId(textures.len());
            let (w, h) = texture.size;
            textures.push(GpuSpriteTexture {
                texture,
                bind_group,
            });
            animations.push(
                Animation::from_sheet(sheet.kind, id, w, h, sheet.frame_duration_ms)
                    .unwrap_or_else(|err| panic!("Sheet '{}': {err}", sheet.path)),
            );
        }
        log::info!("Loaded {} sheets", animations.len());

        let white = Texture::from_rgba8(
            &gpu.device,
            &gpu.queue,
            &[255, 255, 255, 255],
            1,
            1,
            "debug_white",
        );
        let white_bind_group = sprite_pipeline.create_texture_bind_group(&gpu.device, &white);
        let white_tex = TextureId(textures.len());
        textures.push(GpuSpriteTexture {
            texture: white,
            bind_group: white_bind_group,
        });

        let levels = level::load_all(&animations);
        let game = CatGame::new(levels, &animations)
            .unwrap_or_else(|err| panic!("Level validation failed: {err}"));

        let mut camera = Camera2D::new(gpu.size.0, gpu.size.1);
        camera.zoom = CAMERA_ZOOM;

        let camera_uniform = camera.build_uniform();
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            window,
            gpu,
            time,
            input,
            camera,
            sprite_pipeline,
            debug_overlay,
            textures,
            white_tex,
            animations,
            game,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
            sprite_count: 0,
        };

        state.frame_camera();
        state.ensure_mesh_capacity(4, 6);
        state.rebuild_scene_mesh();
        state
    }

    /// Fixed framing: the camera centers the 896-unit column horizontally
    /// and pins the world origin to the top edge of the screen.
    fn frame_camera(&mut self) {
        self.camera.position = glam::Vec2::new(COL_WIDTH / 2.0, self.camera.view_height() / 2.0);
    }

    fn rebuild_scene_mesh(&mut self) {
        let (vertices, indices, draw_calls) = self.build_mesh();
        self.ensure_mesh_capacity(vertices.len(), indices.len());
        self.sprite_count = vertices.len() / 4;
        self.draw_calls = draw_calls;

        if !vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        if !indices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        }
    }

    fn build_mesh(&self) -> (Vec<SpriteVertex>, Vec<u32>, Vec<DrawCall>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut draw_calls = Vec::new();

        // Title and end screens draw no level; they are black + overlay text.
        if !matches!(self.game.state, GameState::Game | GameState::Transition) {
            return (vertices, indices, draw_calls);
        }

        let alpha = self.game.tint_alpha.clamp(0.0, 255.0) / 255.0;
        let tint = [1.0, 1.0, 1.0, alpha];

        let level = self.game.level();
        for (i, ent) in level.entities.iter().enumerate() {
            if i == level.cat {
                continue;
            }
            match ent.kind {
                // Platforms and walls render as their surface line only.
                EntityKind::Platform => {
                    let dest = Rect::new(ent.anchor.x, ent.anchor.y - 1.0, ent.coll_rect.w, 2.0);
                    add_quad(
                        &mut vertices,
                        &mut indices,
                        &mut draw_calls,
                        QuadSpec {
                            texture: self.white_tex,
                            dest,
                            uv: FULL_UV,
                            color: tint,
                        },
                    );
                }
                EntityKind::WallLeft | EntityKind::WallRight => {
                    let dest = Rect::new(ent.anchor.x - 1.0, ent.anchor.y, 2.0, ent.coll_rect.h);
                    add_quad(
                        &mut vertices,
                        &mut indices,
                        &mut draw_calls,
                        QuadSpec {
                            texture: self.white_tex,
                            dest,
                            uv: FULL_UV,
                            color: tint,
                        },
                    );
                }
                EntityKind::Portal | EntityKind::Trapdoor => {
                    if let Some(frame) = ent.current_frame(&self.animations) {
                        add_quad(
                            &mut vertices,
                            &mut indices,
                            &mut draw_calls,
                            self.sprite_quad(frame, ent.ani_rect, tint),
                        );
                    }
                }
                _ => {}
            }
        }

        // The cat draws on top of everything else.
        let cat = level.cat();
        if let Some(frame) = cat.current_frame(&self.animations) {
            add_quad(
                &mut vertices,
                &mut indices,
                &mut draw_calls,
                self.sprite_quad(frame, cat.ani_rect, tint),
            );
        }

        if self.game.dbg_draw {
            for ent in &level.entities {
                add_rect_outline(
                    &mut vertices,
                    &mut indices,
                    &mut draw_calls,
                    self.white_tex,
                    ent.ani_rect,
                    2.0,
                    WIRE_ANI_COLOR,
                );
                add_rect_outline(
                    &mut vertices,
                    &mut indices,
                    &mut draw_calls,
                    self.white_tex,
                    ent.coll_rect,
                    4.0,
                    WIRE_COLL_COLOR,
                );
                add_quad(
                    &mut vertices,
                    &mut indices,
                    &mut draw_calls,
                    QuadSpec {
                        texture: self.white_tex,
                        dest: Rect::new(ent.anchor.x - 1.0, ent.anchor.y - 1.0, 3.0, 3.0),
                        uv: FULL_UV,
                        color: WIRE_ANCHOR_COLOR,
                    },
                );
            }
        }

        (vertices, indices, draw_calls)
    }

    /// Resolve a frame into a textured quad. A negative source width (the
    /// mirror encoding) folds into swapped U coordinates.
    fn sprite_quad(&self, frame: Frame, dest: Rect, color: [f32; 4]) -> QuadSpec {
        let (tw, th) = self.textures[frame.texture.0].texture.size;
        let (tw, th) = (tw as f32, th as f32);
        let flipped = frame.source.w < 0.0;
        let src_w = frame.source.w.abs();
        let mut u0 = frame.source.x / tw;
        let mut u1 = (frame.source.x + src_w) / tw;
        if flipped {
            std::mem::swap(&mut u0, &mut u1);
        }
        let v0 = frame.source.y / th;
        let v1 = (frame.source.y + frame.source.h) / th;

        QuadSpec {
            texture: frame.texture,
            dest,
            uv: [u0, v0, u1, v1],
            color,
        }
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn overlay_stats(&self) -> OverlayStats {
        let cat = self.game.level().cat();
        OverlayStats {
            draw_calls: self.draw_calls.len() as u32,
            sprite_count: self.sprite_count as u32,
            entity_count: self.game.level().entities.len() as u32,
            state_label: self.game.state.label().to_string(),
            level_index: self.game.level_at,
            level_name: self.game.level().name.to_string(),
            cat_anchor: (cat.anchor.x, cat.anchor.y),
            cat_velocity: (cat.velocity.x, cat.velocity.y),
            tint_alpha: self.game.tint_alpha,
            wireframes: self.game.dbg_draw,
        }
    }
}

struct App {
    config: PlatformConfig,
    state: Option<EngineState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = create_window(event_loop, &self.config);
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        self.state = Some(EngineState::new(window));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.camera.viewport = (w, h);
                    state.frame_camera();
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(engine_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(engine_key),
                            ElementState::Released => state.input.key_up(engine_key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                // Fixed-step simulation phase.
                state.time.begin_frame();
                while state.time.should_step() {
                    if state.input.is_just_pressed(Key::Escape) {
                        event_loop.exit();
                        return;
                    }
                    if state.input.is_just_pressed(Key::F3) {
                        state.debug_overlay.toggle();
                    }
                    if state.input.is_just_pressed(Key::F10) {
                        toggle_fullscreen(&state.window);
                    }
                    if state.input.is_just_pressed(Key::Tab) {
                        state.game.dbg_draw = !state.game.dbg_draw;
                        log::info!(
                            "Wireframes: {}",
                            if state.game.dbg_draw { "ON" } else { "OFF" }
                        );
                    }
                    if state.input.is_just_pressed(Key::Enter)
                        && state.game.state == GameState::Game
                    {
                        // Debug shortcut: skip ahead.
                        state.game.set_transition_to_next();
                    }

                    let step_input = CatInput {
                        move_left: state.input.is_held(Key::Left) || state.input.is_held(Key::A),
                        move_right: state.input.is_held(Key::Right) || state.input.is_held(Key::D),
                        jump_pressed: state.input.is_just_pressed(Key::Space)
                            || state.input.is_just_pressed(Key::W)
                            || state.input.is_just_pressed(Key::Up),
                    };

                    let dt = state.time.fixed_dt_ms as f32;
                    if state.game.step(dt, step_input, &state.animations) == StepOutcome::ExitApp {
                        log::info!("The end. Exiting.");
                        event_loop.exit();
                        return;
                    }
                }

                if state.time.steps_this_frame > 0 {
                    state.rebuild_scene_mesh();
                }

                // Render phase reads finalized simulation state.
                let camera_uniform = state.camera.build_uniform();
                state.gpu.queue.write_buffer(
                    &state.camera_buffer,
                    0,
                    bytemuck::cast_slice(&[camera_uniform]),
                );

                let Some((output, view)) = state.gpu.begin_frame() else {
                    return;
                };

                let screen_text = match state.game.state {
                    GameState::TitleScreen => Some(ScreenText::Title),
                    GameState::EndScreen => Some(ScreenText::End),
                    _ => None,
                };
                let stats = state.overlay_stats();
                let (egui_primitives, egui_textures_delta, overlay_actions) = state
                    .debug_overlay
                    .prepare(&state.window, &state.time, Some(stats), screen_text);

                if overlay_actions.toggle_wireframes {
                    state.game.dbg_draw = !state.game.dbg_draw;
                    log::info!(
                        "Wireframes (overlay): {}",
                        if state.game.dbg_draw { "ON" } else { "OFF" }
                    );
                }
                if overlay_actions.skip_level && state.game.state == GameState::Game {
                    state.game.set_transition_to_next();
                }

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [state.gpu.size.0, state.gpu.size.1],
                    pixels_per_point: state.window.scale_factor() as f32,
                };

                let mut encoder =
                    state
                        .gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Render Encoder"),
                        });

                {
                    let mut last_bound_texture: Option<TextureId> = None;
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Scene Render Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    });

                    render_pass.set_pipeline(&state.sprite_pipeline.render_pipeline);
                    render_pass.set_bind_group(0, &state.camera_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(state.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                    for draw in &state.draw_calls {
                        if let Some(texture) = state.textures.get(draw.texture.0) {
                            if last_bound_texture != Some(draw.texture) {
                                render_pass.set_bind_group(1, &texture.bind_group, &[]);
                                last_bound_texture = Some(draw.texture);
                            }
                            render_pass.draw_indexed(
                                draw.index_start..(draw.index_start + draw.index_count),
                                0,
                                0..1,
                            );
                        }
                    }
                }

                state.debug_overlay.upload(
                    &state.gpu.device,
                    &state.gpu.queue,
                    &mut encoder,
                    &egui_primitives,
                    &egui_textures_delta,
                    &screen_descriptor,
                );

                {
                    let mut egui_pass = encoder
                        .begin_render_pass(&wgpu::RenderPassDescriptor {
                            label: Some("egui Render Pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Load,
                                    store: wgpu::StoreOp::Store,
                                },
                            })],
                            depth_stencil_attachment: None,
                            ..Default::default()
                        })
                        .forget_lifetime();

                    state
                        .debug_overlay
                        .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
                }

                state.debug_overlay.cleanup(&egui_textures_delta);

                state.gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                // Only clear edge-triggered input (just_pressed / just_released)
                // after at least one fixed step consumed it. Otherwise a press
                // that lands on a frame with 0 simulation steps is silently lost.
                if state.time.steps_this_frame > 0 {
                    state.input.end_frame();
                }
            }

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn add_quad(
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
    draw_calls: &mut Vec<DrawCall>,
    spec: QuadSpec,
) {
    let Rect { x, y, w, h } = spec.dest;
    let [u0, v0, u1, v1] = spec.uv;
    let base_index = vertices.len() as u32;

    vertices.push(SpriteVertex {
        position: [x, y],
        tex_coords: [u0, v0],
        color: spec.color,
    });
    vertices.push(SpriteVertex {
        position: [x + w, y],
        tex_coords: [u1, v0],
        color: spec.color,
    });
    vertices.push(SpriteVertex {
        position: [x + w, y + h],
        tex_coords: [u1, v1],
        color: spec.color,
    });
    vertices.push(SpriteVertex {
        position: [x, y + h],
        tex_coords: [u0, v1],
        color: spec.color,
    });

    let draw_start = indices.len() as u32;
    indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);

    push_draw_call(draw_calls, spec.texture, draw_start, 6);
}

/// Four thin quads tracing a rectangle's edges.
fn add_rect_outline(
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
    draw_calls: &mut Vec<DrawCall>,
    texture: TextureId,
    rect: Rect,
    thickness: f32,
    color: [f32; 4],
) {
    let t = thickness;
    let edges = [
        Rect::new(rect.x, rect.y, rect.w, t),
        Rect::new(rect.x, rect.y + rect.h - t, rect.w, t),
        Rect::new(rect.x, rect.y + t, t, (rect.h - 2.0 * t).max(0.0)),
        Rect::new(
            rect.x + rect.w - t,
            rect.y + t,
            t,
            (rect.h - 2.0 * t).max(0.0),
        ),
    ];
    for dest in edges {
        add_quad(
            vertices,
            indices,
            draw_calls,
            QuadSpec {
                texture,
                dest,
                uv: FULL_UV,
                color,
            },
        );
    }
}

/// Append a draw call, merging with the previous one when the texture
/// matches and indices are contiguous. Entities are emitted in array order,
/// so runs of same-sheet quads collapse into one `draw_indexed`.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture: TextureId,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if last.texture == texture && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture,
        index_start,
        index_count,
    });
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::F10 => Some(Key::F10),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Cat Jump Quick starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
