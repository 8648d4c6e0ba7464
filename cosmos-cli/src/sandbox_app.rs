//! Interactive sandbox window
//!
//! Draws the live particle and field sets and turns mouse and keyboard input
//! into simulation mutations. Steps the simulation exactly once per paced
//! frame, before drawing.

use cosmos_core::field::{FieldPreset, FieldType};
use cosmos_core::{
    get_field_states, get_particle_states, step_simulation, FieldState, FrameClock, ParticleKind,
    ParticleState, SimulationContext, DEFAULT_SHARD_COUNT,
};
use egui::{Color32, Key, PointerButton, Pos2, Rect};
use glam::Vec2;
use std::time::{Duration, Instant};

const BACKGROUND: Color32 = Color32::from_rgb(8, 6, 15);
const TEXT_COLOR: Color32 = Color32::from_rgb(100, 255, 200);
const GRAVITY_COLOR: [u8; 3] = [0, 200, 255];
const REPULSION_COLOR: [u8; 3] = [255, 100, 0];
const MAGNETIC_COLOR: [u8; 3] = [200, 0, 255];

const SIZE_STEP: f32 = 0.1;
const FORCE_STEP: f32 = 0.1;
const REPEAT_DELAY: Duration = Duration::from_millis(200);
const REPEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Mouse buttons in field-type order
const BUTTONS: [(PointerButton, FieldType); 3] = [
    (PointerButton::Primary, FieldType::Gravity),
    (PointerButton::Secondary, FieldType::Repulsion),
    (PointerButton::Middle, FieldType::Magnetic),
];

/// Auto-repeat for a held key: fires on press, again after a delay, then at a fixed rate
#[derive(Default)]
struct KeyRepeat {
    next: Option<Instant>,
}

impl KeyRepeat {
    fn fire(&mut self, down: bool, now: Instant) -> bool {
        if !down {
            self.next = None;
            return false;
        }
        match self.next {
            None => {
                self.next = Some(now + REPEAT_DELAY);
                true
            }
            Some(next) if now >= next => {
                self.next = Some(now + REPEAT_INTERVAL);
                true
            }
            Some(_) => false,
        }
    }
}

/// Maps world coordinates onto the canvas, preserving aspect ratio
struct Viewport {
    origin: Pos2,
    scale: f32,
}

impl Viewport {
    fn fit(rect: Rect, bounds: Vec2) -> Self {
        let scale = (rect.width() / bounds.x).min(rect.height() / bounds.y);
        let used = egui::vec2(bounds.x * scale, bounds.y * scale);
        Self {
            origin: rect.center() - used / 2.0,
            scale,
        }
    }

    fn to_screen(&self, p: Vec2) -> Pos2 {
        self.origin + egui::vec2(p.x, p.y) * self.scale
    }

    fn to_world(&self, p: Pos2) -> Vec2 {
        let local = (p - self.origin) / self.scale;
        Vec2::new(local.x, local.y)
    }
}

pub struct SandboxApp {
    sim: SimulationContext,
    clock: FrameClock,
    playing: bool,
    /// Buttons pressed inside the canvas and not yet released
    held: [bool; 3],
    force_up: KeyRepeat,
    force_down: KeyRepeat,
}

impl SandboxApp {
    pub fn new(sim: SimulationContext, _cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            sim,
            clock: FrameClock::default(),
            playing: true,
            held: [false; 3],
            force_up: KeyRepeat::default(),
            force_down: KeyRepeat::default(),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context, pointer: Option<Vec2>, now: Instant) {
        let (up, down) = ctx.input(|i| (i.key_down(Key::ArrowUp), i.key_down(Key::ArrowDown)));
        if self.force_up.fire(up, now) {
            self.sim.adjust_force_strength(FORCE_STEP);
        }
        if self.force_down.fire(down, now) {
            self.sim.adjust_force_strength(-FORCE_STEP);
        }

        let pressed = |key: Key| ctx.input(|i| i.key_pressed(key));

        if pressed(Key::Escape) || pressed(Key::Q) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if pressed(Key::C) {
            self.sim.clear();
        }
        if pressed(Key::R) {
            self.sim.reset_tunables();
        }
        if pressed(Key::Space) {
            if let Some(pos) = pointer {
                self.sim.spawn_burst(pos, DEFAULT_SHARD_COUNT);
            }
        }
        if pressed(Key::Tab) {
            self.sim.toggle_turbulence();
        }
        for (slot, key) in [Key::Num1, Key::Num2, Key::Num3, Key::Num4].into_iter().enumerate() {
            if pressed(key) {
                if let Some(kind) = ParticleKind::from_index(slot) {
                    self.sim.select_kind(kind);
                }
            }
        }
        if pressed(Key::OpenBracket) {
            self.sim.adjust_size_multiplier(-SIZE_STEP);
        }
        if pressed(Key::CloseBracket) {
            self.sim.adjust_size_multiplier(SIZE_STEP);
        }
    }

    /// Clicks drop strong fields (or explode with Ctrl held); presses start a hold
    fn handle_clicks(&mut self, ctx: &egui::Context, pointer: Option<Vec2>) {
        let ctrl = ctx.input(|i| i.modifiers.ctrl || i.modifiers.command);

        for (slot, (button, field_type)) in BUTTONS.into_iter().enumerate() {
            let (pressed, down) = ctx.input(|i| {
                (i.pointer.button_pressed(button), i.pointer.button_down(button))
            });
            if !down {
                self.held[slot] = false;
            }
            let Some(pos) = pointer else {
                continue;
            };
            if !pressed {
                continue;
            }
            if button == PointerButton::Primary && ctrl {
                self.sim.explode_nearest(pos);
                continue;
            }
            self.held[slot] = true;
            self.sim.emit(FieldPreset::click(field_type), pos);
        }
    }

    /// Held buttons keep dropping weak, short-lived fields every step
    fn emit_held(&mut self, pointer: Option<Vec2>) {
        let Some(pos) = pointer else {
            return;
        };
        for (slot, (_, field_type)) in BUTTONS.into_iter().enumerate() {
            if self.held[slot] {
                self.sim.emit(FieldPreset::hold(field_type), pos);
            }
        }
    }

    fn draw(&self, painter: &egui::Painter, view: &Viewport) {
        for field in get_field_states(&self.sim) {
            draw_field(painter, view, &field);
        }
        for particle in get_particle_states(&self.sim) {
            draw_particle(painter, view, &particle);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }
            if ui.button("⏭ Step").clicked() {
                step_simulation(&mut self.sim);
            }
            if ui.button("Clear").clicked() {
                self.sim.clear();
            }
            if ui.button("Reset").clicked() {
                self.sim.reset_tunables();
            }

            ui.separator();

            let stats = self.sim.stats();
            let hud = |ui: &mut egui::Ui, text: String| {
                ui.label(egui::RichText::new(text).color(TEXT_COLOR).monospace());
            };
            hud(ui, format!("FORCE: {:.1}x", stats.tunables.force_strength));
            hud(ui, format!("SIZE: {:.1}x", stats.tunables.size_multiplier));
            hud(
                ui,
                format!("TURB: {}", if stats.tunables.turbulence { "ON" } else { "OFF" }),
            );
            hud(ui, format!("MODE: {:.4}", stats.tunables.kind.name()));
            ui.separator();
            hud(ui, format!("PARTICLES: {}", stats.particles));
            hud(ui, format!("FIELDS: {}", stats.fields));
            hud(ui, format!("STEP: {}", stats.step));
        });
    }
}

impl eframe::App for SandboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let view = Viewport::fit(response.rect, self.sim.world.bounds());
                let pointer = ctx
                    .input(|i| i.pointer.latest_pos())
                    .filter(|p| response.rect.contains(*p))
                    .map(|p| view.to_world(p));

                self.handle_keys(ctx, pointer, now);
                self.handle_clicks(ctx, pointer);

                if self.playing && self.clock.tick(now) {
                    self.emit_held(pointer);
                    step_simulation(&mut self.sim);
                }

                self.draw(&painter, &view);
            });

        ctx.request_repaint_after(self.clock.repaint_delay(now, self.playing));
    }
}

fn rgba(rgb: [u8; 3], alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], alpha)
}

fn draw_field(painter: &egui::Painter, view: &Viewport, field: &FieldState) {
    let color = match field.field_type {
        FieldType::Gravity => GRAVITY_COLOR,
        FieldType::Repulsion => REPULSION_COLOR,
        FieldType::Magnetic => MAGNETIC_COLOR,
    };
    let age = field.age as f32;
    let alpha = (200.0 - age * 1.2).max(0.0) as u8;
    let pulse = 1.0 + 0.15 * (age * 0.2).sin();
    let center = view.to_screen(field.pos);

    painter.circle_filled(center, (4.0 + pulse * 4.0) * view.scale, rgba(color, 255));
    painter.circle_stroke(
        center,
        8.0 * pulse * view.scale,
        egui::Stroke::new(1.0, rgba(color, alpha / 3)),
    );
}

fn draw_particle(painter: &egui::Painter, view: &Viewport, particle: &ParticleState) {
    let len = particle.trail.len();
    let trail_radius = (particle.size * 0.5).max(1.0) * view.scale;
    for (i, point) in particle.trail.iter().enumerate() {
        let alpha = (200.0 * i as f32 / len as f32) as u8 / 2;
        painter.circle_filled(view.to_screen(*point), trail_radius, rgba(particle.color, alpha));
    }

    let center = view.to_screen(particle.pos);
    if particle.glow > 0.0 {
        let radius = (particle.size + particle.glow) * view.scale;
        painter.circle_filled(center, radius, rgba(particle.color, 40));
    }

    painter.circle_filled(
        center,
        particle.size.max(1.0) * view.scale,
        rgba(particle.color, 255),
    );

    if let Some(charge) = particle.charge {
        let marker = if charge > 0.0 { [255, 255, 0] } else { [0, 255, 255] };
        painter.circle_filled(
            center,
            (particle.size * 0.3).max(1.0) * view.scale,
            rgba(marker, 255),
        );
    }
}
