//! Interactive particle life viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`Simulation`] and
//! implements [`eframe::App`] to drive it once per frame and draw the
//! particles through an egui UI.

use eframe::App;
use glam::Vec3;
use sim_core::{Simulation, config::SimConfig, types::ParticleType};

/// Colours for the first particle types; later types wrap around.
const PALETTE: [egui::Color32; 8] = [
    egui::Color32::from_rgb(235, 80, 80),
    egui::Color32::from_rgb(90, 210, 110),
    egui::Color32::from_rgb(90, 130, 240),
    egui::Color32::from_rgb(240, 220, 80),
    egui::Color32::from_rgb(80, 220, 220),
    egui::Color32::from_rgb(220, 100, 220),
    egui::Color32::from_rgb(240, 150, 60),
    egui::Color32::from_rgb(200, 200, 200),
];

fn type_color(kind: ParticleType) -> egui::Color32 {
    PALETTE[kind as usize % PALETTE.len()]
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: a [`Simulation`] owning particles and rules.
/// - UI state (pan/zoom, run flag, timing, cached rule summary).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input (rule regeneration, parameter edits).
/// 2. If `running` is `true` and enough time has passed, call [`Viewer::step_once`].
/// 3. Render the particles and the bounds outline.
///
/// Because every simulation mutation happens from inside `update`, a rule
/// regeneration can only ever land between two ticks.
///
/// ### Fields
/// - `sim` - The simulation being displayed.
/// - `summary` - Rule summary lines, refreshed whenever rules change.
///
/// - `running` - Whether the simulation is currently auto-advancing.
/// - `zoom` - Zoom factor (pixels per world unit).
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `step_interval` - Minimum wall time between automatic ticks (seconds).
/// - `last_step_time` - Time stamp of the last step (egui time).
/// - `last_step_dt` - Actual time delta between the last two steps (for display only).
/// - `last_error` - Message of the last failed tick, shown in the status bar.
pub struct Viewer {
    sim: Simulation,
    summary: Vec<String>,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
    last_error: Option<String>,
}

impl Viewer {
    /// Wraps a ready simulation. The view starts paused and zoomed so that
    /// the bounds roughly fill a default window.
    pub fn new(sim: Simulation) -> Self {
        let summary = sim.rule_summary();
        let extent = sim.config().bounds.extents.max_element().max(1.0);

        Self {
            sim,
            summary,
            running: false,
            zoom: 250.0 / extent,
            pan: egui::vec2(0.0, 0.0),
            step_interval: 0.0,
            last_step_time: 0.0,
            last_step_dt: 0.0,
            last_error: None,
        }
    }

    /// Starts over with a freshly spawned population and new rules.
    ///
    /// Keeps the current configuration and camera settings and stops
    /// auto-running. If the config is seeded the same population comes back.
    fn reset(&mut self) {
        match Simulation::with_scatter(self.sim.config().clone()) {
            Ok(sim) => {
                self.sim = sim;
                self.summary = self.sim.rule_summary();
                self.last_error = None;
            }
            Err(e) => {
                log::error!("reset failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
        self.running = false;
    }

    /// Advances the simulation by one fixed step of `delta_time`.
    ///
    /// A failed tick leaves the particles untouched, pauses the run loop
    /// and keeps the error for the status bar.
    fn step_once(&mut self) {
        let dt = self.sim.config().delta_time;
        if let Err(e) = self.sim.tick(dt) {
            self.last_error = Some(e.to_string());
            self.running = false;
        }
    }

    /// Replaces every rule and refreshes the summary.
    fn randomize_rules(&mut self) {
        self.sim.regenerate_rules(None);
        self.summary = self.sim.rule_summary();
    }

    /// Applies an edited config, keeping the old one if it is rejected.
    fn apply_config(&mut self, cfg: SimConfig) {
        if let Err(e) = self.sim.set_config(cfg) {
            log::warn!("config change rejected: {e}");
            self.last_error = Some(e.to_string());
        }
    }

    /// Converts a world-space position to screen-space.
    ///
    /// The view is an orthographic projection onto the XY plane: world
    /// coordinates are scaled by `zoom`, offset by `pan`, and then centered
    /// inside the given `rect`. The y-axis is flipped so that positive y
    /// goes up in world space.
    ///
    /// ### Parameters
    /// - `p` - World-space position; `z` is ignored.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding egui position in screen-space.
    fn world_to_screen(&self, p: Vec3, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space position back to the world XY plane.
    ///
    /// This is the inverse of [`Viewer::world_to_screen`] (up to floating
    /// point rounding) for points with `z = 0`.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec3 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec3::new(x, y, 0.0)
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("min interval = ")
                        .range(0.0..=1.0)
                        .speed(0.01),
                );

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = now - self.last_step_time;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 5.0..=500.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (tick count, timing, last error).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("ticks = {}", self.sim.tick_count()));
                ui.label(format!("particles = {}", self.sim.len()));
                ui.label(format!("seed = {}", self.sim.seed()));
                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }

    /// Builds the right-hand panel: tunable parameters and the rule list.
    fn ui_rules_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("rules_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Parameters");

                let mut cfg = self.sim.config().clone();
                let mut changed = false;
                changed |= ui
                    .add(egui::Slider::new(&mut cfg.force_scale, 0.0..=0.1).text("force scale"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut cfg.friction, 0.01..=0.99).text("friction"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut cfg.delta_time, 0.0..=0.1).text("delta time"))
                    .changed();

                ui.separator();
                ui.label("Generation ranges");
                changed |= ui
                    .add(egui::Slider::new(&mut cfg.g_range[0], 0.0..=1.0).text("g min"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut cfg.g_range[1], 0.0..=1.0).text("g max"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut cfg.distance_range[0], 0.25..=3.0).text("dist low"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut cfg.distance_range[1], 0.25..=3.0).text("dist high"))
                    .changed();

                if changed {
                    self.apply_config(cfg);
                }

                ui.separator();
                if ui.button("🎲 Randomize Rules").clicked() {
                    self.randomize_rules();
                }

                ui.separator();
                ui.heading("Rules");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let n = self.sim.rules().type_count().max(1);
                    for (i, line) in self.summary.iter().enumerate() {
                        let source = (i / n) as ParticleType;
                        ui.colored_label(type_color(source), egui::RichText::new(line).monospace());
                    }
                });
            });
    }

    /// Builds the central panel where the particles are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(5.0, 500.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            // Bounds outline (XY face of the box).
            let bounds = self.sim.config().bounds;
            let (lo, hi) = (bounds.min(), bounds.max());
            let corners = [
                Vec3::new(lo.x, lo.y, 0.0),
                Vec3::new(hi.x, lo.y, 0.0),
                Vec3::new(hi.x, hi.y, 0.0),
                Vec3::new(lo.x, hi.y, 0.0),
            ];
            let outline: Vec<egui::Pos2> = corners
                .iter()
                .map(|&c| self.world_to_screen(c, rect))
                .collect();
            painter.add(egui::Shape::closed_line(
                outline,
                egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
            ));

            // Particles.
            let r = (0.03 * self.zoom).max(1.5);
            for p in self.sim.current_state() {
                painter.circle_filled(self.world_to_screen(p.pos, rect), r, type_color(p.kind));
            }

            // Auto-run simulation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_rules_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn test_viewer() -> Viewer {
        let cfg = SimConfig {
            group_count: 3,
            group_size: 8,
            seed: Some(17),
            ..SimConfig::default()
        };
        Viewer::new(Simulation::with_scatter(cfg).unwrap())
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut viewer = test_viewer();
        viewer.zoom = 2.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let world_points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, -5.0, 0.0),
            Vec3::new(-3.5, 8.25, 0.0),
        ];

        let eps = 1e-5;

        for p in world_points {
            let screen = viewer.world_to_screen(p, rect);
            let back = viewer.screen_to_world(screen, rect);

            assert!(
                (back - p).abs().max_element() < eps,
                "roundtrip mismatch: p={:?}, back={:?}",
                p,
                back
            );
        }
    }

    #[test]
    fn new_caches_rule_summary() {
        let viewer = test_viewer();
        assert_eq!(viewer.summary.len(), 9);
        assert_eq!(viewer.summary, viewer.sim.rule_summary());
        assert!(!viewer.running);
    }

    #[test]
    fn step_once_advances_one_tick() {
        let mut viewer = test_viewer();
        viewer.step_once();
        viewer.step_once();
        assert_eq!(viewer.sim.tick_count(), 2);
        assert!(viewer.last_error.is_none());
    }

    #[test]
    fn reset_restores_fresh_simulation() {
        let mut viewer = test_viewer();
        let initial: Vec<_> = viewer.sim.current_state().to_vec();

        viewer.step_once();
        viewer.running = true;
        viewer.reset();

        // Seeded config: the same population comes back, untouched.
        assert_eq!(viewer.sim.tick_count(), 0);
        assert_eq!(viewer.sim.current_state(), initial.as_slice());
        assert!(!viewer.running);
    }

    #[test]
    fn randomize_rules_refreshes_summary() {
        let mut viewer = test_viewer();
        let before = viewer.summary.clone();

        viewer.randomize_rules();

        assert_eq!(viewer.summary.len(), before.len());
        assert_ne!(viewer.summary, before);
        assert_eq!(viewer.summary, viewer.sim.rule_summary());
    }

    #[test]
    fn rejected_config_is_reported() {
        let mut viewer = test_viewer();
        let cfg = SimConfig {
            friction: 1.5,
            ..viewer.sim.config().clone()
        };

        viewer.apply_config(cfg);

        assert!(viewer.last_error.is_some());
        assert_eq!(viewer.sim.config().friction, SimConfig::default().friction);
    }
}
