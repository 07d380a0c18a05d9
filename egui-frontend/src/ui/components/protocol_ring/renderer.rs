//! # Protocol Ring Renderer
//!
//! Renders the progress ring with egui painting primitives.

use eframe::egui;
use shared::ProtocolProgress;
use std::f32::consts::PI;

use crate::ui::components::styling::colors;

/// Configuration for ring appearance
#[derive(Debug, Clone)]
pub struct ProtocolRingConfig {
    /// Radius of the ring's center line
    pub radius: f32,
    pub stroke_width: f32,
    pub center_font_size: f32,
    pub secondary_font_size: f32,
}

impl Default for ProtocolRingConfig {
    fn default() -> Self {
        Self {
            radius: 48.0,
            stroke_width: 12.0,
            center_font_size: 14.0,
            secondary_font_size: 11.0,
        }
    }
}

pub struct ProtocolRing<'a> {
    progress: &'a ProtocolProgress,
    config: ProtocolRingConfig,
}

impl<'a> ProtocolRing<'a> {
    pub fn new(progress: &'a ProtocolProgress) -> Self {
        Self { progress, config: ProtocolRingConfig::default() }
    }

    pub fn with_config(mut self, config: ProtocolRingConfig) -> Self {
        self.config = config;
        self
    }
}

impl egui::Widget for ProtocolRing<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let side = (self.config.radius + self.config.stroke_width) * 2.0;
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
        if !ui.is_rect_visible(rect) {
            return response;
        }

        let painter = ui.painter();
        let center = rect.center();
        painter.circle_stroke(
            center,
            self.config.radius,
            egui::Stroke::new(self.config.stroke_width, colors::RING_BACKGROUND),
        );

        let ratio = self.progress.ratio.clamp(0.0, 1.0);
        if ratio > 0.0 {
            // Start at 12 o'clock
            let start_angle = -PI / 2.0;
            let end_angle = start_angle + 2.0 * PI * ratio;
            draw_arc(painter, center, self.config.radius, self.config.stroke_width, start_angle, end_angle);
        }

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            self.progress.label(),
            egui::FontId::proportional(self.config.center_font_size),
            ui.style().visuals.strong_text_color(),
        );
        painter.text(
            center + egui::vec2(0.0, self.config.center_font_size),
            egui::Align2::CENTER_CENTER,
            &self.progress.name,
            egui::FontId::proportional(self.config.secondary_font_size),
            ui.style().visuals.weak_text_color(),
        );

        response.on_hover_text(format!("{:.0}% complete", ratio * 100.0))
    }
}

/// Arc drawn as short line segments; egui has no native arc
fn draw_arc(painter: &egui::Painter, center: egui::Pos2, radius: f32, stroke_width: f32, start_angle: f32, end_angle: f32) {
    let arc_length = (end_angle - start_angle).abs();
    // Roughly 3 pixels per segment
    let segments = ((arc_length * radius / 3.0).ceil() as usize).clamp(8, 100);
    let step = (end_angle - start_angle) / segments as f32;

    let points: Vec<egui::Pos2> = (0..=segments)
        .map(|i| {
            let angle = start_angle + step * i as f32;
            egui::pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect();
    painter.add(egui::Shape::line(points, egui::Stroke::new(stroke_width, colors::PROTOCOL_RING)));
}
