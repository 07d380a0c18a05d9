//! # Weekly Chart
//!
//! Bar per day of the weekly summary, height and color by average itch.
//! Days without a check-in get an empty outline.

use chrono::Datelike;
use eframe::egui;
use shared::WeeklySummary;

use super::styling::colors;

const CHART_HEIGHT: f32 = 90.0;
const MAX_ITCH: f32 = 10.0;

pub struct WeeklyChart<'a> {
    summary: &'a WeeklySummary,
}

impl<'a> WeeklyChart<'a> {
    pub fn new(summary: &'a WeeklySummary) -> Self {
        Self { summary }
    }
}

impl egui::Widget for WeeklyChart<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let width = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT + 18.0), egui::Sense::hover());
        let day_count = self.summary.days.len();
        if day_count == 0 || !ui.is_rect_visible(rect) {
            return response;
        }

        let painter = ui.painter();
        let slot = rect.width() / day_count as f32;
        let bar_width = (slot * 0.6).max(2.0);
        let baseline = rect.top() + CHART_HEIGHT;

        for (i, day) in self.summary.days.iter().enumerate() {
            let center_x = rect.left() + slot * (i as f32 + 0.5);
            let full = egui::Rect::from_min_max(
                egui::pos2(center_x - bar_width / 2.0, rect.top()),
                egui::pos2(center_x + bar_width / 2.0, baseline),
            );

            match day.average_itch {
                Some(average) => {
                    let height = (average / MAX_ITCH).clamp(0.0, 1.0) * CHART_HEIGHT;
                    let bar = egui::Rect::from_min_max(egui::pos2(full.left(), baseline - height), full.max);
                    painter.rect_filled(bar, 3.0, colors::itch_level_color(average.round() as u8));
                }
                None => {
                    painter.rect_stroke(full, 3.0, egui::Stroke::new(1.0, colors::RING_BACKGROUND));
                }
            }

            painter.text(
                egui::pos2(center_x, baseline + 9.0),
                egui::Align2::CENTER_CENTER,
                day.date.weekday().to_string(),
                egui::FontId::proportional(11.0),
                ui.visuals().weak_text_color(),
            );
        }

        let hover = match self.summary.average_itch {
            Some(average) => format!(
                "{} check-ins, average itch {:.1}, {} flares",
                self.summary.check_in_count, average, self.summary.flare_count
            ),
            None => format!("No check-ins this week, {} flares", self.summary.flare_count),
        };
        response.on_hover_text(hover)
    }
}
