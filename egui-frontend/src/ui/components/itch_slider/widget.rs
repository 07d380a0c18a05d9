//! # Itch Slider Widget
//!
//! egui front end for `SliderTrack`. The track model is kept in egui's temp
//! memory between frames; value changes leave through the commit channel and
//! the host picks them up when it drains the receiver.

use eframe::egui;

use super::handoff::ValueCommitSender;
use super::track::SliderTrack;
use super::ItchSliderConfig;
use crate::ui::components::styling::colors;

pub struct ItchSlider<'a> {
    value: u8,
    commits: &'a mut ValueCommitSender,
    config: &'a ItchSliderConfig,
    id_source: egui::Id,
}

impl<'a> ItchSlider<'a> {
    /// `value` is the owner's current value; the widget follows it when it changes
    pub fn new(value: u8, commits: &'a mut ValueCommitSender, config: &'a ItchSliderConfig) -> Self {
        Self {
            value,
            commits,
            config,
            id_source: egui::Id::new("itch_slider"),
        }
    }

    /// Needed when more than one slider is on screen
    pub fn id_source(mut self, id_source: impl std::hash::Hash) -> Self {
        self.id_source = egui::Id::new(id_source);
        self
    }
}

impl egui::Widget for ItchSlider<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let inset = self.config.thumb_radius;
        let desired_size = egui::vec2(ui.available_width(), inset * 2.0 + 4.0);
        let (rect, mut response) = ui.allocate_exact_size(desired_size, egui::Sense::click_and_drag());

        let id = ui.make_persistent_id(self.id_source);
        let mut track = ui
            .data_mut(|data| data.get_temp::<SliderTrack>(id))
            .unwrap_or_else(|| SliderTrack::new(self.config, self.value));

        let track_left = rect.left() + inset;
        track.on_layout(rect.width() - 2.0 * inset);
        track.sync_external_value(self.value);

        let pointer_x = response.interact_pointer_pos().map(|pos| pos.x - track_left);
        let mut changed = None;
        if let Some(x) = pointer_x {
            if response.drag_started() {
                changed = track.on_pan_start(x);
            } else if response.dragged() {
                changed = track.on_pan_update(x);
            } else if response.clicked() {
                changed = track.on_tap(x);
            }
        }
        if response.drag_stopped() {
            track.on_pan_end();
        }

        if let Some(value) = changed {
            log::debug!("Itch slider moved to {}", value);
            self.commits.commit(value);
            response.mark_changed();
        }
        self.commits.try_flush();

        let dt = ui.input(|input| input.stable_dt);
        if track.tick(dt) || self.commits.has_pending() {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            paint(ui, rect, &response, &track, self.config);
        }

        ui.data_mut(|data| data.insert_temp(id, track));
        response
    }
}

fn paint(ui: &egui::Ui, rect: egui::Rect, response: &egui::Response, track: &SliderTrack, config: &ItchSliderConfig) {
    let painter = ui.painter();
    let visuals = ui.style().interact(response);
    let inset = config.thumb_radius;
    let rounding = config.track_height / 2.0;

    let rail = egui::Rect::from_min_max(
        egui::pos2(rect.left() + inset, rect.center().y - config.track_height / 2.0),
        egui::pos2(rect.right() - inset, rect.center().y + config.track_height / 2.0),
    );
    painter.rect_filled(rail, rounding, ui.visuals().widgets.inactive.bg_fill);

    let thumb_x = rail.left() + track.fraction() * rail.width();
    let fill = colors::itch_level_color(track.value());
    let filled = egui::Rect::from_min_max(rail.min, egui::pos2(thumb_x, rail.max.y));
    painter.rect_filled(filled, rounding, fill);

    let thumb_center = egui::pos2(thumb_x, rect.center().y);
    painter.circle(thumb_center, config.thumb_radius, visuals.bg_fill, egui::Stroke::new(2.0, fill));
    painter.text(
        thumb_center,
        egui::Align2::CENTER_CENTER,
        track.value().to_string(),
        egui::FontId::proportional(config.thumb_radius),
        visuals.text_color(),
    );
}
