//! # Styling Module
//!
//! Global egui style and the color palette for the tracker.
//!
//! ## Key Functions:
//! - `setup_tracker_style()` - Configure global egui styling
//! - `colors::itch_level_color()` - Green to red scale for itch levels

use eframe::egui;

/// Setup UI styling for the entire application
pub fn setup_tracker_style(ctx: &egui::Context) {
    ctx.set_style({
        let mut style = (*ctx.style()).clone();

        style.visuals.button_frame = true;
        // In egui 0.28, text edits use extreme_bg_color
        style.visuals.extreme_bg_color = egui::Color32::from_rgb(248, 248, 248);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(26.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );

        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.visuals.widgets.inactive.rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.active.rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(8.0);

        style
    });
}

/// Color constants for the tracker theme
pub mod colors {
    use eframe::egui::Color32;

    pub const CALM: Color32 = Color32::from_rgb(76, 175, 80); // Green
    pub const ITCHY: Color32 = Color32::from_rgb(255, 193, 7); // Amber
    pub const FLARING: Color32 = Color32::from_rgb(229, 57, 53); // Red

    pub const PROTOCOL_RING: Color32 = Color32::from_rgb(94, 53, 177); // Deep purple
    pub const RING_BACKGROUND: Color32 = Color32::from_rgb(230, 230, 235);
    pub const STREAK_TEXT: Color32 = Color32::from_rgb(255, 112, 67); // Orange

    /// Green at 0, amber at 5, red at 10
    pub fn itch_level_color(itch_level: u8) -> Color32 {
        let t = (itch_level.min(10) as f32) / 10.0;
        let (from, to, t) = if t <= 0.5 { (CALM, ITCHY, t * 2.0) } else { (ITCHY, FLARING, (t - 0.5) * 2.0) };
        Color32::from_rgb(
            (from.r() as f32 * (1.0 - t) + to.r() as f32 * t) as u8,
            (from.g() as f32 * (1.0 - t) + to.g() as f32 * t) as u8,
            (from.b() as f32 * (1.0 - t) + to.b() as f32 * t) as u8,
        )
    }

}
