//! # Slider Track Model
//!
//! Gesture state for the itch slider, free of any UI types so it can be driven
//! directly from tests. Positions are in pixels from the left edge of the
//! track; the width arrives from layout and may be unknown (0) for the first
//! frames, in which case gestures are ignored.

use shared::MAX_ITCH_LEVEL;

use super::spring::Spring;
use super::ItchSliderConfig;

#[derive(Debug, Clone)]
pub struct SliderTrack {
    width: f32,
    position: f32,
    value: u8,
    dragging: bool,
    /// External value waiting for the first layout
    pending_value: Option<u8>,
    last_external: Option<u8>,
    spring: Spring,
}

impl SliderTrack {
    pub fn new(config: &ItchSliderConfig, initial_value: u8) -> Self {
        let value = initial_value.min(MAX_ITCH_LEVEL);
        Self {
            width: 0.0,
            position: 0.0,
            value,
            dragging: false,
            pending_value: Some(value),
            last_external: Some(value),
            spring: Spring::new(config.spring.clone()),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Last value handed to the owner or received from it
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn max_value(&self) -> u8 {
        MAX_ITCH_LEVEL
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_animating(&self) -> bool {
        self.spring.is_animating()
    }

    /// Thumb location as a fraction of the track, always within 0.0..=1.0
    pub fn fraction(&self) -> f32 {
        if self.is_measured() {
            (self.position / self.width).clamp(0.0, 1.0)
        } else {
            self.value as f32 / MAX_ITCH_LEVEL as f32
        }
    }

    /// Record the measured track width. Non-finite or negative widths count as unknown.
    pub fn on_layout(&mut self, width: f32) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if width == self.width {
            return;
        }
        let was_measured = self.is_measured();
        self.width = width;
        if !self.is_measured() {
            return;
        }

        if let Some(pending) = self.pending_value.take() {
            self.value = pending;
            self.spring.animate_to(self.position_of(pending));
        } else if was_measured {
            // Keep the thumb on the committed value across resizes
            let target = self.position_of(self.value);
            if self.spring.is_animating() {
                self.spring.animate_to(target);
            } else {
                self.position = target;
            }
        }
    }

    /// Follow a value set by the owner (e.g. loading a check-in for edit).
    /// Only a change in what the owner reports counts; an owner that has not
    /// yet drained this track's commits cannot drag the thumb back.
    pub fn sync_external_value(&mut self, value: u8) {
        let value = value.min(MAX_ITCH_LEVEL);
        if self.last_external == Some(value) {
            return;
        }
        self.last_external = Some(value);
        if value == self.value || self.dragging {
            return;
        }

        self.value = value;
        if self.is_measured() {
            self.spring.animate_to(self.position_of(value));
        } else {
            self.pending_value = Some(value);
        }
    }

    /// Snap the thumb to the touch point
    pub fn on_pan_start(&mut self, x: f32) -> Option<u8> {
        if !self.is_measured() {
            return None;
        }
        self.dragging = true;
        self.spring.stop();
        self.position = self.clamp_x(x);
        self.commit(self.value_at(self.position))
    }

    /// Move the thumb with the pointer, every event
    pub fn on_pan_update(&mut self, x: f32) -> Option<u8> {
        if !self.is_measured() {
            return None;
        }
        self.dragging = true;
        self.spring.stop();
        self.position = self.clamp_x(x);
        self.commit(self.value_at(self.position))
    }

    pub fn on_pan_end(&mut self) {
        self.dragging = false;
    }

    /// Commit the tapped value at once; the thumb springs there
    pub fn on_tap(&mut self, x: f32) -> Option<u8> {
        if !self.is_measured() {
            return None;
        }
        let target = self.clamp_x(x);
        self.spring.animate_to(target);
        self.commit(self.value_at(target))
    }

    /// Advance animations by `dt` seconds. Returns whether another frame is needed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.spring.is_animating() {
            self.position = self.spring.step(self.position, dt);
        }
        self.spring.is_animating()
    }

    fn commit(&mut self, value: u8) -> Option<u8> {
        if value == self.value {
            return None;
        }
        self.value = value;
        Some(value)
    }

    fn clamp_x(&self, x: f32) -> f32 {
        if x.is_nan() {
            0.0
        } else {
            x.clamp(0.0, self.width)
        }
    }

    fn value_at(&self, x: f32) -> u8 {
        if !self.is_measured() {
            return 0;
        }
        let scaled = (x / self.width * MAX_ITCH_LEVEL as f32).round();
        scaled.clamp(0.0, MAX_ITCH_LEVEL as f32) as u8
    }

    fn position_of(&self, value: u8) -> f32 {
        value as f32 / MAX_ITCH_LEVEL as f32 * self.width
    }
}
