use crate::{Error, Result};

/// Window inner size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Tuning knobs for every page behavior. `Default` carries the values the
/// production page ships with.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub viewport: Viewport,

    /// Vertical offset after which the header is marked `scrolled`.
    pub header_scroll_threshold: f64,
    /// Header-height compensation applied to section spans.
    pub section_offset: f64,

    pub autoplay_interval_ms: i64,
    pub swipe_threshold: f64,

    /// The card strip loops only while the viewport is at most this wide.
    pub strip_max_width: f64,
    pub strip_trailing_margin: f64,
    pub strip_leading_margin: f64,
    pub strip_settle_delay_ms: i64,

    pub required_fields: Vec<String>,
    pub email_field: String,
    pub email_pattern: String,
    pub form_reset_delay_ms: i64,
    pub invalid_field_color: String,
    pub submitted_color: String,
    pub submitted_label: String,
    pub missing_fields_notice: String,
    pub invalid_email_notice: String,

    pub counter_duration_ms: i64,
    pub frame_interval_ms: i64,

    pub reveal_threshold: f64,
    pub reveal_bottom_margin: f64,

    pub tooltip_offset_x: f64,
    pub tooltip_offset_y: f64,

    pub video_notice: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            header_scroll_threshold: 100.0,
            section_offset: 150.0,
            autoplay_interval_ms: 5_000,
            swipe_threshold: 50.0,
            strip_max_width: 768.0,
            strip_trailing_margin: 50.0,
            strip_leading_margin: 10.0,
            strip_settle_delay_ms: 100,
            required_fields: [
                "playerName",
                "parentName",
                "email",
                "phone",
                "gradYear",
                "position",
                "state",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            email_field: "email".into(),
            email_pattern: r"^[^\s@]+@[^\s@]+\.[^\s@]+$".into(),
            form_reset_delay_ms: 3_000,
            invalid_field_color: "#e74c3c".into(),
            submitted_color: "#27ae60".into(),
            submitted_label: "Request Submitted!".into(),
            missing_fields_notice: "Please fill in all required fields.".into(),
            invalid_email_notice: "Please enter a valid email address.".into(),
            counter_duration_ms: 2_000,
            frame_interval_ms: 16,
            reveal_threshold: 0.1,
            reveal_bottom_margin: 50.0,
            tooltip_offset_x: 10.0,
            tooltip_offset_y: -30.0,
            video_notice: "Add your video URL in the JavaScript file to enable video playback.".into(),
        }
    }
}

impl PageConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.viewport.width >= 0.0 && self.viewport.height >= 0.0) {
            return Err(Error::InvalidConfig(
                "viewport dimensions must be non-negative".into(),
            ));
        }
        if self.autoplay_interval_ms <= 0 {
            return Err(Error::InvalidConfig(
                "autoplay_interval_ms must be positive".into(),
            ));
        }
        if self.frame_interval_ms <= 0 {
            return Err(Error::InvalidConfig(
                "frame_interval_ms must be positive".into(),
            ));
        }
        if self.counter_duration_ms < self.frame_interval_ms {
            return Err(Error::InvalidConfig(format!(
                "counter_duration_ms ({}) must cover at least one frame ({})",
                self.counter_duration_ms, self.frame_interval_ms
            )));
        }
        if self.strip_settle_delay_ms < 0 || self.form_reset_delay_ms < 0 {
            return Err(Error::InvalidConfig("delays must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(Error::InvalidConfig(
                "reveal_threshold must be within 0..=1".into(),
            ));
        }
        if self.swipe_threshold < 0.0 {
            return Err(Error::InvalidConfig(
                "swipe_threshold must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
