//! Configuration loader plus strongly typed settings structures.
//!
//! Everything a page author may want to tune lives here: the selectors each
//! controller queries at mount, scroll thresholds, timer periods, user-facing
//! messages and the booking time-slot catalog. The defaults ship embedded in
//! the binary; a TOML file only needs the keys it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::dom::selector::SelectorList;
use crate::widgets::{default_time_slots, ValidationMessages};

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Top-level configuration object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub messages: MessageConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

/// Selectors each controller queries once at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub mobile_menu_button: String,
    pub nav_menu: String,
    pub nav_overlay: String,
    pub nav_links: String,
    pub header: String,
    pub anchor_links: String,
    pub forms: String,
    pub form_fields: String,
    pub booking_triggers: String,
    pub booking_modal: String,
    pub modal_close: String,
    pub service_select: String,
    pub date_input: String,
    pub time_select: String,
    pub gallery_items: String,
    pub lightbox: String,
    pub lightbox_image: String,
    pub lightbox_close: String,
    pub lightbox_prev: String,
    pub lightbox_next: String,
    pub testimonial_slider: String,
    pub testimonial_items: String,
    pub testimonial_dots: String,
    pub faq_items: String,
    pub faq_question: String,
    pub faq_answer: String,
    pub lazy_images: String,
    pub animate_on_scroll: String,
    pub phone_inputs: String,
    pub countdowns: String,
    pub back_to_top: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            mobile_menu_button: ".mobile-menu-btn".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_overlay: ".nav-overlay".to_string(),
            nav_links: ".nav-menu a".to_string(),
            header: "header".to_string(),
            anchor_links: "a[href^=\"#\"]".to_string(),
            forms: "form".to_string(),
            form_fields: "input, textarea, select".to_string(),
            booking_triggers: ".book-now-btn, .cta-btn".to_string(),
            booking_modal: "#booking-modal".to_string(),
            modal_close: ".close-modal".to_string(),
            service_select: "#service".to_string(),
            date_input: "#preferred-date".to_string(),
            time_select: "#preferred-time".to_string(),
            gallery_items: ".gallery-item".to_string(),
            lightbox: "#lightbox".to_string(),
            lightbox_image: "#lightbox-img".to_string(),
            lightbox_close: ".lightbox-close".to_string(),
            lightbox_prev: ".lightbox-prev".to_string(),
            lightbox_next: ".lightbox-next".to_string(),
            testimonial_slider: ".testimonial-slider".to_string(),
            testimonial_items: ".testimonial-item".to_string(),
            testimonial_dots: ".testimonial-dot".to_string(),
            faq_items: ".faq-item".to_string(),
            faq_question: ".faq-question".to_string(),
            faq_answer: ".faq-answer".to_string(),
            lazy_images: "img[data-src]".to_string(),
            animate_on_scroll: ".animate-on-scroll".to_string(),
            phone_inputs: "input[type=\"tel\"]".to_string(),
            countdowns: ".countdown-timer".to_string(),
            back_to_top: ".back-to-top".to_string(),
        }
    }
}

/// Scroll offsets are in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub scrolled_threshold: f64,
    pub hide_threshold: f64,
    pub back_to_top_threshold: f64,
    /// Gap left between the sticky header and an anchor target
    pub anchor_gap: f64,
    /// Fraction of an element that must be visible to trigger its animation
    pub animation_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 100.0,
            hide_threshold: 200.0,
            back_to_top_threshold: 300.0,
            anchor_gap: 20.0,
            animation_threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub carousel_interval_ms: u64,
    pub countdown_tick_ms: u64,
    pub form_reset_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            carousel_interval_ms: 5000,
            countdown_tick_ms: 1000,
            form_reset_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub required: String,
    pub invalid_email: String,
    pub invalid_phone: String,
    /// Markup injected into a form after a successful submit
    pub success_html: String,
    pub countdown_expired: String,
    pub time_placeholder: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        let validation = ValidationMessages::default();
        Self {
            required: validation.required,
            invalid_email: validation.email,
            invalid_phone: validation.phone,
            success_html: "<i class=\"fas fa-check-circle\"></i> Thank you! We'll contact you soon to schedule your consultation.".to_string(),
            countdown_expired: "Offer Expired".to_string(),
            time_placeholder: "Select Time".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Offered for every service and date, in display order
    pub time_slots: Vec<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            time_slots: default_time_slots(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Error,
    Warning,
}

/// A problem found by [`Config::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
    pub kind: IssueKind,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            kind: IssueKind::Error,
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            kind: IssueKind::Warning,
        }
    }
}

impl SelectorConfig {
    /// Every selector with its config key.
    pub fn entries(&self) -> [(&'static str, &str); 31] {
        [
            ("mobile_menu_button", self.mobile_menu_button.as_str()),
            ("nav_menu", self.nav_menu.as_str()),
            ("nav_overlay", self.nav_overlay.as_str()),
            ("nav_links", self.nav_links.as_str()),
            ("header", self.header.as_str()),
            ("anchor_links", self.anchor_links.as_str()),
            ("forms", self.forms.as_str()),
            ("form_fields", self.form_fields.as_str()),
            ("booking_triggers", self.booking_triggers.as_str()),
            ("booking_modal", self.booking_modal.as_str()),
            ("modal_close", self.modal_close.as_str()),
            ("service_select", self.service_select.as_str()),
            ("date_input", self.date_input.as_str()),
            ("time_select", self.time_select.as_str()),
            ("gallery_items", self.gallery_items.as_str()),
            ("lightbox", self.lightbox.as_str()),
            ("lightbox_image", self.lightbox_image.as_str()),
            ("lightbox_close", self.lightbox_close.as_str()),
            ("lightbox_prev", self.lightbox_prev.as_str()),
            ("lightbox_next", self.lightbox_next.as_str()),
            ("testimonial_slider", self.testimonial_slider.as_str()),
            ("testimonial_items", self.testimonial_items.as_str()),
            ("testimonial_dots", self.testimonial_dots.as_str()),
            ("faq_items", self.faq_items.as_str()),
            ("faq_question", self.faq_question.as_str()),
            ("faq_answer", self.faq_answer.as_str()),
            ("lazy_images", self.lazy_images.as_str()),
            ("animate_on_scroll", self.animate_on_scroll.as_str()),
            ("phone_inputs", self.phone_inputs.as_str()),
            ("countdowns", self.countdowns.as_str()),
            ("back_to_top", self.back_to_top.as_str()),
        ]
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG).context("Failed to parse embedded default config")
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&contents).context(format!("Failed to parse config file: {:?}", path))
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Otherwise the profile config is used if
    /// present, falling back to the embedded defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let profile = Self::config_path()?;
        if profile.exists() {
            tracing::info!("Loading config from {:?}", profile);
            return Self::load_from_file(&profile);
        }

        tracing::debug!("No config at {:?}, using embedded defaults", profile);
        Self::embedded()
    }

    /// Get the base directory (~/.site-controls/)
    /// Can be overridden with SITE_CONTROLS_DIR environment variable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("SITE_CONTROLS_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".site-controls"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Look for settings that would silently disable or break a widget.
    pub fn check(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (key, selector) in self.selectors.entries() {
            if SelectorList::parse(selector).is_empty() {
                issues.push(ConfigIssue::error(
                    &format!("selectors.{key}"),
                    format!("{selector:?} is not a usable selector"),
                ));
            }
        }

        let timings = [
            ("timing.carousel_interval_ms", self.timing.carousel_interval_ms),
            ("timing.countdown_tick_ms", self.timing.countdown_tick_ms),
        ];
        for (field, period) in timings {
            if period == 0 {
                issues.push(ConfigIssue::error(field, "interval must be greater than zero"));
            }
        }
        if self.timing.form_reset_delay_ms == 0 {
            issues.push(ConfigIssue::warning(
                "timing.form_reset_delay_ms",
                "acknowledgement disappears immediately",
            ));
        }

        if self.scroll.hide_threshold < self.scroll.scrolled_threshold {
            issues.push(ConfigIssue::warning(
                "scroll.hide_threshold",
                format!(
                    "{} is below scrolled_threshold {}",
                    self.scroll.hide_threshold, self.scroll.scrolled_threshold
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.scroll.animation_threshold) {
            issues.push(ConfigIssue::error(
                "scroll.animation_threshold",
                "must be between 0.0 and 1.0",
            ));
        }

        if self.booking.time_slots.is_empty() {
            issues.push(ConfigIssue::warning(
                "booking.time_slots",
                "time selector will only offer the placeholder",
            ));
        }

        issues
    }

    pub fn validation_messages(&self) -> ValidationMessages {
        ValidationMessages {
            required: self.messages.required.clone(),
            email: self.messages.invalid_email.clone(),
            phone: self.messages.invalid_phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_matches_builtin_defaults() {
        let embedded = Config::embedded().unwrap();
        assert_eq!(embedded, Config::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [timing]
            carousel_interval_ms = 8000

            [messages]
            countdown_expired = "Sale over"
            "#,
        )
        .unwrap();
        assert_eq!(config.timing.carousel_interval_ms, 8000);
        assert_eq!(config.timing.form_reset_delay_ms, 3000);
        assert_eq!(config.messages.countdown_expired, "Sale over");
        assert_eq!(config.messages.time_placeholder, "Select Time");
        assert_eq!(config.booking.time_slots.len(), 9);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let text = Config::default().to_toml_string().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_defaults_pass_check() {
        assert!(Config::default().check().is_empty());
    }

    #[test]
    fn test_check_reports_problems() {
        let mut config = Config::default();
        config.selectors.faq_items = "   ".to_string();
        config.timing.carousel_interval_ms = 0;
        config.scroll.hide_threshold = 50.0;
        config.booking.time_slots.clear();

        let issues = config.check();
        let errors: Vec<&str> = issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Error)
            .map(|issue| issue.field.as_str())
            .collect();
        let warnings: Vec<&str> = issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Warning)
            .map(|issue| issue.field.as_str())
            .collect();
        assert_eq!(errors, vec!["selectors.faq_items", "timing.carousel_interval_ms"]);
        assert_eq!(warnings, vec!["scroll.hide_threshold", "booking.time_slots"]);
    }

    #[test]
    fn test_check_rejects_pseudo_class_selector() {
        let mut config = Config::default();
        config.selectors.nav_links = ".nav-menu a:hover".to_string();
        let issues = config.check();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::Error);
        assert_eq!(issues[0].field, "selectors.nav_links");
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(Config::from_toml("[timing]\ncarousel_interval_ms = \"soon\"").is_err());
    }
}
