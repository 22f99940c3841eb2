//! Page configuration: DOM contract names, copy, and the contact strategy.
//!
//! # Design
//! - Every field has a default matching the stock page markup, so an absent
//!   configuration block behaves like the unconfigured page.
//! - The block is JSON embedded in the page (`<script type="application/json">`)
//!   and parsed with `serde_json`; unknown fields are rejected to catch typos.
//! - [`PageConfig::validate`] runs after parsing; a rejected block falls back to defaults.

use crate::core::contact::{ContactMessages, ContactStrategy, RedirectMarker};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Id of the script element carrying the JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Full page configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Element ids and selectors the controller looks up.
    pub selectors: Selectors,
    /// CSS class names toggled by the controller.
    pub classes: ClassNames,
    /// Theme persistence settings.
    pub theme: ThemeSettings,
    /// Contact flow settings.
    pub contact: ContactSettings,
    /// Video launcher settings.
    pub video: VideoSettings,
    /// Attribute on category buttons naming the panel id they reveal.
    pub category_attribute: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: ClassNames::default(),
            theme: ThemeSettings::default(),
            contact: ContactSettings::default(),
            video: VideoSettings::default(),
            category_attribute: "data-category".into(),
        }
    }
}

/// Ids and selectors making up the DOM contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    /// Theme toggle button id.
    pub theme_toggle: String,
    /// Footer year placeholder id.
    pub current_year: String,
    /// Footer name placeholder id.
    pub footer_name: String,
    /// Hero heading id the footer name is copied from.
    pub hero_name: String,
    /// Selector matching video trigger elements.
    pub video_trigger: String,
    /// Contact form id.
    pub contact_form: String,
    /// Selector of the submit control, scoped to the contact form.
    pub submit_control: String,
    /// Status region id (inline strategy).
    pub form_status: String,
    /// Success banner id (redirect strategy).
    pub form_success: String,
    /// Selector matching skill category buttons.
    pub category_button: String,
    /// Selector matching skill panels.
    pub skill_set: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle: "theme-toggle".into(),
            current_year: "current-year".into(),
            footer_name: "footer-name".into(),
            hero_name: "hero-name".into(),
            video_trigger: ".video-trigger".into(),
            contact_form: "contact-form".into(),
            submit_control: "button[type=\"submit\"]".into(),
            form_status: "form-status".into(),
            form_success: "form-success".into(),
            category_button: ".category-btn".into(),
            skill_set: ".skill-set".into(),
        }
    }
}

/// Class names used as visual markers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    /// Marker placed on the theme root in dark mode.
    pub dark: String,
    /// Marker on the selected category button.
    pub active: String,
    /// Marker on hidden skill panels.
    pub hidden: String,
    /// Marker on the status region when it shows an error.
    pub error: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            dark: "dark".into(),
            active: "active".into(),
            hidden: "hidden".into(),
            error: "is-error".into(),
        }
    }
}

/// Element carrying the dark marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeRoot {
    /// The `<body>` element.
    #[default]
    Body,
    /// The `<html>` element.
    Document,
}

/// Theme persistence settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSettings {
    /// Storage key holding `light` or `dark`.
    pub storage_key: String,
    /// Element receiving the dark marker.
    pub root: ThemeRoot,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            root: ThemeRoot::Body,
        }
    }
}

/// Contact flow settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactSettings {
    /// Which submission flow the page uses.
    pub strategy: ContactStrategy,
    /// Submit label shown while a request is in flight.
    pub busy_label: String,
    /// Status text after a successful submission.
    pub success_message: String,
    /// Status text after a failed submission; `{email}` is replaced by `fallback_email`.
    pub error_message: String,
    /// Manual contact address offered when submission fails.
    pub fallback_email: String,
    /// Delay before the success status hides itself.
    pub auto_hide_ms: u32,
    /// Query parameter set by the form endpoint after a redirect.
    pub redirect_param: String,
    /// Value of `redirect_param` signalling success.
    pub redirect_value: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            strategy: ContactStrategy::InlineAsync,
            busy_label: "Sending...".into(),
            success_message: "Thanks for reaching out! Your message is on its way.".into(),
            error_message:
                "Something went wrong. Please try again or email me directly at {email}.".into(),
            fallback_email: "hello@example.com".into(),
            auto_hide_ms: 5_000,
            redirect_param: "form".into(),
            redirect_value: "sent".into(),
        }
    }
}

impl ContactSettings {
    /// Messages used by the inline submission flow.
    #[must_use]
    pub fn messages(&self) -> ContactMessages {
        ContactMessages {
            busy_label: self.busy_label.clone(),
            success: self.success_message.clone(),
            error: self.error_message.replace("{email}", &self.fallback_email),
            auto_hide_ms: self.auto_hide_ms,
        }
    }

    /// Query marker used by the redirect flow.
    #[must_use]
    pub fn marker(&self) -> RedirectMarker {
        RedirectMarker {
            param: self.redirect_param.clone(),
            value: self.redirect_value.clone(),
        }
    }
}

/// Video launcher settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoSettings {
    /// URL prefix the video id is appended to.
    pub url_base: String,
    /// Attribute holding the video id.
    pub id_attribute: String,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            url_base: "https://www.youtube.com/watch?v=".into(),
            id_attribute: "data-video-id".into(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON configuration block.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the controller relies on.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("theme.storage_key", &self.theme.storage_key),
            ("classes.dark", &self.classes.dark),
            ("classes.active", &self.classes.active),
            ("classes.hidden", &self.classes.hidden),
            ("classes.error", &self.classes.error),
            ("video.id_attribute", &self.video.id_attribute),
            ("category_attribute", &self.category_attribute),
            ("contact.redirect_param", &self.contact.redirect_param),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidField {
                    field,
                    reason: "must not be empty",
                });
            }
        }
        for (field, value) in [
            ("classes.dark", &self.classes.dark),
            ("classes.active", &self.classes.active),
            ("classes.hidden", &self.classes.hidden),
            ("classes.error", &self.classes.error),
        ] {
            if value.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidField {
                    field,
                    reason: "class names must not contain whitespace",
                });
            }
        }
        if self.contact.auto_hide_ms == 0 {
            return Err(ConfigError::InvalidField {
                field: "contact.auto_hide_ms",
                reason: "must be greater than zero",
            });
        }
        if !(self.video.url_base.starts_with("https://")
            || self.video.url_base.starts_with("http://"))
        {
            return Err(ConfigError::InvalidField {
                field: "video.url_base",
                reason: "must be an http(s) URL",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_yields_stock_page_contract() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.contact.auto_hide_ms, 5_000);
        assert_eq!(config.contact.strategy, ContactStrategy::InlineAsync);
        assert_eq!(config.category_attribute, "data-category");
    }

    #[test]
    fn partial_block_overrides_only_named_fields() {
        let config = PageConfig::from_json(
            r#"{"contact": {"strategy": "redirect-marker", "fallback_email": "me@site.dev"}}"#,
        )
        .unwrap();
        assert_eq!(config.contact.strategy, ContactStrategy::RedirectMarker);
        assert_eq!(config.contact.busy_label, "Sending...");
        assert!(config.contact.messages().error.contains("me@site.dev"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = PageConfig::from_json(r#"{"colour": "blue"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_auto_hide_is_invalid() {
        let err = PageConfig::from_json(r#"{"contact": {"auto_hide_ms": 0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "contact.auto_hide_ms",
                ..
            }
        ));
    }

    #[test]
    fn non_http_video_base_is_invalid() {
        let err =
            PageConfig::from_json(r#"{"video": {"url_base": "javascript:alert(1)//"}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "video.url_base",
                ..
            }
        ));
    }

    #[test]
    fn class_names_with_spaces_are_invalid() {
        let err = PageConfig::from_json(r#"{"classes": {"dark": "very dark"}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "classes.dark",
                ..
            }
        ));
    }

    #[test]
    fn marker_uses_redirect_settings() {
        let marker = ContactSettings::default().marker();
        assert_eq!(marker.param, "form");
        assert_eq!(marker.value, "sent");
    }
}
