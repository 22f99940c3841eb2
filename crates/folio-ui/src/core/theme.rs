//! Light/dark theme resolution, application, and persistence.
//!
//! # Design
//! - The applied theme lives in the DOM (dark class on the theme root); the toggle reads it back.
//! - Loading never writes storage; only an explicit toggle persists.
//! - Any stored value short-circuits the environment query, even one that is not `dark`.

use crate::core::dom::UiElement;
use crate::error::StorageError;
use std::cell::Cell;

/// Light or dark theme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    /// Light theme mode.
    Light,
    /// Dark theme mode.
    Dark,
}

impl ThemeMode {
    /// Value persisted in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interpret a stored value; anything but `dark` is light.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" { Self::Dark } else { Self::Light }
    }

    /// The opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon displayed on the toggle for this mode.
    #[must_use]
    pub const fn icon(self) -> ThemeIcon {
        match self {
            Self::Light => SUN_ICON,
            Self::Dark => MOON_ICON,
        }
    }
}

/// Glyph shown on the theme toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeIcon {
    /// Value written to `data-icon`.
    pub name: &'static str,
    /// Inline SVG markup.
    pub markup: &'static str,
}

/// Sun glyph, shown in light mode.
pub const SUN_ICON: ThemeIcon = ThemeIcon {
    name: "sun",
    markup: concat!(
        r#"<svg class="theme-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
        r#"<circle cx="12" cy="12" r="4" fill="none" stroke="currentColor" stroke-width="1.5"></circle>"#,
        r#"<g fill="none" stroke="currentColor" stroke-width="1.5" stroke-linecap="round">"#,
        r#"<line x1="12" y1="3" x2="12" y2="5"></line>"#,
        r#"<line x1="12" y1="19" x2="12" y2="21"></line>"#,
        r#"<line x1="21" y1="12" x2="19" y2="12"></line>"#,
        r#"<line x1="5" y1="12" x2="3" y2="12"></line>"#,
        r#"<line x1="18.364" y1="5.636" x2="16.95" y2="7.05"></line>"#,
        r#"<line x1="7.05" y1="16.95" x2="5.636" y2="18.364"></line>"#,
        r#"<line x1="18.364" y1="18.364" x2="16.95" y2="16.95"></line>"#,
        r#"<line x1="7.05" y1="7.05" x2="5.636" y2="5.636"></line>"#,
        "</g></svg>"
    ),
};

/// Moon glyph, shown in dark mode.
pub const MOON_ICON: ThemeIcon = ThemeIcon {
    name: "moon",
    markup: concat!(
        r#"<svg class="theme-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
        r#"<path d="M21 12.79A9 9 0 1111.21 3 7 7 0 0021 12.79z" fill="currentColor"></path>"#,
        "</svg>"
    ),
};

/// Origin-scoped durable key-value storage.
pub trait PreferenceStore {
    /// Read a value; unavailable storage reads as absent.
    fn read(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Pick the initial theme from the stored value or, when absent, the environment.
pub fn resolve_initial(stored: Option<&str>, prefers_dark: impl FnOnce() -> bool) -> ThemeMode {
    match stored {
        Some(value) => ThemeMode::from_stored(value),
        None if prefers_dark() => ThemeMode::Dark,
        None => ThemeMode::Light,
    }
}

/// Applies and persists the theme for one page.
#[derive(Debug)]
pub struct ThemeController<E, S> {
    root: Option<E>,
    toggle: Option<E>,
    store: S,
    storage_key: String,
    dark_class: String,
    applied: Cell<ThemeMode>,
}

impl<E: UiElement, S: PreferenceStore> ThemeController<E, S> {
    /// Build a controller over the theme root and the optional toggle button.
    pub fn new(
        root: Option<E>,
        toggle: Option<E>,
        store: S,
        storage_key: impl Into<String>,
        dark_class: impl Into<String>,
    ) -> Self {
        Self {
            root,
            toggle,
            store,
            storage_key: storage_key.into(),
            dark_class: dark_class.into(),
            applied: Cell::new(ThemeMode::Light),
        }
    }

    /// Resolve the initial theme and apply it without persisting.
    pub fn initialize(&self, prefers_dark: impl FnOnce() -> bool) -> ThemeMode {
        let stored = self.store.read(&self.storage_key);
        let theme = resolve_initial(stored.as_deref(), prefers_dark);
        self.apply(theme);
        theme
    }

    /// Reflect `theme` on the root marker and the toggle's icon and pressed state.
    pub fn apply(&self, theme: ThemeMode) {
        if let Some(root) = &self.root {
            root.set_class(&self.dark_class, theme == ThemeMode::Dark);
        }
        self.applied.set(theme);
        let Some(toggle) = &self.toggle else {
            return;
        };
        let icon = theme.icon();
        toggle.set_inner_html(icon.markup);
        toggle.set_attribute("data-icon", icon.name);
        toggle.set_attribute(
            "aria-pressed",
            if theme == ThemeMode::Dark { "true" } else { "false" },
        );
    }

    /// Theme currently shown, read from the root marker when there is a root.
    #[must_use]
    pub fn current(&self) -> ThemeMode {
        self.root.as_ref().map_or_else(
            || self.applied.get(),
            |root| {
                if root.has_class(&self.dark_class) {
                    ThemeMode::Dark
                } else {
                    ThemeMode::Light
                }
            },
        )
    }

    /// Invert the current theme, apply it, then persist it.
    ///
    /// The new theme stays applied when the write fails.
    ///
    /// # Errors
    /// Returns [`StorageError`] when persisting the new theme fails.
    pub fn toggle(&self) -> Result<ThemeMode, StorageError> {
        let next = self.current().toggled();
        self.apply(next);
        self.store.write(&self.storage_key, next.as_str())?;
        Ok(next)
    }

    /// Whether a toggle button exists on the page.
    #[must_use]
    pub const fn has_toggle(&self) -> bool {
        self.toggle.is_some()
    }
}
