//! Video trigger handling.

use crate::core::dom::UiElement;

/// Opens URLs in a new browsing context without an opener reference.
pub trait Launcher {
    /// Open `url` in a new, unlinked browsing context.
    fn open_isolated(&self, url: &str);
}

/// Build the watch URL for `id`, or `None` for a blank id.
#[must_use]
pub fn video_url(base: &str, id: &str) -> Option<String> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some(format!("{base}{}", urlencoding::encode(id)))
}

/// Launch the video named by `trigger`'s id attribute; returns the opened URL.
pub fn launch<E: UiElement, L: Launcher>(
    trigger: &E,
    id_attribute: &str,
    base: &str,
    launcher: &L,
) -> Option<String> {
    let id = trigger.attribute(id_attribute)?;
    let url = video_url(base, &id)?;
    launcher.open_isolated(&url);
    Some(url)
}
