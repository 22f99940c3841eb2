//! Element handle abstraction shared by every feature.
//!
//! # Design
//! - Handles are cheap clones of a shared node, so mutation goes through `&self`.
//! - Lookups hand out `Option<E>`; a missing element disables the feature instead of failing.
//! - Mutations cannot fail from the caller's point of view; DOM exceptions are swallowed
//!   by the implementation.

/// Minimal view of a DOM element used by the controller.
pub trait UiElement {
    /// Whether the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;
    /// Add `class` to the class list.
    fn add_class(&self, class: &str);
    /// Remove `class` from the class list.
    fn remove_class(&self, class: &str);
    /// Read an attribute value.
    fn attribute(&self, name: &str) -> Option<String>;
    /// Set an attribute value.
    fn set_attribute(&self, name: &str, value: &str);
    /// Current text content.
    fn text(&self) -> String;
    /// Replace the text content.
    fn set_text(&self, text: &str);
    /// Replace the inner markup.
    fn set_inner_html(&self, html: &str);
    /// Whether the `hidden` attribute is present.
    fn is_hidden(&self) -> bool;
    /// Toggle the `hidden` attribute.
    fn set_hidden(&self, hidden: bool);
    /// Whether the control is disabled.
    fn is_disabled(&self) -> bool;
    /// Enable or disable the control.
    fn set_disabled(&self, disabled: bool);

    /// Element id, empty when unset.
    fn id(&self) -> String {
        self.attribute("id").unwrap_or_default()
    }

    /// Add or remove `class` depending on `on`.
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}
