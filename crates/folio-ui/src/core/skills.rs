//! Tabbed skill categories.
//!
//! # Design
//! - Buttons name their panel through an attribute; panels are matched by id.
//! - Only registered panels can be revealed, so the visible set never grows past one.
//! - A button whose target panel does not exist still becomes active and hides the rest.

use crate::core::dom::UiElement;

/// Category buttons and the panels they switch between.
#[derive(Debug)]
pub struct SkillTabs<E> {
    buttons: Vec<E>,
    panels: Vec<E>,
    target_attribute: String,
    active_class: String,
    hidden_class: String,
}

impl<E: UiElement> SkillTabs<E> {
    /// Group buttons and panels with the class names that mark their state.
    pub fn new(
        buttons: Vec<E>,
        panels: Vec<E>,
        target_attribute: impl Into<String>,
        active_class: impl Into<String>,
        hidden_class: impl Into<String>,
    ) -> Self {
        Self {
            buttons,
            panels,
            target_attribute: target_attribute.into(),
            active_class: active_class.into(),
            hidden_class: hidden_class.into(),
        }
    }

    /// Category buttons in document order.
    #[must_use]
    pub fn buttons(&self) -> &[E] {
        &self.buttons
    }

    /// Number of category buttons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Whether there are no category buttons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Normalize the markup so exactly one category is selected.
    ///
    /// Keeps the first button already marked active whose panel exists, else the
    /// first button whose panel exists. Markup where no button resolves falls back
    /// to the marked (or first) button.
    pub fn initialize(&self) -> Option<String> {
        let marked = |button: &E| button.has_class(&self.active_class);
        let index = self
            .buttons
            .iter()
            .position(|button| marked(button) && self.resolves(button))
            .or_else(|| self.buttons.iter().position(|button| self.resolves(button)))
            .or_else(|| self.buttons.iter().position(marked))
            .unwrap_or(0);
        self.activate(index)
    }

    fn resolves(&self, button: &E) -> bool {
        button
            .attribute(&self.target_attribute)
            .is_some_and(|target| self.panels.iter().any(|panel| panel.id() == target))
    }

    /// Select the button at `index`; returns the id of the revealed panel.
    pub fn activate(&self, index: usize) -> Option<String> {
        let button = self.buttons.get(index)?;
        for other in &self.buttons {
            other.remove_class(&self.active_class);
        }
        button.add_class(&self.active_class);
        for panel in &self.panels {
            panel.add_class(&self.hidden_class);
        }
        let target = button.attribute(&self.target_attribute)?;
        let panel = self.panels.iter().find(|panel| panel.id() == target)?;
        panel.remove_class(&self.hidden_class);
        Some(target)
    }

    /// Ids of panels currently not hidden.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<String> {
        self.panels
            .iter()
            .filter(|panel| !panel.has_class(&self.hidden_class))
            .map(UiElement::id)
            .collect()
    }
}
