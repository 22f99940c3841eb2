//! `web-sys` element handles and lookups.

use crate::core::dom::UiElement;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// Handle to a live DOM element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WebElement(HtmlElement);

impl WebElement {
    pub(crate) fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }

    pub(crate) const fn as_html(&self) -> &HtmlElement {
        &self.0
    }
}

impl From<HtmlElement> for WebElement {
    fn from(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl UiElement for WebElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn is_hidden(&self) -> bool {
        self.0.hidden()
    }

    fn set_hidden(&self, hidden: bool) {
        self.0.set_hidden(hidden);
    }

    fn is_disabled(&self) -> bool {
        self.0.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }
}

pub(crate) fn by_id(document: &Document, id: &str) -> Option<WebElement> {
    document
        .get_element_by_id(id)
        .and_then(WebElement::from_element)
}

/// Every element matching `selector`, in document order. Invalid selectors match nothing.
pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<WebElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(WebElement)
        .collect()
}

/// Scoped lookup of the first match under `root`.
pub(crate) fn query_within(root: &Element, selector: &str) -> Option<WebElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(WebElement::from_element)
}

pub(crate) fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
