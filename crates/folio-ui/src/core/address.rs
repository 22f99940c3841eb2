//! Redirect-flow acknowledgement through the page address.
//!
//! # Design
//! - The form endpoint redirects back with a marker query pair; the page shows its banner once.
//! - The marker is removed with a history replace so refresh and back navigation do not
//!   show the banner again. Other query pairs keep their order and the fragment is kept.

use crate::core::contact::RedirectMarker;
use crate::core::dom::UiElement;
use crate::error::HistoryError;
use url::Url;

/// Read and rewrite the visible address without navigating.
pub trait AddressBar {
    /// Current absolute address.
    fn href(&self) -> String;

    /// Replace the visible address without a history entry or reload.
    ///
    /// # Errors
    /// Returns [`HistoryError`] when the browser refuses the replacement.
    fn replace(&self, url: &str) -> Result<(), HistoryError>;
}

/// Address with every marker pair removed, or `None` when the marker is absent.
///
/// Pairs are compared after form-urlencoded decoding; the remaining pairs are
/// re-serialized in order and the fragment is carried over.
#[must_use]
pub fn strip_marker(href: &str, marker: &RedirectMarker) -> Option<String> {
    let mut url = Url::parse(href).ok()?;
    let mut found = false;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, value)| {
            let hit = name == marker.param.as_str() && value == marker.value.as_str();
            found |= hit;
            !hit
        })
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    if !found {
        return None;
    }
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    Some(url.into())
}

/// Reveal the success banner and strip the marker when the address carries it.
///
/// Returns whether the marker was present.
///
/// # Errors
/// Returns [`HistoryError`] when the address could not be rewritten; the banner is
/// already visible at that point.
pub fn acknowledge_redirect<E: UiElement, A: AddressBar>(
    address: &A,
    banner: Option<&E>,
    marker: &RedirectMarker,
) -> Result<bool, HistoryError> {
    let Some(cleaned) = strip_marker(&address.href(), marker) else {
        return Ok(false);
    };
    if let Some(banner) = banner {
        banner.set_hidden(false);
    }
    address.replace(&cleaned)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeAddress, FakeElement};

    fn marker() -> RedirectMarker {
        RedirectMarker {
            param: "form".into(),
            value: "sent".into(),
        }
    }

    #[test]
    fn marker_is_removed_and_hash_preserved() {
        assert_eq!(
            strip_marker("https://me.dev/?form=sent#contact", &marker()).as_deref(),
            Some("https://me.dev/#contact")
        );
        assert_eq!(
            strip_marker("https://me.dev/p?lang=en&form=sent&x=1#top", &marker()).as_deref(),
            Some("https://me.dev/p?lang=en&x=1#top")
        );
    }

    #[test]
    fn other_values_fragments_and_bad_addresses_are_not_markers() {
        assert_eq!(strip_marker("https://me.dev/?form=draft", &marker()), None);
        assert_eq!(strip_marker("https://me.dev/#?form=sent", &marker()), None);
        assert_eq!(strip_marker("https://me.dev/", &marker()), None);
        assert_eq!(strip_marker("not a url?form=sent", &marker()), None);
    }

    #[test]
    fn encoded_marker_is_recognised() {
        let encoded = RedirectMarker {
            param: "form state".into(),
            value: "sent".into(),
        };
        assert_eq!(
            strip_marker("https://me.dev/?form+state=sent", &encoded).as_deref(),
            Some("https://me.dev/")
        );
        assert_eq!(
            strip_marker("https://me.dev/?q=a%26b&form=sent#top", &marker()).as_deref(),
            Some("https://me.dev/?q=a%26b#top")
        );
    }

    #[test]
    fn acknowledge_reveals_banner_and_rewrites_address() {
        let address = FakeAddress::at("https://me.dev/?form=sent#contact");
        let banner = FakeElement::new("form-success").hidden();
        assert_eq!(acknowledge_redirect(&address, Some(&banner), &marker()), Ok(true));
        assert!(!banner.is_hidden());
        assert_eq!(address.href(), "https://me.dev/#contact");
        assert_eq!(address.replacements.get(), 1);

        // A reload of the cleaned address does not show the banner again.
        let reloaded = FakeElement::new("form-success").hidden();
        assert_eq!(acknowledge_redirect(&address, Some(&reloaded), &marker()), Ok(false));
        assert!(reloaded.is_hidden());
        assert_eq!(address.replacements.get(), 1);
    }

    #[test]
    fn marker_is_stripped_even_without_banner() {
        let address = FakeAddress::at("https://me.dev/?form=sent");
        assert_eq!(
            acknowledge_redirect::<FakeElement, _>(&address, None, &marker()),
            Ok(true)
        );
        assert_eq!(address.href(), "https://me.dev/");
    }
}
