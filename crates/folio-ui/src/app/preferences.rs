//! Persistence and environment helpers for the page controller.

use crate::app::dom::js_detail;
use crate::config::{CONFIG_ELEMENT_ID, PageConfig};
use crate::core::address::AddressBar;
use crate::core::contact::Scheduler;
use crate::core::theme::PreferenceStore;
use crate::core::video::Launcher;
use crate::error::{HistoryError, StorageError};
use gloo::console;
use gloo::utils::window;
use gloo_timers::callback::Timeout;
use js_sys::Date;
use wasm_bindgen::JsValue;
use web_sys::{Document, Storage};

/// `localStorage`, storing raw `light` / `dark` strings.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalPreferences;

fn local_storage() -> Option<Storage> {
    window().local_storage().ok().flatten()
}

impl PreferenceStore for LocalPreferences {
    fn read(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                detail: js_detail(&err),
            })
    }
}

pub(crate) fn prefers_dark() -> bool {
    window()
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|media| media.matches())
}

pub(crate) fn current_year() -> u32 {
    Date::new_0().get_full_year()
}

/// Embedded JSON configuration, or defaults when absent or invalid.
pub(crate) fn load_config(document: &Document) -> PageConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return PageConfig::default();
    };
    PageConfig::from_json(&raw).unwrap_or_else(|err| {
        console::error!("invalid page configuration, using defaults", err.to_string());
        PageConfig::default()
    })
}

pub(crate) fn log_storage_error(err: &StorageError) {
    console::error!("storage operation failed", err.to_string());
}

/// One-shot timers backed by `setTimeout`; dropping the handle clears the timer.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle {
        Timeout::new(delay_ms, task)
    }
}

/// `window.open` with `noopener`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WindowLauncher;

impl Launcher for WindowLauncher {
    fn open_isolated(&self, url: &str) {
        if let Err(err) = window().open_with_url_and_target_and_features(url, "_blank", "noopener")
        {
            console::error!("failed to open video", url.to_string(), js_detail(&err));
        }
    }
}

/// The window's location and history.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserAddress;

impl AddressBar for BrowserAddress {
    fn href(&self) -> String {
        window().location().href().unwrap_or_default()
    }

    fn replace(&self, url: &str) -> Result<(), HistoryError> {
        let failure = |err: JsValue| HistoryError {
            url: url.to_string(),
            detail: js_detail(&err),
        };
        window()
            .history()
            .map_err(failure)?
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(failure)
    }
}
