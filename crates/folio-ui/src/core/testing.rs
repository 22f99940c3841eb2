//! In-memory doubles for the core traits.

use crate::core::address::AddressBar;
use crate::core::contact::{ContactForm, ContactTransport, Scheduler};
use crate::core::dom::UiElement;
use crate::core::theme::PreferenceStore;
use crate::core::video::Launcher;
use crate::error::{ContactError, HistoryError, StorageError};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

#[derive(Debug, Default)]
struct FakeNode {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    html: String,
    hidden: bool,
    disabled: bool,
}

/// Shared fake node; clones alias the same state like DOM handles do.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeElement(Rc<RefCell<FakeNode>>);

impl FakeElement {
    pub(crate) fn new(id: &str) -> Self {
        let el = Self::default();
        el.set_attribute("id", id);
        el
    }

    pub(crate) fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub(crate) fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub(crate) fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub(crate) fn hidden(self) -> Self {
        self.set_hidden(true);
        self
    }

    pub(crate) fn inner_html(&self) -> String {
        self.0.borrow().html.clone()
    }
}

impl UiElement for FakeElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().html = html.to_string();
    }

    fn is_hidden(&self) -> bool {
        self.0.borrow().hidden
    }

    fn set_hidden(&self, hidden: bool) {
        self.0.borrow_mut().hidden = hidden;
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }
}

/// Key-value store counting writes.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
    writes: Rc<Cell<usize>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub(crate) fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.set(true);
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write {
                key: key.to_string(),
                detail: "quota exceeded".into(),
            });
        }
        self.writes.set(self.writes.get() + 1);
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

struct ScheduledTask {
    due_ms: u64,
    cancelled: Rc<Cell<bool>>,
    task: Option<Box<dyn FnOnce()>>,
}

/// Manual clock scheduler; tasks run when the clock is advanced past their deadline.
#[derive(Clone, Default)]
pub(crate) struct ManualScheduler {
    now_ms: Rc<Cell<u64>>,
    tasks: Rc<RefCell<Vec<ScheduledTask>>>,
}

/// Dropping the handle cancels the task, mirroring `gloo_timers::callback::Timeout`.
pub(crate) struct ManualHandle(Rc<Cell<bool>>);

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

impl ManualScheduler {
    pub(crate) fn advance(&self, ms: u64) {
        let now = self.now_ms.get() + ms;
        self.now_ms.set(now);
        let due: Vec<Box<dyn FnOnce()>> = self
            .tasks
            .borrow_mut()
            .iter_mut()
            .filter(|entry| entry.due_ms <= now && !entry.cancelled.get())
            .filter_map(|entry| entry.task.take())
            .collect();
        self.tasks.borrow_mut().retain(|entry| entry.task.is_some());
        for task in due {
            task();
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|entry| !entry.cancelled.get())
            .count()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle {
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.borrow_mut().push(ScheduledTask {
            due_ms: self.now_ms.get() + u64::from(delay_ms),
            cancelled: Rc::clone(&cancelled),
            task: Some(task),
        });
        ManualHandle(cancelled)
    }
}

/// Form double exposing its fields as name/value pairs.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeForm {
    pub(crate) action: String,
    pub(crate) fields: Rc<RefCell<Vec<(String, String)>>>,
    pub(crate) submit: Option<FakeElement>,
}

impl FakeForm {
    pub(crate) fn new(action: &str, fields: &[(&str, &str)], submit: Option<FakeElement>) -> Self {
        Self {
            action: action.into(),
            fields: Rc::new(RefCell::new(
                fields
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                    .collect(),
            )),
            submit,
        }
    }

    pub(crate) fn field(&self, name: &str) -> Option<String> {
        self.fields
            .borrow()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

impl ContactForm for FakeForm {
    type Element = FakeElement;
    type Payload = Vec<(String, String)>;

    fn action(&self) -> String {
        self.action.clone()
    }

    fn payload(&self) -> Result<Self::Payload, ContactError> {
        Ok(self.fields.borrow().clone())
    }

    fn reset(&self) {
        for (_, value) in self.fields.borrow_mut().iter_mut() {
            value.clear();
        }
    }

    fn submit_control(&self) -> Option<Self::Element> {
        self.submit.clone()
    }
}

/// Transport returning a canned result and recording what it was asked to send.
#[derive(Clone, Debug)]
pub(crate) struct CannedTransport {
    result: Result<u16, ContactError>,
    pub(crate) sent: Rc<RefCell<Vec<(String, Vec<(String, String)>)>>>,
}

impl CannedTransport {
    pub(crate) fn status(status: u16) -> Self {
        Self {
            result: Ok(status),
            sent: Rc::default(),
        }
    }

    pub(crate) fn failing(detail: &str) -> Self {
        Self {
            result: Err(ContactError::Transport {
                detail: detail.into(),
            }),
            sent: Rc::default(),
        }
    }
}

#[async_trait(?Send)]
impl ContactTransport<Vec<(String, String)>> for CannedTransport {
    async fn deliver(
        &self,
        action: &str,
        payload: Vec<(String, String)>,
    ) -> Result<u16, ContactError> {
        self.sent.borrow_mut().push((action.to_string(), payload));
        self.result.clone()
    }
}

/// Records opened URLs.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingLauncher {
    pub(crate) opened: Rc<RefCell<Vec<String>>>,
}

impl Launcher for RecordingLauncher {
    fn open_isolated(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}

/// Address bar double with a replace counter.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeAddress {
    pub(crate) href: Rc<RefCell<String>>,
    pub(crate) replacements: Rc<Cell<usize>>,
}

impl FakeAddress {
    pub(crate) fn at(href: &str) -> Self {
        Self {
            href: Rc::new(RefCell::new(href.to_string())),
            replacements: Rc::default(),
        }
    }
}

impl AddressBar for FakeAddress {
    fn href(&self) -> String {
        self.href.borrow().clone()
    }

    fn replace(&self, url: &str) -> Result<(), HistoryError> {
        self.replacements.set(self.replacements.get() + 1);
        *self.href.borrow_mut() = url.to_string();
        Ok(())
    }
}
