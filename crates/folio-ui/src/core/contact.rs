//! Contact form submission flows.
//!
//! # Design
//! - One capability, two strategies: inline asynchronous submission with a status region,
//!   or a redirect round-trip acknowledged through a query marker (see [`crate::core::address`]).
//! - The submit control is restored by a drop guard, so every exit path re-enables it.
//! - The status region owns the pending auto-hide; showing new content or clearing
//!   the region cancels a hide scheduled by an earlier submission.
//! - A closed region ignores results that arrive after the page was torn down.

use crate::core::dom::UiElement;
use crate::error::ContactError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How the page delivers the contact form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStrategy {
    /// Submit in the background and report the outcome in the status region.
    #[default]
    InlineAsync,
    /// Let the browser post the form; the endpoint redirects back with a marker.
    RedirectMarker,
}

impl ContactStrategy {
    /// Wire the contact form on `surface` the way this strategy requires.
    ///
    /// The inline flow only binds the form; the redirect flow only reads the address.
    pub fn wire<C: ContactSurface + ?Sized>(self, surface: &mut C) {
        match self {
            Self::InlineAsync => surface.bind_inline(),
            Self::RedirectMarker => surface.acknowledge_marker(),
        }
    }
}

/// Page hooks used by the contact strategies.
pub trait ContactSurface {
    /// Intercept form submission and deliver it in the background.
    fn bind_inline(&mut self);

    /// Show the success banner when the address carries the redirect marker.
    fn acknowledge_marker(&mut self);
}

/// Query pair the form endpoint appends after a successful redirect submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectMarker {
    /// Parameter name.
    pub param: String,
    /// Parameter value.
    pub value: String,
}

/// Copy and timing for the inline flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMessages {
    /// Submit label while the request is in flight.
    pub busy_label: String,
    /// Status text on success.
    pub success: String,
    /// Status text on failure, including the fallback contact address.
    pub error: String,
    /// Delay before the success status hides itself.
    pub auto_hide_ms: u32,
}

/// The contact form as seen by the submission flow.
pub trait ContactForm {
    /// Element type of the submit control.
    type Element: UiElement;
    /// Encoded field data handed to the transport.
    type Payload: 'static;

    /// Target URL declared by the form.
    fn action(&self) -> String;

    /// Snapshot of the form fields.
    ///
    /// # Errors
    /// Returns [`ContactError::Payload`] when the fields cannot be collected.
    fn payload(&self) -> Result<Self::Payload, ContactError>;

    /// Clear every field.
    fn reset(&self);

    /// The form's submit control, when present.
    fn submit_control(&self) -> Option<Self::Element>;
}

/// Delivers form payloads to their endpoint.
#[async_trait(?Send)]
pub trait ContactTransport<P: 'static> {
    /// POST `payload` to `action` asking for JSON; returns the response status.
    ///
    /// # Errors
    /// Returns [`ContactError::Transport`] when no response was received.
    async fn deliver(&self, action: &str, payload: P) -> Result<u16, ContactError>;
}

/// Deferred task runner; dropping a handle cancels its task.
pub trait Scheduler {
    /// Cancellation handle.
    type Handle;

    /// Run `task` after `delay_ms`.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Whether `status` is in the success range.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

/// Disables the submit control and swaps its label until dropped.
#[derive(Debug)]
pub struct BusyGuard<E: UiElement> {
    control: Option<E>,
    original_label: String,
}

impl<E: UiElement> BusyGuard<E> {
    /// Disable `control` and show `busy_label` on it.
    pub fn engage(control: Option<E>, busy_label: &str) -> Self {
        let original_label = control.as_ref().map(UiElement::text).unwrap_or_default();
        if let Some(control) = &control {
            control.set_disabled(true);
            control.set_text(busy_label);
        }
        Self {
            control,
            original_label,
        }
    }
}

impl<E: UiElement> Drop for BusyGuard<E> {
    fn drop(&mut self) {
        if let Some(control) = &self.control {
            control.set_disabled(false);
            control.set_text(&self.original_label);
        }
    }
}

struct PendingHide<H> {
    _handle: H,
    fired: Rc<Cell<bool>>,
}

/// Status region reporting the outcome of a submission.
pub struct StatusRegion<E, S: Scheduler> {
    element: Option<E>,
    scheduler: S,
    error_class: String,
    pending_hide: RefCell<Option<PendingHide<S::Handle>>>,
    closed: Cell<bool>,
}

impl<E, S> StatusRegion<E, S>
where
    E: UiElement + Clone + 'static,
    S: Scheduler,
{
    /// Wrap the optional status element.
    pub fn new(element: Option<E>, scheduler: S, error_class: impl Into<String>) -> Self {
        Self {
            element,
            scheduler,
            error_class: error_class.into(),
            pending_hide: RefCell::new(None),
            closed: Cell::new(false),
        }
    }

    fn live_element(&self) -> Option<&E> {
        if self.closed.get() {
            None
        } else {
            self.element.as_ref()
        }
    }

    /// Hide the region, drop its error mode, and cancel any pending hide.
    pub fn clear(&self) {
        self.cancel_pending();
        if let Some(element) = self.live_element() {
            element.set_hidden(true);
            element.remove_class(&self.error_class);
        }
    }

    /// Show `message` as a success and hide it after `hide_after_ms`.
    pub fn show_success(&self, message: &str, hide_after_ms: u32) {
        self.cancel_pending();
        let Some(element) = self.live_element() else {
            return;
        };
        element.set_text(message);
        element.remove_class(&self.error_class);
        element.set_hidden(false);
        let target = element.clone();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = self.scheduler.schedule(
            hide_after_ms,
            Box::new(move || {
                flag.set(true);
                target.set_hidden(true);
            }),
        );
        *self.pending_hide.borrow_mut() = Some(PendingHide {
            _handle: handle,
            fired,
        });
    }

    /// Show `message` as an error; it stays until the next submission.
    pub fn show_error(&self, message: &str) {
        self.cancel_pending();
        if let Some(element) = self.live_element() {
            element.set_text(message);
            element.add_class(&self.error_class);
            element.set_hidden(false);
        }
    }

    /// Whether an auto-hide is scheduled and has not run yet.
    #[must_use]
    pub fn has_pending_hide(&self) -> bool {
        self.pending_hide
            .borrow()
            .as_ref()
            .is_some_and(|pending| !pending.fired.get())
    }

    /// Cancel a scheduled auto-hide.
    pub fn cancel_pending(&self) {
        drop(self.pending_hide.borrow_mut().take());
    }

    /// Cancel the pending hide and ignore every later update.
    pub fn close(&self) {
        self.closed.set(true);
        self.cancel_pending();
    }

    /// Whether the region was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

/// Run one inline submission of `form`.
///
/// The status region is cleared, the submit control is held busy for the whole
/// request, and restored on every exit path. Failures are shown in the status
/// region and returned for logging; the form keeps its fields.
///
/// # Errors
/// Returns the [`ContactError`] that was shown to the user.
pub async fn submit_inline<F, T, S>(
    form: &F,
    transport: &T,
    status: &StatusRegion<F::Element, S>,
    messages: &ContactMessages,
) -> Result<(), ContactError>
where
    F: ContactForm,
    F::Element: Clone + 'static,
    T: ContactTransport<F::Payload> + ?Sized,
    S: Scheduler,
{
    status.clear();
    let _busy = BusyGuard::engage(form.submit_control(), &messages.busy_label);
    match deliver(form, transport).await {
        Ok(()) => {
            form.reset();
            status.show_success(&messages.success, messages.auto_hide_ms);
            Ok(())
        }
        Err(err) => {
            status.show_error(&messages.error);
            Err(err)
        }
    }
}

async fn deliver<F, T>(form: &F, transport: &T) -> Result<(), ContactError>
where
    F: ContactForm,
    T: ContactTransport<F::Payload> + ?Sized,
{
    let payload = form.payload()?;
    let status = transport.deliver(&form.action(), payload).await?;
    if is_success(status) {
        Ok(())
    } else {
        Err(ContactError::Rejected { status })
    }
}
