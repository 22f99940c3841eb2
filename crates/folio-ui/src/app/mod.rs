//! Page controller: binds the core behavior to the live document.

use crate::config::{PageConfig, ThemeRoot};
use crate::core::address::acknowledge_redirect;
use crate::core::contact::{ContactSurface, StatusRegion, submit_inline};
use crate::core::skills::SkillTabs;
use crate::core::theme::ThemeController;
use crate::core::{footer, video};
use crate::services::contact::{FetchTransport, WebForm};
use dom::{WebElement, by_id, query_all, query_within};
use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use preferences::{
    BrowserAddress, LocalPreferences, TimeoutScheduler, WindowLauncher, current_year,
    load_config, log_storage_error, prefers_dark,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlFormElement};

pub(crate) mod dom;
mod preferences;

thread_local! {
    static ACTIVE: RefCell<Option<PageController>> = const { RefCell::new(None) };
    static PENDING_START: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

/// Owns every element handle and listener for one page.
pub(crate) struct PageController {
    config: Rc<PageConfig>,
    document: Document,
    toggle: Option<WebElement>,
    theme: Rc<ThemeController<WebElement, LocalPreferences>>,
    skills: Rc<SkillTabs<WebElement>>,
    status: Rc<StatusRegion<WebElement, TimeoutScheduler>>,
    listeners: Vec<EventListener>,
    initialized: bool,
}

impl PageController {
    pub(crate) fn new(document: Document, config: PageConfig) -> Self {
        let selectors = &config.selectors;
        let root = match config.theme.root {
            ThemeRoot::Body => document.body().map(WebElement::from),
            ThemeRoot::Document => document
                .document_element()
                .and_then(WebElement::from_element),
        };
        let toggle = by_id(&document, &selectors.theme_toggle);
        let theme = ThemeController::new(
            root,
            toggle.clone(),
            LocalPreferences,
            config.theme.storage_key.clone(),
            config.classes.dark.clone(),
        );
        let skills = SkillTabs::new(
            query_all(&document, &selectors.category_button),
            query_all(&document, &selectors.skill_set),
            config.category_attribute.clone(),
            config.classes.active.clone(),
            config.classes.hidden.clone(),
        );
        let status = status_region(&document, &config);
        Self {
            config: Rc::new(config),
            document,
            toggle,
            theme: Rc::new(theme),
            skills: Rc::new(skills),
            status: Rc::new(status),
            listeners: Vec::new(),
            initialized: false,
        }
    }

    /// Fill the footer, apply the theme, and register every listener. Idempotent.
    pub(crate) fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let selectors = &self.config.selectors;
        footer::fill(
            by_id(&self.document, &selectors.current_year).as_ref(),
            by_id(&self.document, &selectors.footer_name).as_ref(),
            by_id(&self.document, &selectors.hero_name).as_ref(),
            current_year(),
        );
        self.theme.initialize(prefers_dark);
        self.bind_theme_toggle();
        self.bind_videos();
        let strategy = self.config.contact.strategy;
        strategy.wire(self);
        self.bind_skills();
    }

    /// Drop every listener and close the status region.
    ///
    /// Submissions still in flight keep the closed region and report nowhere; a
    /// later `initialize` works on a fresh one.
    pub(crate) fn teardown(&mut self) {
        self.listeners.clear();
        self.status.close();
        self.status = Rc::new(status_region(&self.document, &self.config));
        self.initialized = false;
    }

    fn bind_theme_toggle(&mut self) {
        let Some(toggle) = &self.toggle else {
            return;
        };
        let theme = Rc::clone(&self.theme);
        self.listeners
            .push(EventListener::new(toggle.as_html(), "click", move |_| {
                if let Err(err) = theme.toggle() {
                    log_storage_error(&err);
                }
            }));
    }

    fn bind_videos(&mut self) {
        for trigger in query_all(&self.document, &self.config.selectors.video_trigger) {
            let config = Rc::clone(&self.config);
            let target = trigger.clone();
            self.listeners
                .push(EventListener::new(trigger.as_html(), "click", move |_| {
                    video::launch(
                        &target,
                        &config.video.id_attribute,
                        &config.video.url_base,
                        &WindowLauncher,
                    );
                }));
        }
    }

    fn bind_skills(&mut self) {
        self.skills.initialize();
        let listeners: Vec<EventListener> = self
            .skills
            .buttons()
            .iter()
            .enumerate()
            .map(|(index, button)| {
                let skills = Rc::clone(&self.skills);
                EventListener::new(button.as_html(), "click", move |_| {
                    skills.activate(index);
                })
            })
            .collect();
        self.listeners.extend(listeners);
    }
}

impl ContactSurface for PageController {
    fn bind_inline(&mut self) {
        let Some(form) = self
            .document
            .get_element_by_id(&self.config.selectors.contact_form)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        let submit = query_within(&form, &self.config.selectors.submit_control);
        let handle = Rc::new(WebForm::new(form.clone(), submit));
        let status = Rc::clone(&self.status);
        let messages = Rc::new(self.config.contact.messages());
        let listener = EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let form = Rc::clone(&handle);
                let status = Rc::clone(&status);
                let messages = Rc::clone(&messages);
                spawn_local(async move {
                    if let Err(err) =
                        submit_inline(form.as_ref(), &FetchTransport, status.as_ref(), &messages)
                            .await
                    {
                        console::error!("contact form submission failed", err.to_string());
                    }
                });
            },
        );
        self.listeners.push(listener);
    }

    fn acknowledge_marker(&mut self) {
        let banner = by_id(&self.document, &self.config.selectors.form_success);
        if let Err(err) =
            acknowledge_redirect(&BrowserAddress, banner.as_ref(), &self.config.contact.marker())
        {
            console::error!("failed to clear the form marker", err.to_string());
        }
    }
}

fn status_region(
    document: &Document,
    config: &PageConfig,
) -> StatusRegion<WebElement, TimeoutScheduler> {
    StatusRegion::new(
        by_id(document, &config.selectors.form_status),
        TimeoutScheduler,
        config.classes.error.clone(),
    )
}

fn start(document: &Document) {
    let mut controller = PageController::new(document.clone(), load_config(document));
    controller.initialize();
    let previous = ACTIVE.with(|slot| slot.borrow_mut().replace(controller));
    if let Some(mut previous) = previous {
        previous.teardown();
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
///
/// Starts the page controller once the document content is parsed.
///
/// # Errors
/// Returns an error when no document is available (e.g. inside a worker).
pub fn run_app() -> anyhow::Result<()> {
    console_error_panic_hook::set_once();
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow::anyhow!("no document available"))?;
    if document.ready_state() == "loading" {
        let ready = document.clone();
        let listener = EventListener::once(&document, "DOMContentLoaded", move |_| start(&ready));
        PENDING_START.with(|slot| *slot.borrow_mut() = Some(listener));
    } else {
        start(&document);
    }
    Ok(())
}

/// Tear down the running page controller and its listeners.
pub fn shutdown() {
    drop(PENDING_START.with(|slot| slot.borrow_mut().take()));
    let active = ACTIVE.with(|slot| slot.borrow_mut().take());
    if let Some(mut controller) = active {
        controller.teardown();
    }
}
