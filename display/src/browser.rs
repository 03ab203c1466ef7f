//! DOM side of the display controller. Only compiled for `wasm32`.

use crate::client::StateClient;
use crate::clock;
use crate::config::DisplayConfig;
use crate::dispatcher::{Dispatcher, Host};
use crate::error::{DisplayError, Result};
use crate::notice::error_markup;
use crate::shortcuts::{self, Page};
use crate::timing::Scheduler;
use crate::transition::{self, KICKOFF_DELAY, SLIDE_END_TRANSFORM, SlideDirection};
use leptos::ev;
use leptos::prelude::{
    TimeoutHandle, document, set_interval, set_timeout, set_timeout_with_handle, window,
    window_event_listener,
};
use std::time::Duration;
use tracing::{debug, error};
use web_sys::HtmlElement;

fn dom_error(e: &wasm_bindgen::JsValue) -> DisplayError {
    DisplayError::Dom(format!("{e:?}"))
}

/// Reloads and navigates through `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHost;

impl Host for BrowserHost {
    fn reload(&self) {
        if let Err(e) = window().location().reload() {
            error!("Page reload failed: {:?}", e);
        }
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = window().location().set_href(path) {
            error!("Navigation to {} failed: {:?}", path, e);
        }
    }
}

/// `setTimeout`-backed scheduler for debounce and throttle.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Option<TimeoutHandle>;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle {
        match set_timeout_with_handle(task, delay) {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("setTimeout failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, handle: Self::Handle) {
        if let Some(handle) = handle {
            handle.clear();
        }
    }
}

pub fn current_page() -> Page {
    window()
        .location()
        .pathname()
        .map_or(Page::Other, |path| Page::from_path(&path))
}

/// Whether the page flags the current route as branching.
pub fn has_branches(flag_id: &str) -> bool {
    document()
        .get_element_by_id(flag_id)
        .and_then(|el| el.get_attribute("data-value"))
        .is_some_and(|value| value == "true")
}

/// Write the current time into every element with `time_class`.
pub fn update_clock(time_class: &str) {
    let text = clock::current_clock();
    let targets = document().get_elements_by_class_name(time_class);
    for index in 0..targets.length() {
        if let Some(el) = targets.item(index) {
            el.set_text_content(Some(&text));
        }
    }
}

/// Update the clock now and then every `interval` for the page's lifetime.
pub fn start_clock(config: &DisplayConfig) {
    let time_class = config.time_class.clone();
    update_clock(&time_class);
    set_interval(move || update_clock(&time_class), config.clock_interval);
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        debug!("Could not set {} on element: {:?}", property, e);
    }
}

pub fn fade_in(element: &HtmlElement, duration: Duration) {
    set_style(element, "opacity", "0");
    set_style(element, "transition", &transition::fade_transition(duration));

    let element = element.clone();
    set_timeout(move || set_style(&element, "opacity", "1"), KICKOFF_DELAY);
}

pub fn slide_in(element: &HtmlElement, direction: SlideDirection, duration: Duration) {
    set_style(element, "transform", direction.initial_transform());
    set_style(element, "transition", &transition::slide_transition(duration));
    set_style(element, "opacity", "1");

    let element = element.clone();
    set_timeout(
        move || set_style(&element, "transform", SLIDE_END_TRANSFORM),
        KICKOFF_DELAY,
    );
}

/// Log `message` and, when `target_id` names an element, show it there.
pub fn show_error(message: &str, target_id: Option<&str>) {
    error!("{}", message);

    let Some(target_id) = target_id else {
        return;
    };
    if let Some(el) = document().get_element_by_id(target_id) {
        el.set_inner_html(&error_markup(message));
    }
}

/// The clock and keyboard shortcuts of one display page.
#[derive(Clone)]
pub struct DisplayController {
    config: DisplayConfig,
    dispatcher: Dispatcher<BrowserHost>,
}

impl DisplayController {
    /// Build a controller talking to the origin the page was served from.
    pub fn from_location() -> Result<Self> {
        let origin = window().location().origin().map_err(|e| dom_error(&e))?;
        Self::new(DisplayConfig::for_origin(origin))
    }

    pub fn new(config: DisplayConfig) -> Result<Self> {
        let client = StateClient::new(&config)?;
        Ok(Self {
            dispatcher: Dispatcher::new(client, BrowserHost),
            config,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher<BrowserHost> {
        &self.dispatcher
    }

    pub fn start(&self) {
        start_clock(&self.config);
        self.install_shortcuts();
    }

    fn install_shortcuts(&self) {
        let dispatcher = self.dispatcher.clone();
        let flag_id = self.config.branch_flag_id.clone();

        // Lives as long as the page; never removed.
        let _listener = window_event_listener(ev::keydown, move |event| {
            let page = current_page();
            let Some(action) = shortcuts::resolve(&event.key(), page, || has_branches(&flag_id))
            else {
                return;
            };

            let dispatcher = dispatcher.clone();
            wasm_bindgen_futures::spawn_local(async move {
                dispatcher.perform(action).await;
            });
        });
    }
}
