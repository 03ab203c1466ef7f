//! WebAssembly entry point for the display pages.
//!
//! `start` runs when the module loads. The remaining exports are helpers for
//! the page scripts that render stations, lines and arrivals.
#![cfg(target_arch = "wasm32")]

use display::api::{DetailStyle, LayoutMode, RunStyle, parse_wire_name};
use display::browser::{self, BrowserHost, BrowserScheduler, DisplayController};
use display::dispatcher::Dispatcher;
use display::format::coerce_to_string;
use display::shortcuts::Command;
use display::timing::{Debounce, Throttle};
use display::transition::{DEFAULT_DURATION, SlideDirection};
use serde_json::Value;
use std::cell::RefCell;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

thread_local! {
    static CONTROLLER: RefCell<Option<DisplayController>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    #[allow(clippy::expect_used)]
    console_log::init_with_level(log::Level::Debug).expect("error initializing logger");

    match DisplayController::from_location() {
        Ok(controller) => {
            controller.start();
            CONTROLLER.with(|slot| slot.replace(Some(controller)));
        }
        Err(e) => browser::show_error(&e.to_string(), None),
    }
}

fn dispatcher() -> Option<Dispatcher<BrowserHost>> {
    CONTROLLER.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|controller| controller.dispatcher().clone())
    })
}

fn send(command: Command) {
    let Some(dispatcher) = dispatcher() else {
        browser::show_error("Display controller is not running", None);
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        dispatcher.execute(command).await;
    });
}

/// Round-trip through `JSON` to move values between JS and serde.
fn to_json(value: &JsValue) -> Value {
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(Value::Null)
}

fn to_js(value: &Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

fn duration_or_default(duration_ms: Option<u32>) -> Duration {
    duration_ms.map_or(DEFAULT_DURATION, |ms| Duration::from_millis(u64::from(ms)))
}

#[wasm_bindgen]
pub fn line_color(line_id: &str) -> String {
    display::lines::line_color(line_id).to_string()
}

#[wasm_bindgen]
pub fn line_display_name(line_id: &str) -> String {
    display::lines::line_display_name(line_id).to_string()
}

#[wasm_bindgen]
pub fn format_station_index(index: JsValue) -> String {
    display::format::format_station_index(&to_json(&index))
}

/// Resolves to the JSON body, or to `{status: "error", message}`. Never rejects.
#[wasm_bindgen]
pub fn fetch_data(endpoint: String, params: JsValue) -> js_sys::Promise {
    let params: Vec<(String, String)> = match to_json(&params) {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), coerce_to_string(value)))
            .collect(),
        _ => Vec::new(),
    };

    wasm_bindgen_futures::future_to_promise(async move {
        let Some(dispatcher) = dispatcher() else {
            return Ok(to_js(&display::client::error_value(
                "Display controller is not running",
            )));
        };
        let pairs: Vec<(&str, &str)> = params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        let value = dispatcher.client().fetch_data(&endpoint, &pairs).await;
        Ok(to_js(&value))
    })
}

#[wasm_bindgen]
pub fn fade_in(element: HtmlElement, duration_ms: Option<u32>) {
    browser::fade_in(&element, duration_or_default(duration_ms));
}

#[wasm_bindgen]
pub fn slide_in(element: HtmlElement, direction: Option<String>, duration_ms: Option<u32>) {
    let direction = direction.as_deref().map_or(SlideDirection::Left, SlideDirection::parse);
    browser::slide_in(&element, direction, duration_or_default(duration_ms));
}

#[wasm_bindgen]
pub fn show_error(message: String, target_id: Option<String>) {
    browser::show_error(&message, target_id.as_deref());
}

#[wasm_bindgen]
pub fn set_layout(mode: &str) {
    match parse_wire_name::<LayoutMode>(mode) {
        Some(mode) => send(Command::SetLayout(mode)),
        None => log::error!("Unknown layout mode: {mode}"),
    }
}

#[wasm_bindgen]
pub fn set_detail_style(style: &str) {
    match parse_wire_name::<DetailStyle>(style) {
        Some(style) => send(Command::SetDetailStyle(style)),
        None => log::error!("Unknown detail style: {style}"),
    }
}

#[wasm_bindgen]
pub fn set_run_style(style: &str) {
    match parse_wire_name::<RunStyle>(style) {
        Some(style) => send(Command::SetRunStyle(style)),
        None => log::error!("Unknown run style: {style}"),
    }
}

fn invoke(callback: &js_sys::Function, arg: &JsValue) {
    if let Err(e) = callback.call1(&JsValue::NULL, arg) {
        log::error!("Callback threw: {e:?}");
    }
}

/// Wrap `callback` so only the last call in each `wait_ms` quiet period runs.
///
/// The wrapper forwards only its first argument; pass an array or object to
/// carry more than one value.
#[wasm_bindgen]
pub fn debounce(callback: js_sys::Function, wait_ms: u32) -> js_sys::Function {
    let debounced = Debounce::new(
        BrowserScheduler,
        Duration::from_millis(u64::from(wait_ms)),
        move |arg: JsValue| invoke(&callback, &arg),
    );
    Closure::<dyn Fn(JsValue)>::new(move |arg| debounced.call(arg))
        .into_js_value()
        .unchecked_into()
}

/// Wrap `callback` so it runs at most once per `limit_ms`.
///
/// Like [`debounce`], only the first argument reaches `callback`.
#[wasm_bindgen]
pub fn throttle(callback: js_sys::Function, limit_ms: u32) -> js_sys::Function {
    let throttled = Throttle::new(
        BrowserScheduler,
        Duration::from_millis(u64::from(limit_ms)),
        move |arg: JsValue| invoke(&callback, &arg),
    );
    Closure::<dyn Fn(JsValue)>::new(move |arg| {
        throttled.call(arg);
    })
    .into_js_value()
    .unchecked_into()
}
