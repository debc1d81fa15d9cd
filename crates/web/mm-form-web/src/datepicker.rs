//! Date inputs: Gregorian pairing for localized entry and the calendar buttons
//!
//! Inputs marked `data-jdp` are entered in the locale's calendar; their
//! Gregorian value goes to the hidden field named by `data-target` and to a
//! `data-greg` attribute. The jQuery Persian picker is only detected; when it
//! is absent the native date control is used.

use crate::dom::{describe, query_all};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Reflect};
use mm_form_core::{CalendarKind, DeadlineField, Locale};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Whether `$.fn.persianDatepicker` is loaded on the page
pub fn has_persian_datepicker() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    property(&window, "$")
        .and_then(|jquery| property(&jquery, "fn"))
        .and_then(|proto| property(&proto, "persianDatepicker"))
        .is_some_and(|picker| picker.is_function())
}

/// Calendar an input's text is written in
fn input_calendar(input: &HtmlInputElement, locale: Locale) -> CalendarKind {
    if input.type_() == "date" {
        CalendarKind::Gregorian
    } else {
        locale.calendar()
    }
}

/// Copy the Gregorian value of a localized input to its paired fields
pub fn sync_pair(document: &Document, input: &HtmlInputElement, locale: Locale) {
    let mut field = DeadlineField::new();
    if let Err(e) = field.set_display(&input.value(), input_calendar(input, locale)) {
        debug!(error = %e, "Date input holds no valid date yet");
    }
    let gregorian = field.submission_value();

    let target = input
        .get_attribute("data-target")
        .and_then(|selector| document.query_selector(&selector).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    if let Some(target) = target {
        target.set_value(&gregorian);
    }
    let _ = input.set_attribute("data-greg", &gregorian);
}

/// Keep every `data-jdp` input's Gregorian pair current
pub fn bind_date_pairs(document: &Document, locale: Locale) {
    let Some(root) = document.document_element() else {
        return;
    };
    for element in query_all(&root, "[data-jdp]") {
        let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let _ = input.set_attribute("autocomplete", "off");
        sync_pair(document, &input, locale);

        for event in ["input", "change"] {
            let document = document.clone();
            let bound = input.clone();
            EventListener::new(&input, event, move |_| sync_pair(&document, &bound, locale)).forget();
        }
    }
}

/// Open the browser's picker for `input`, or focus it when `showPicker` is
/// missing or refuses (e.g. without user activation)
pub fn open_picker(input: &HtmlInputElement) {
    let opened = property(input, "showPicker")
        .and_then(|f| f.dyn_into::<Function>().ok())
        .map(|show| show.call0(input));
    match opened {
        Some(Ok(_)) => {}
        Some(Err(e)) => {
            debug!(error = %describe(&e), "showPicker failed");
            let _ = input.focus();
        }
        None => {
            let _ = input.focus();
        }
    }
}

fn sibling_date_input(button: &Element) -> Option<HtmlInputElement> {
    button
        .parent_element()
        .and_then(|parent| parent.query_selector("[data-jdp], input[type=date]").ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// Calendar buttons (`.jdp-open`) open the date input next to them
pub fn bind_picker_buttons(document: &Document) {
    let Some(root) = document.document_element() else {
        return;
    };
    for button in query_all(&root, ".jdp-open") {
        let bound = button.clone();
        EventListener::new_with_options(
            &button,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                if let Some(input) = sibling_date_input(&bound) {
                    open_picker(&input);
                    focus_next_tick(input.unchecked_into());
                }
            },
        )
        .forget();
    }
}

pub(crate) fn focus_next_tick(element: HtmlElement) {
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(0).await;
        let _ = element.focus();
    });
}
