//! WebAssembly page script for the meeting-minutes form
//!
//! Mounts onto the server-rendered form page and provides:
//!
//! - Add/remove and drag reordering for agenda items, attendees and action items
//! - Assignee dropdowns that follow the attendee list
//! - Light/dark/auto theme switching persisted in local storage
//! - Gregorian values for dates entered in the Persian calendar
//! - The custom-company uploader toggle
//!
//! Every feature looks up its elements and stays inactive when they are
//! missing, so the same module can be loaded on every page.

use gloo_events::EventListener;
use mm_form_core::{FormConfig, FormError, FormResult, Locale, MinutesForm};
use std::rc::Rc;
use tracing::{info, warn};
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Document;

pub mod app;
pub mod company;
pub mod datepicker;
pub mod dom;
pub mod logging;
pub mod reorder;
pub mod seed;
pub mod storage;
pub mod theme;

pub use app::FormApp;
pub use theme::ThemeController;

/// Body attribute holding optional JSON configuration
pub const CONFIG_ATTRIBUTE: &str = "data-form-config";

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let ready = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| start(&ready)).forget();
    } else {
        start(&document);
    }
}

fn start(document: &Document) {
    let config = page_config(document);
    match mount(document, config) {
        Ok(_) => {}
        Err(e) if e.is_environmental() => {
            info!(error = %e, "Minutes form script inactive in this environment")
        }
        Err(e) => warn!(error = %e, "Minutes form script failed to start"),
    }
}

/// Configuration from the body attribute, falling back to defaults
fn page_config(document: &Document) -> FormConfig {
    let raw = document
        .body()
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
    let parsed = raw.as_deref().map(FormConfig::from_json);

    let config = match &parsed {
        Some(Ok(config)) => config.clone(),
        _ => FormConfig::default(),
    };
    logging::init(&config.log_level);
    if let Some(Err(e)) = parsed {
        warn!(error = %e, "Ignoring invalid {CONFIG_ATTRIBUTE}");
    }
    config
}

/// Wire every feature of the page and render the dynamic lists
pub fn mount(document: &Document, config: FormConfig) -> FormResult<Rc<FormApp>> {
    let body = document
        .body()
        .ok_or_else(|| FormError::javascript("document has no body"))?;
    let locale = Locale::from_attr(body.get_attribute("data-locale").as_deref());
    let config = Rc::new(config);

    ThemeController::new(document, storage::browser_store(), &config.theme_storage_key).init();

    if datepicker::has_persian_datepicker() {
        info!("Persian date picker detected; pairing Gregorian values on change");
    }
    datepicker::bind_date_pairs(document, locale);
    datepicker::bind_picker_buttons(document);

    company::bind_company_toggle(document, Rc::clone(&config));

    let seed = seed::read_seed(document, &config);
    let app = FormApp::new(MinutesForm::from_seed(locale, seed), config);
    FormApp::mount(&app, document);

    body.class_list()
        .add_1("app-ready")
        .map_err(dom::js_error)?;
    info!(locale = locale.code(), "Minutes form ready");
    Ok(app)
}
