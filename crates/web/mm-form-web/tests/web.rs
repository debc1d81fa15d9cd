//! Browser tests for the page bindings
//!
//! Run with `wasm-pack test --headless --firefox crates/web/mm-form-web`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Reflect};
use mm_form_core::{CompanyIds, FormConfig, Locale, PreferenceStore, SectionIds, ThemeMode};
use mm_form_web::storage::LocalStorage;
use mm_form_web::{ThemeController, company, datepicker, mount};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventInit, HtmlElement, HtmlInputElement, HtmlSelectElement,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// A fresh set of sections with ids unique to `prefix`
fn page(prefix: &str, body: &str) -> FormConfig {
    let document = document();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(&body.replace("{p}", prefix));
    document.body().unwrap().append_child(&root).unwrap();

    let section = |name: &str| {
        SectionIds::new(format!("{prefix}-{name}"), format!("{prefix}-add-{name}"))
    };
    FormConfig::builder()
        .agenda(section("agenda"))
        .attendees(section("attendees"))
        .action_items(section("actions"))
        .theme_storage_key(format!("{prefix}_theme"))
        .build()
}

const EMPTY_SECTIONS: &str = r#"
    <div id="{p}-agenda"></div><button id="{p}-add-agenda" type="button"></button>
    <div id="{p}-attendees"></div><button id="{p}-add-attendees" type="button"></button>
    <div id="{p}-actions"></div><button id="{p}-add-actions" type="button"></button>
"#;

fn click(id: &str) {
    document()
        .get_element_by_id(id)
        .unwrap()
        .unchecked_into::<HtmlElement>()
        .click();
}

fn type_into(name: &str, text: &str) {
    let input: HtmlInputElement = document()
        .query_selector(&format!("[name=\"{name}\"]"))
        .unwrap()
        .unwrap()
        .unchecked_into();
    input.set_value(text);
    input.dispatch_event(&Event::new("input").unwrap()).unwrap();
}

fn assignee_select(name: &str) -> HtmlSelectElement {
    document()
        .query_selector(&format!("[name=\"{name}\"]"))
        .unwrap()
        .unwrap()
        .unchecked_into()
}

fn element<T: JsCast>(selector: &str) -> T {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .unchecked_into()
}

fn fixture(html: &str) -> Element {
    let document = document();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(html);
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn dispatch_bubbling(target: &Element, kind: &str) {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap();
}

fn display_of(id: &str) -> String {
    element::<HtmlElement>(&format!("#{id}"))
        .style()
        .get_property_value("display")
        .unwrap()
}

async fn tick() {
    TimeoutFuture::new(0).await;
    TimeoutFuture::new(0).await;
}

#[wasm_bindgen_test]
async fn test_add_buttons_render_named_rows() {
    let config = page("add", EMPTY_SECTIONS);
    let app = mount(&document(), config).unwrap();

    click("add-add-agenda");
    click("add-add-attendees");
    click("add-add-attendees");
    click("add-add-actions");
    tick().await;

    let doc = document();
    assert!(doc.query_selector("[name=\"agenda_items-0\"]").unwrap().is_some());
    assert!(doc.query_selector("[name=\"attendees-1\"]").unwrap().is_some());
    assert!(doc.query_selector("[name=\"action_items-0-description\"]").unwrap().is_some());
    assert!(doc.query_selector("[name=\"action_items-0-deadline\"]").unwrap().is_some());
    assert_eq!(app.form().attendees().len(), 2);
    assert!(doc.body().unwrap().class_list().contains("app-ready"));
    let rows: Element = element("#add-attendees .mm-rows");
    assert_eq!(rows.get_attribute("dir").as_deref(), Some("ltr"));
}

#[wasm_bindgen_test]
async fn test_typed_attendees_fill_assignee_options() {
    let config = page("sync", EMPTY_SECTIONS);
    let app = mount(&document(), config).unwrap();

    click("sync-add-actions");
    click("sync-add-attendees");
    tick().await;
    type_into("attendees-0", "Ana");
    click("sync-add-attendees");
    tick().await;
    type_into("attendees-1", "Bo");
    tick().await;

    let select = assignee_select("action_items-0-assigned_to");
    assert_eq!(select.length(), 3);
    assert_eq!(
        app.form().action_item(0).unwrap().assignee.option_values(),
        vec!["", "Ana", "Bo"]
    );

    select.set_value("Bo");
    select.dispatch_event(&Event::new("change").unwrap()).unwrap();
    assert_eq!(app.form().action_item(0).unwrap().assignee.selected(), "Bo");
}

#[wasm_bindgen_test]
async fn test_attendee_removal_settles_on_next_tick() {
    let config = page("remove", EMPTY_SECTIONS);
    let app = mount(&document(), config).unwrap();

    click("remove-add-actions");
    click("remove-add-attendees");
    tick().await;
    type_into("attendees-0", "Ana");
    click("remove-add-attendees");
    tick().await;
    type_into("attendees-1", "Bo");
    app.select_assignee(0, "Bo");

    app.remove_attendee(1);
    assert!(app.form().has_pending_refresh());

    tick().await;
    assert!(!app.form().has_pending_refresh());
    let item = app.form().action_item(0).unwrap().assignee.clone();
    assert_eq!(item.option_values(), vec!["", "Ana"]);
    assert_eq!(item.selected(), "");
    assert_eq!(assignee_select("action_items-0-assigned_to").length(), 2);
}

#[wasm_bindgen_test]
async fn test_server_rendered_rows_are_seeded() {
    let config = page(
        "seed",
        r#"
        <div id="{p}-agenda"><input name="agenda_items-0" value="Budget"></div>
        <div id="{p}-attendees">
            <input name="attendees-0" value="Ana">
            <input name="attendees-1" value="Bo">
        </div>
        <div id="{p}-actions">
            <textarea name="action_items-0-description">Draft</textarea>
            <select name="action_items-0-assigned_to" data-current="Bo">
                <option value="">Select</option>
            </select>
            <input type="date" name="action_items-0-deadline" value="2024-10-19">
        </div>
        "#,
    );
    let app = mount(&document(), config).unwrap();
    tick().await;

    let form = app.form();
    assert_eq!(form.agenda().values().collect::<Vec<_>>(), vec!["Budget"]);
    assert_eq!(form.collect_attendee_names(), vec!["Ana", "Bo"]);
    let item = form.action_item(0).unwrap();
    assert_eq!(item.description, "Draft");
    assert_eq!(item.assignee.selected(), "Bo");
    assert_eq!(item.deadline.submission_value(), "2024-10-19");
}

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let store = LocalStorage::open().unwrap();
    store.set("mm_test_key", "dark").unwrap();
    assert_eq!(store.get("mm_test_key").unwrap().as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn test_theme_selection_sets_root_attribute() {
    let store = LocalStorage::open().unwrap();
    let controller = ThemeController::new(&document(), Box::new(store), "mm_test_theme");
    controller.select(ThemeMode::Dark);

    let root = document().document_element().unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    let stored = LocalStorage::open().unwrap().get("mm_test_theme").unwrap();
    assert_eq!(stored.as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn test_theme_menu_click_applies_and_persists() {
    fixture(r##"<a href="#" class="theme-select" id="menu-light" data-theme="light">Light</a>"##);
    let store = LocalStorage::open().unwrap();
    ThemeController::new(&document(), Box::new(store), "mm_menu_theme").init();

    element::<HtmlElement>("#menu-light").click();

    let root = document().document_element().unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));
    let stored = LocalStorage::open().unwrap().get("mm_menu_theme").unwrap();
    assert_eq!(stored.as_deref(), Some("light"));
}

#[wasm_bindgen_test]
fn test_persian_date_pairs_with_gregorian_target() {
    fixture(
        r##"
        <input type="text" id="jdp-deadline" data-jdp data-target="#jdp-deadline-greg" value="۱۴۰۳-۰۷-۲۸">
        <input type="hidden" id="jdp-deadline-greg">
        "##,
    );
    let input: HtmlInputElement = element("#jdp-deadline");
    datepicker::sync_pair(&document(), &input, Locale::Fa);

    let target: HtmlInputElement = element("#jdp-deadline-greg");
    assert_eq!(target.value(), "2024-10-19");
    assert_eq!(input.get_attribute("data-greg").as_deref(), Some("2024-10-19"));

    input.set_value("not a date");
    datepicker::sync_pair(&document(), &input, Locale::Fa);
    assert_eq!(target.value(), "");
    assert_eq!(input.get_attribute("data-greg").as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn test_refused_picker_falls_back_to_focus() {
    fixture(r#"<input type="date" id="picker-refused">"#);
    let input: HtmlInputElement = element("#picker-refused");
    let refuse = Function::new_no_args("throw new Error('needs user activation')");
    Reflect::set(&input, &JsValue::from_str("showPicker"), &refuse).unwrap();

    datepicker::open_picker(&input);

    let active = document().active_element().unwrap();
    assert_eq!(active.id(), "picker-refused");
}

#[wasm_bindgen_test]
fn test_company_toggle_follows_other_values() {
    fixture(
        r#"
        <select id="co-select">
            <option value="Acme">Acme</option>
            <option value="Other">Other</option>
            <option value="شرکت دیگر">شرکت دیگر</option>
        </select>
        <div id="co-logo"></div>
        <div id="co-name"></div>
        "#,
    );
    let config = FormConfig::builder()
        .company(CompanyIds {
            select: "co-select".to_string(),
            logo_uploader: "co-logo".to_string(),
            custom_name: "co-name".to_string(),
            ..CompanyIds::default()
        })
        .build();
    company::bind_company_toggle(&document(), Rc::new(config));

    let select: HtmlSelectElement = element("#co-select");
    let change = || select.dispatch_event(&Event::new("change").unwrap()).unwrap();

    select.set_value("Other");
    change();
    assert_eq!(display_of("co-logo"), "block");
    assert_eq!(display_of("co-name"), "block");

    select.set_value("Acme");
    change();
    assert_eq!(display_of("co-logo"), "none");
    assert_eq!(display_of("co-name"), "none");

    select.set_value("شرکت دیگر");
    change();
    assert_eq!(display_of("co-logo"), "block");
}

#[wasm_bindgen_test]
async fn test_dragging_attendee_reorders_assignee_options() {
    let config = page(
        "drag",
        r#"
        <div id="{p}-agenda"></div><button id="{p}-add-agenda" type="button"></button>
        <div id="{p}-attendees">
            <input name="attendees-0" value="Ana">
            <input name="attendees-1" value="Bo">
        </div>
        <button id="{p}-add-attendees" type="button"></button>
        <div id="{p}-actions"></div><button id="{p}-add-actions" type="button"></button>
        "#,
    );
    let app = mount(&document(), config).unwrap();
    click("drag-add-actions");
    tick().await;

    let handle: Element = element("#drag-attendees [data-ordinal=\"1\"] .drag-handle");
    let target: Element = element("#drag-attendees [name=\"attendees-0\"]");
    dispatch_bubbling(&handle, "dragstart");
    dispatch_bubbling(&target, "dragover");
    dispatch_bubbling(&target, "drop");
    dispatch_bubbling(&handle, "dragend");
    tick().await;

    assert_eq!(app.form().collect_attendee_names(), vec!["Bo", "Ana"]);
    assert_eq!(
        app.form().action_item(0).unwrap().assignee.option_values(),
        vec!["", "Bo", "Ana"]
    );
    let first: HtmlInputElement = element("#drag-attendees input[name^=\"attendees-\"]");
    assert_eq!(first.name(), "attendees-1");
    let select = assignee_select("action_items-0-assigned_to");
    let second = select.query_selector("option:nth-child(2)").unwrap().unwrap();
    assert_eq!(second.get_attribute("value").as_deref(), Some("Bo"));
}

#[wasm_bindgen_test]
async fn test_section_without_add_button_is_left_alone() {
    let config = page(
        "noadd",
        r#"
        <div id="{p}-agenda"><input name="agenda_items-0" value="Keep"></div>
        <div id="{p}-attendees"></div><button id="{p}-add-attendees" type="button"></button>
        <div id="{p}-actions"></div><button id="{p}-add-actions" type="button"></button>
        "#,
    );
    mount(&document(), config).unwrap();
    tick().await;

    let container: Element = element("#noadd-agenda");
    assert!(container.query_selector(".drag-handle").unwrap().is_none());
    let input: HtmlInputElement = element("#noadd-agenda [name=\"agenda_items-0\"]");
    assert_eq!(input.value(), "Keep");
}
