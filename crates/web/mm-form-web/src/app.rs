//! Declarative rendering of the dynamic lists
//!
//! [`MinutesForm`] stays authoritative. Each rendered row is a small
//! `futures-signals` view-model that is updated from the form after every
//! mutation, and `dominator` keeps the DOM in step with those signals.

use crate::{datepicker, reorder};
use dominator::{Dom, clone, events, html, with_node};
use futures_signals::signal::Mutable;
use futures_signals::signal_vec::{MutableVec, SignalVecExt};
use gloo_events::EventListener;
use gloo_timers::future::TimeoutFuture;
use mm_form_core::{
    ActionField, AssigneeOption, CalendarKind, FieldName, FormConfig, Labels, ListKind,
    MinutesForm, SectionIds,
};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

pub struct TextRow {
    ordinal: usize,
    text: String,
}

impl TextRow {
    fn new(ordinal: usize, text: &str) -> Rc<Self> {
        Rc::new(Self {
            ordinal,
            text: text.to_string(),
        })
    }
}

pub struct ActionRow {
    ordinal: usize,
    description: String,
    sticky: String,
    deadline: String,
    options: MutableVec<AssigneeOption>,
    selected: Mutable<String>,
    /// Deadline in the display calendar when it differs from the input
    deadline_hint: Mutable<String>,
}

pub struct FormApp {
    form: RefCell<MinutesForm>,
    config: Rc<FormConfig>,
    agenda: MutableVec<Rc<TextRow>>,
    attendees: MutableVec<Rc<TextRow>>,
    action_items: MutableVec<Rc<ActionRow>>,
}

impl FormApp {
    pub fn new(form: MinutesForm, config: Rc<FormConfig>) -> Rc<Self> {
        let agenda = form
            .agenda()
            .iter()
            .map(|e| TextRow::new(e.ordinal(), e.value()))
            .collect();
        let attendees = form
            .attendees()
            .iter()
            .map(|e| TextRow::new(e.ordinal(), e.value()))
            .collect();

        let app = Rc::new(Self {
            form: RefCell::new(form),
            config,
            agenda: MutableVec::new_with_values(agenda),
            attendees: MutableVec::new_with_values(attendees),
            action_items: MutableVec::new(),
        });
        let rows = app
            .form()
            .action_items()
            .ordinals()
            .into_iter()
            .filter_map(|ordinal| app.action_row(ordinal))
            .collect();
        app.action_items.lock_mut().replace_cloned(rows);
        app
    }

    pub fn form(&self) -> Ref<'_, MinutesForm> {
        self.form.borrow()
    }

    fn labels(&self) -> &'static Labels {
        self.form().locale().labels()
    }

    fn direction(&self) -> &'static str {
        if self.form().locale().is_rtl() { "rtl" } else { "ltr" }
    }

    fn display_calendar(&self) -> CalendarKind {
        self.form().locale().calendar()
    }

    fn action_row(&self, ordinal: usize) -> Option<Rc<ActionRow>> {
        let form = self.form();
        let item = form.action_item(ordinal)?;
        let hint = match self.display_calendar() {
            CalendarKind::Persian => item.deadline.display().to_string(),
            CalendarKind::Gregorian => String::new(),
        };
        Some(Rc::new(ActionRow {
            ordinal,
            description: item.description.clone(),
            sticky: item.assignee.sticky().to_string(),
            deadline: item.deadline.submission_value(),
            options: MutableVec::new_with_values(item.assignee.options().to_vec()),
            selected: Mutable::new(item.assignee.selected().to_string()),
            deadline_hint: Mutable::new(hint),
        }))
    }

    /// Copy every assignee domain and selection from the model into the rows
    fn sync_assignees(&self) {
        let form = self.form();
        for row in self.action_items.lock_ref().iter() {
            if let Some(item) = form.action_item(row.ordinal) {
                row.options
                    .lock_mut()
                    .replace_cloned(item.assignee.options().to_vec());
                row.selected.set(item.assignee.selected().to_string());
            }
        }
    }

    fn find_action_row(&self, ordinal: usize) -> Option<Rc<ActionRow>> {
        self.action_items
            .lock_ref()
            .iter()
            .find(|row| row.ordinal == ordinal)
            .cloned()
    }

    // Agenda

    pub fn add_agenda_item(&self) -> usize {
        let ordinal = self.form.borrow_mut().add_agenda_item();
        self.agenda.lock_mut().push_cloned(TextRow::new(ordinal, ""));
        ordinal
    }

    pub fn remove_agenda_item(&self, ordinal: usize) {
        if self.form.borrow_mut().remove_agenda_item(ordinal) {
            self.agenda.lock_mut().retain(|row| row.ordinal != ordinal);
        }
    }

    pub fn edit_agenda_item(&self, ordinal: usize, text: &str) {
        self.form.borrow_mut().set_agenda_item(ordinal, text);
    }

    // Attendees

    pub fn add_attendee(&self) -> usize {
        let ordinal = self.form.borrow_mut().add_attendee();
        self.attendees.lock_mut().push_cloned(TextRow::new(ordinal, ""));
        ordinal
    }

    pub fn edit_attendee(&self, ordinal: usize, name: &str) {
        let changed = self.form.borrow_mut().set_attendee_name(ordinal, name);
        if changed {
            self.sync_assignees();
        }
    }

    /// Remove the row now and resynchronize assignees on the next tick
    pub fn remove_attendee(self: &Rc<Self>, ordinal: usize) {
        if !self.form.borrow_mut().remove_attendee(ordinal) {
            return;
        }
        self.attendees.lock_mut().retain(|row| row.ordinal != ordinal);

        let app = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(0).await;
            app.settle();
        });
    }

    /// Run a pending deferred refresh
    pub fn settle(&self) {
        let ran = self.form.borrow_mut().settle();
        if ran {
            self.sync_assignees();
        }
    }

    // Action items

    pub fn add_action_item(&self) -> usize {
        let ordinal = self.form.borrow_mut().add_action_item();
        if let Some(row) = self.action_row(ordinal) {
            self.action_items.lock_mut().push_cloned(row);
        }
        self.sync_assignees();
        ordinal
    }

    pub fn remove_action_item(&self, ordinal: usize) {
        if self.form.borrow_mut().remove_action_item(ordinal) {
            self.action_items.lock_mut().retain(|row| row.ordinal != ordinal);
        }
    }

    pub fn edit_action_description(&self, ordinal: usize, text: &str) {
        self.form.borrow_mut().set_action_description(ordinal, text);
    }

    pub fn select_assignee(&self, ordinal: usize, value: &str) {
        self.form.borrow_mut().select_assignee(ordinal, value);
        let selected = self
            .form()
            .action_item(ordinal)
            .map(|item| item.assignee.selected().to_string());
        if let (Some(row), Some(selected)) = (self.find_action_row(ordinal), selected) {
            row.selected.set(selected);
        }
    }

    pub fn set_action_deadline(&self, ordinal: usize, value: &str) {
        self.form.borrow_mut().set_action_deadline(ordinal, value);
        if self.display_calendar() == CalendarKind::Gregorian {
            return;
        }
        let hint = self
            .form()
            .action_item(ordinal)
            .map(|item| item.deadline.display().to_string());
        if let (Some(row), Some(hint)) = (self.find_action_row(ordinal), hint) {
            row.deadline_hint.set_neq(hint);
        }
    }

    // Reordering

    /// Move the row `ordinal` of `kind` to where the row `target` currently is
    pub fn move_row(&self, kind: ListKind, ordinal: usize, target: usize) {
        let moved = {
            let mut form = self.form.borrow_mut();
            let to_index = match kind {
                ListKind::Agenda => form.agenda().index_of(target),
                ListKind::Attendees => form.attendees().index_of(target),
                ListKind::ActionItems => form.action_items().index_of(target),
            };
            to_index.and_then(|to_index| match kind {
                ListKind::Agenda => form.move_agenda_item(ordinal, to_index),
                ListKind::Attendees => form.move_attendee(ordinal, to_index),
                ListKind::ActionItems => form.move_action_item(ordinal, to_index),
            })
        };
        let Some((from, to)) = moved else {
            return;
        };
        match kind {
            ListKind::Agenda => self.agenda.lock_mut().move_from_to(from, to),
            ListKind::Attendees => {
                self.attendees.lock_mut().move_from_to(from, to);
                self.sync_assignees();
            }
            ListKind::ActionItems => self.action_items.lock_mut().move_from_to(from, to),
        }
        debug!(list = kind.prefix(), ordinal, from, to, "Moved row");
    }

    // Rendering

    fn render_drag_handle() -> Dom {
        html!("span", {
            .attr("draggable", "true")
            .class(["input-group-text", "drag-handle"])
            .child(html!("i", { .class(["bi", "bi-grip-vertical"]) }))
        })
    }

    fn render_remove_button(class: &str, on_click: impl FnMut(events::Click) + 'static) -> Dom {
        html!("button", {
            .attr("type", "button")
            .attr("class", class)
            .child(html!("i", { .class(["bi", "bi-trash3-fill"]) }))
            .event(on_click)
        })
    }

    fn render_agenda_item(app: &Rc<Self>, row: &Rc<TextRow>) -> Dom {
        let name = FieldName::Agenda(row.ordinal).to_string();
        html!("div", {
            .class(["agenda-item", "input-group", "mb-1"])
            .attr(reorder::ORDINAL_ATTRIBUTE, &row.ordinal.to_string())
            .child(Self::render_drag_handle())
            .child(html!("input" => HtmlInputElement, {
                .attr("type", "text")
                .attr("name", &name)
                .attr("id", &name)
                .attr("autocomplete", "off")
                .attr("placeholder", app.labels().agenda_placeholder)
                .class("form-control")
                .prop("value", row.text.as_str())
                .with_node!(input => {
                    .event(clone!(app, row => move |_: events::Input| {
                        app.edit_agenda_item(row.ordinal, &input.value());
                    }))
                })
            }))
            .child(Self::render_remove_button(
                "btn btn-outline-danger btn-sm remove-agenda-item",
                clone!(app, row => move |_| app.remove_agenda_item(row.ordinal)),
            ))
        })
    }

    fn render_attendee(app: &Rc<Self>, row: &Rc<TextRow>) -> Dom {
        let name = FieldName::Attendee(row.ordinal).to_string();
        html!("div", {
            .class(["attendee-item", "input-group", "mb-1"])
            .attr(reorder::ORDINAL_ATTRIBUTE, &row.ordinal.to_string())
            .child(Self::render_drag_handle())
            .child(html!("input" => HtmlInputElement, {
                .attr("type", "text")
                .attr("name", &name)
                .attr("id", &name)
                .attr("autocomplete", "off")
                .attr("placeholder", app.labels().attendee_placeholder)
                .class("form-control")
                .prop("value", row.text.as_str())
                .with_node!(input => {
                    .event(clone!(app, row => move |_: events::Input| {
                        app.edit_attendee(row.ordinal, &input.value());
                    }))
                })
            }))
            .child(Self::render_remove_button(
                "btn btn-outline-danger btn-sm remove-attendee-item",
                clone!(app, row => move |_| app.remove_attendee(row.ordinal)),
            ))
        })
    }

    fn render_assignee_option(row: &Rc<ActionRow>, option: AssigneeOption) -> Dom {
        let value = option.value.clone();
        html!("option", {
            .attr("value", &option.value)
            .text(&option.label)
            .prop_signal("selected", row.selected.signal_ref(move |selected| *selected == value))
        })
    }

    fn render_action_item(app: &Rc<Self>, row: &Rc<ActionRow>) -> Dom {
        let labels = app.labels();
        let description = FieldName::ActionItem(row.ordinal, ActionField::Description).to_string();
        let assigned_to = FieldName::ActionItem(row.ordinal, ActionField::AssignedTo).to_string();
        let deadline = FieldName::ActionItem(row.ordinal, ActionField::Deadline).to_string();

        html!("div", {
            .class(["action-item-group", "border", "p-3", "mb-3", "rounded"])
            .attr(reorder::ORDINAL_ATTRIBUTE, &row.ordinal.to_string())
            .child(html!("div", {
                .class("mb-2")
                .child(html!("label", {
                    .attr("for", &description)
                    .attr("draggable", "true")
                    .class(["form-label", "drag-handle"])
                    .text(labels.description)
                }))
                .child(html!("textarea" => HtmlTextAreaElement, {
                    .attr("name", &description)
                    .attr("id", &description)
                    .attr("rows", "2")
                    .attr("placeholder", labels.action_description_placeholder)
                    .class("form-control")
                    .prop("value", row.description.as_str())
                    .with_node!(area => {
                        .event(clone!(app, row => move |_: events::Input| {
                            app.edit_action_description(row.ordinal, &area.value());
                        }))
                    })
                }))
            }))
            .child(html!("div", {
                .class(["row", "g-2", "align-items-end"])
                .child(html!("div", {
                    .class("col-md-5")
                    .child(html!("label", {
                        .attr("for", &assigned_to)
                        .class("form-label")
                        .text(labels.assigned_to)
                    }))
                    .child(html!("select" => HtmlSelectElement, {
                        .attr("name", &assigned_to)
                        .attr("id", &assigned_to)
                        .attr("data-current", &row.sticky)
                        .class(["form-select", "assignee-select"])
                        .children_signal_vec(row.options.signal_vec_cloned()
                            .map(clone!(row => move |option| Self::render_assignee_option(&row, option))))
                        .with_node!(select => {
                            .event(clone!(app, row => move |_: events::Change| {
                                app.select_assignee(row.ordinal, &select.value());
                            }))
                        })
                    }))
                }))
                .child(html!("div", {
                    .class("col-md-5")
                    .child(html!("label", {
                        .attr("for", &deadline)
                        .class("form-label")
                        .text(labels.deadline)
                    }))
                    .child(html!("div", {
                        .class("input-group")
                        .child(html!("input" => HtmlInputElement, {
                            .attr("type", "date")
                            .attr("name", &deadline)
                            .attr("id", &deadline)
                            .attr("autocomplete", "off")
                            .class("form-control")
                            .prop("value", row.deadline.as_str())
                            .with_node!(input => {
                                .event(clone!(app, row => move |_: events::Change| {
                                    app.set_action_deadline(row.ordinal, &input.value());
                                }))
                            })
                        }))
                        .child(html!("button" => HtmlElement, {
                            .attr("type", "button")
                            .class(["btn", "btn-outline-secondary", "rounded-3"])
                            .child(html!("i", { .class(["bi", "bi-calendar-event"]) }))
                            .with_node!(button => {
                                .event(move |_: events::Click| {
                                    if let Some(input) = button
                                        .previous_element_sibling()
                                        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                                    {
                                        datepicker::open_picker(&input);
                                    }
                                })
                            })
                        }))
                    }))
                    .child(html!("small", {
                        .class(["form-text", "text-muted"])
                        .text_signal(row.deadline_hint.signal_cloned())
                    }))
                }))
                .child(html!("div", {
                    .class("col-md-2")
                    .child(Self::render_remove_button(
                        "btn btn-danger btn-sm w-100 remove-action-item",
                        clone!(app, row => move |_| app.remove_action_item(row.ordinal)),
                    ))
                }))
            }))
        })
    }

    fn render_agenda(app: &Rc<Self>) -> Dom {
        html!("div", {
            .class("mm-rows")
            .attr("dir", app.direction())
            .children_signal_vec(app.agenda.signal_vec_cloned()
                .map(clone!(app => move |row| Self::render_agenda_item(&app, &row))))
        })
    }

    fn render_attendees(app: &Rc<Self>) -> Dom {
        html!("div", {
            .class("mm-rows")
            .attr("dir", app.direction())
            .children_signal_vec(app.attendees.signal_vec_cloned()
                .map(clone!(app => move |row| Self::render_attendee(&app, &row))))
        })
    }

    fn render_action_items(app: &Rc<Self>) -> Dom {
        html!("div", {
            .class("mm-rows")
            .attr("dir", app.direction())
            .children_signal_vec(app.action_items.signal_vec_cloned()
                .map(clone!(app => move |row| Self::render_action_item(&app, &row))))
        })
    }

    /// Replace a section's server-rendered rows with the rendered list, wire
    /// its add button and drag reordering. The section stays inactive unless
    /// both its container and its add button are on the page.
    fn mount_section(
        app: &Rc<Self>,
        document: &Document,
        ids: &SectionIds,
        kind: ListKind,
        render: impl FnOnce(&Rc<Self>) -> Dom,
        mut on_add: impl FnMut() + 'static,
    ) -> bool {
        let (Some(container), Some(button)) = (
            document.get_element_by_id(&ids.container),
            document.get_element_by_id(&ids.add_button),
        ) else {
            debug!(container = %ids.container, "Section not on this page");
            return false;
        };
        Self::render_into(&container, render(app));
        EventListener::new(&button, "click", move |_| on_add()).forget();
        reorder::bind(app, &container, kind);
        true
    }

    fn render_into(container: &Element, dom: Dom) {
        container.set_inner_html("");
        dominator::append_dom(container, dom);
    }

    pub fn mount(app: &Rc<Self>, document: &Document) {
        let config = Rc::clone(&app.config);

        let agenda = Self::mount_section(
            app,
            document,
            &config.agenda,
            ListKind::Agenda,
            Self::render_agenda,
            clone!(app => move || {
                app.add_agenda_item();
            }),
        );
        let attendees = Self::mount_section(
            app,
            document,
            &config.attendees,
            ListKind::Attendees,
            Self::render_attendees,
            clone!(app => move || {
                app.add_attendee();
            }),
        );
        let action_items = Self::mount_section(
            app,
            document,
            &config.action_items,
            ListKind::ActionItems,
            Self::render_action_items,
            clone!(app => move || {
                app.add_action_item();
            }),
        );

        info!(agenda, attendees, action_items, "Minutes form mounted");
    }
}
