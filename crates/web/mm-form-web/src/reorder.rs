//! Drag-and-drop reordering of rendered rows
//!
//! Rows carry their ordinal in `data-ordinal` and only their `draggable`
//! handles start a drag. Dropping on another row of the same section moves the
//! dragged row to that row's position. The listeners live on the section
//! container, so rows added later are covered without rebinding.

use crate::app::FormApp;
use gloo_events::{EventListener, EventListenerOptions};
use mm_form_core::ListKind;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event};

/// Row attribute holding the ordinal of its field names
pub const ORDINAL_ATTRIBUTE: &str = "data-ordinal";

const DRAGGING_CLASS: &str = "opacity-50";

/// The row containing the event target and its ordinal
fn event_row(container: &Element, event: &Event) -> Option<(Element, usize)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let row = target
        .closest(&format!("[{ORDINAL_ATTRIBUTE}]"))
        .ok()
        .flatten()?;
    if !container.contains(Some(&*row)) {
        return None;
    }
    let ordinal = row.get_attribute(ORDINAL_ATTRIBUTE)?.parse().ok()?;
    Some((row, ordinal))
}

pub fn bind(app: &Rc<FormApp>, container: &Element, kind: ListKind) {
    let dragging: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));

    let source = Rc::clone(&dragging);
    let root = container.clone();
    EventListener::new(container, "dragstart", move |event| {
        let Some((row, ordinal)) = event_row(&root, event) else {
            return;
        };
        source.set(Some(ordinal));
        let _ = row.class_list().add_1(DRAGGING_CLASS);
        if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
            transfer.set_effect_allowed("move");
            // Firefox only starts a drag that carries data
            let _ = transfer.set_data("text/plain", &ordinal.to_string());
        }
    })
    .forget();

    let source = Rc::clone(&dragging);
    EventListener::new_with_options(
        container,
        "dragover",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if source.get().is_some() {
                event.prevent_default();
            }
        },
    )
    .forget();

    let source = Rc::clone(&dragging);
    let root = container.clone();
    let app = Rc::clone(app);
    EventListener::new_with_options(
        container,
        "drop",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(ordinal) = source.take() else {
                return;
            };
            event.prevent_default();
            if let Some((_, target)) = event_row(&root, event) {
                if target != ordinal {
                    app.move_row(kind, ordinal, target);
                }
            }
        },
    )
    .forget();

    let root = container.clone();
    EventListener::new(container, "dragend", move |event| {
        dragging.set(None);
        if let Some((row, _)) = event_row(&root, event) {
            let _ = row.class_list().remove_1(DRAGGING_CLASS);
        }
    })
    .forget();
}
