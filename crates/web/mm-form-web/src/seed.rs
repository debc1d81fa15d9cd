//! Read the server-rendered rows before the lists are re-rendered

use crate::dom::{field_value, query_all};
use mm_form_core::{ActionField, ActionItemSeed, FieldName, FormConfig, FormSeed, ListKind};
use std::collections::BTreeMap;
use tracing::debug;
use web_sys::{Document, Element};

fn container(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

/// `(ordinal, element)` for every dynamic field of `kind` under `root`,
/// in ordinal order
fn named_fields(root: &Element, kind: ListKind) -> Vec<(FieldName, Element)> {
    let selector = format!("[name^=\"{}-\"]", kind.prefix());
    let mut fields: Vec<(FieldName, Element)> = query_all(root, &selector)
        .into_iter()
        .filter_map(|el| {
            let name = el.get_attribute("name")?;
            match name.parse::<FieldName>() {
                Ok(field) => Some((field, el)),
                Err(e) => {
                    debug!(error = %e, "Skipping unrecognized field");
                    None
                }
            }
        })
        .collect();
    fields.sort_by_key(|(field, _)| field.ordinal());
    fields
}

fn simple_values(root: Option<Element>, kind: ListKind) -> Vec<String> {
    root.map(|root| {
        named_fields(&root, kind)
            .into_iter()
            .map(|(_, el)| field_value(&el))
            .collect()
    })
    .unwrap_or_default()
}

fn action_items(root: Option<Element>) -> Vec<ActionItemSeed> {
    let Some(root) = root else {
        return Vec::new();
    };
    let mut items: BTreeMap<usize, ActionItemSeed> = BTreeMap::new();
    for (field, el) in named_fields(&root, ListKind::ActionItems) {
        let FieldName::ActionItem(ordinal, sub) = field else {
            continue;
        };
        let item = items.entry(ordinal).or_default();
        match sub {
            ActionField::Description => item.description = field_value(&el),
            ActionField::AssignedTo => {
                item.assigned_to = el.get_attribute("data-current").unwrap_or_default();
                item.selected = field_value(&el);
            }
            ActionField::Deadline => item.deadline = field_value(&el),
        }
    }
    items.into_values().collect()
}

pub fn read_seed(document: &Document, config: &FormConfig) -> FormSeed {
    let seed = FormSeed {
        agenda: simple_values(container(document, &config.agenda.container), ListKind::Agenda),
        attendees: simple_values(
            container(document, &config.attendees.container),
            ListKind::Attendees,
        ),
        action_items: action_items(container(document, &config.action_items.container)),
    };
    debug!(
        agenda = seed.agenda.len(),
        attendees = seed.attendees.len(),
        action_items = seed.action_items.len(),
        "Read server-rendered rows"
    );
    seed
}
