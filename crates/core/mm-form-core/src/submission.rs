//! Decoding of posted form arrays into the stored meeting record

use crate::calendar::{CalendarKind, parse_in};
use crate::error::FormResult;
use crate::naming::{ActionField, FieldName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItemRecord {
    pub description: String,
    pub assigned_to: String,
    pub deadline: Option<NaiveDate>,
}

/// Normalized meeting lists: blanks dropped, assignees validated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinutesSubmission {
    pub agenda: Vec<String>,
    pub attendees: Vec<String>,
    pub action_items: Vec<ActionItemRecord>,
}

impl MinutesSubmission {
    /// Drop blank agenda and attendee entries and clear assignees that are
    /// not among the remaining attendees
    pub fn new(
        agenda: Vec<String>,
        attendees: Vec<String>,
        action_items: Vec<ActionItemRecord>,
    ) -> Self {
        let agenda: Vec<String> = agenda.into_iter().filter(|s| !s.trim().is_empty()).collect();
        let attendees: Vec<String> = attendees
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        let action_items = action_items
            .into_iter()
            .map(|mut item| {
                if !item.assigned_to.is_empty() && !attendees.contains(&item.assigned_to) {
                    debug!(assigned_to = %item.assigned_to, "Clearing assignee not among attendees");
                    item.assigned_to.clear();
                }
                item
            })
            .collect();

        Self {
            agenda,
            attendees,
            action_items,
        }
    }

    /// Decode posted `name=value` pairs. Pairs whose names are not dynamic
    /// list fields (title, csrf token, ...) are ignored; rows are ordered by
    /// ordinal.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> FormResult<Self> {
        let mut agenda = BTreeMap::new();
        let mut attendees = BTreeMap::new();
        let mut action_items: BTreeMap<usize, ActionItemRecord> = BTreeMap::new();

        for (name, value) in pairs {
            let Ok(field) = name.parse::<FieldName>() else {
                continue;
            };
            match field {
                FieldName::Agenda(n) => {
                    agenda.insert(n, value.to_string());
                }
                FieldName::Attendee(n) => {
                    attendees.insert(n, value.to_string());
                }
                FieldName::ActionItem(n, sub) => {
                    let item = action_items.entry(n).or_default();
                    match sub {
                        ActionField::Description => item.description = value.to_string(),
                        ActionField::AssignedTo => item.assigned_to = value.to_string(),
                        ActionField::Deadline if value.trim().is_empty() => item.deadline = None,
                        ActionField::Deadline => {
                            item.deadline = Some(parse_in(value, CalendarKind::Gregorian)?)
                        }
                    }
                }
            }
        }

        Ok(Self::new(
            agenda.into_values().collect(),
            attendees.into_values().collect(),
            action_items.into_values().collect(),
        ))
    }
}
