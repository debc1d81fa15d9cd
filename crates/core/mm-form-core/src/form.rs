//! The minutes form model: dynamic lists and the assignee synchronizer
//!
//! Every assignee dropdown's options are kept equal to the sentinel followed by
//! the current attendee names. Edits and action-item additions refresh the
//! domains immediately; an attendee removal only records a pending refresh that
//! the host settles on its next scheduling tick, once the row is gone from the
//! page.

use crate::assignee::AssigneeSelect;
use crate::calendar::DeadlineField;
use crate::list::DynamicList;
use crate::locale::Locale;
use crate::naming::{ActionField, FieldName, ListKind};
use crate::submission::{ActionItemRecord, MinutesSubmission};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One action-item row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionItem {
    pub description: String,
    pub assignee: AssigneeSelect,
    pub deadline: DeadlineField,
}

/// Server-rendered action item read at page load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItemSeed {
    pub description: String,
    /// The select's `data-current` attribute
    pub assigned_to: String,
    /// The select's value at load
    pub selected: String,
    /// Gregorian `YYYY-MM-DD`, empty when unset
    pub deadline: String,
}

/// Initial form state rendered by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSeed {
    pub agenda: Vec<String>,
    pub attendees: Vec<String>,
    pub action_items: Vec<ActionItemSeed>,
}

#[derive(Debug, Clone)]
pub struct MinutesForm {
    locale: Locale,
    agenda: DynamicList<String>,
    attendees: DynamicList<String>,
    action_items: DynamicList<ActionItem>,
    refresh_pending: bool,
}

impl MinutesForm {
    pub fn new(locale: Locale) -> Self {
        Self::from_seed(locale, FormSeed::default())
    }

    /// Build from server-rendered rows and run the initial domain refresh
    pub fn from_seed(locale: Locale, seed: FormSeed) -> Self {
        let calendar = locale.calendar();
        let action_items = seed.action_items.into_iter().map(|item| {
            let mut deadline = DeadlineField::new();
            if let Err(e) = deadline.set_gregorian(&item.deadline, calendar) {
                debug!(error = %e, "Dropping unparseable seeded deadline");
            }
            ActionItem {
                description: item.description,
                assignee: AssigneeSelect::seeded(item.assigned_to, item.selected),
                deadline,
            }
        });

        let mut form = Self {
            locale,
            agenda: DynamicList::with_values(ListKind::Agenda, seed.agenda),
            attendees: DynamicList::with_values(ListKind::Attendees, seed.attendees),
            action_items: DynamicList::with_values(ListKind::ActionItems, action_items),
            refresh_pending: false,
        };
        form.refresh_assignee_domains();
        form
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn agenda(&self) -> &DynamicList<String> {
        &self.agenda
    }

    pub fn attendees(&self) -> &DynamicList<String> {
        &self.attendees
    }

    pub fn action_items(&self) -> &DynamicList<ActionItem> {
        &self.action_items
    }

    pub fn action_item(&self, ordinal: usize) -> Option<&ActionItem> {
        self.action_items.get(ordinal)
    }

    // Agenda

    pub fn add_agenda_item(&mut self) -> usize {
        self.agenda.push_default()
    }

    pub fn remove_agenda_item(&mut self, ordinal: usize) -> bool {
        self.agenda.remove(ordinal).is_some()
    }

    pub fn set_agenda_item(&mut self, ordinal: usize, text: &str) -> bool {
        match self.agenda.get_mut(ordinal) {
            Some(item) => {
                *item = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn move_agenda_item(&mut self, ordinal: usize, to_index: usize) -> Option<(usize, usize)> {
        self.agenda.move_entry(ordinal, to_index)
    }

    // Attendees

    /// Append an empty attendee. Blank names are outside every domain, so no
    /// refresh is needed until the name is typed.
    pub fn add_attendee(&mut self) -> usize {
        self.attendees.push_default()
    }

    /// Record an edit of an attendee input and resynchronize all assignees
    pub fn set_attendee_name(&mut self, ordinal: usize, name: &str) -> bool {
        let Some(entry) = self.attendees.get_mut(ordinal) else {
            return false;
        };
        *entry = name.to_string();
        self.refresh_assignee_domains();
        true
    }

    /// Remove an attendee; the domain refresh is deferred to [`Self::settle`]
    pub fn remove_attendee(&mut self, ordinal: usize) -> bool {
        if self.attendees.remove(ordinal).is_none() {
            return false;
        }
        self.refresh_pending = true;
        true
    }

    /// Reorder an attendee; option order follows, so every domain is refreshed
    pub fn move_attendee(&mut self, ordinal: usize, to_index: usize) -> Option<(usize, usize)> {
        let moved = self.attendees.move_entry(ordinal, to_index)?;
        self.refresh_assignee_domains();
        Some(moved)
    }

    /// Trimmed, non-blank attendee names in display order
    pub fn collect_attendee_names(&self) -> Vec<String> {
        self.attendees
            .values()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    // Action items

    /// Append an empty action item and populate its assignee options
    pub fn add_action_item(&mut self) -> usize {
        let ordinal = self.action_items.push_default();
        self.refresh_assignee_domains();
        ordinal
    }

    pub fn remove_action_item(&mut self, ordinal: usize) -> bool {
        self.action_items.remove(ordinal).is_some()
    }

    pub fn move_action_item(&mut self, ordinal: usize, to_index: usize) -> Option<(usize, usize)> {
        self.action_items.move_entry(ordinal, to_index)
    }

    pub fn set_action_description(&mut self, ordinal: usize, text: &str) -> bool {
        match self.action_items.get_mut(ordinal) {
            Some(item) => {
                item.description = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Set a deadline from a native (Gregorian) date input
    pub fn set_action_deadline(&mut self, ordinal: usize, value: &str) -> bool {
        let calendar = self.locale.calendar();
        let Some(item) = self.action_items.get_mut(ordinal) else {
            return false;
        };
        if let Err(e) = item.deadline.set_gregorian(value, calendar) {
            debug!(ordinal, error = %e, "Ignoring invalid deadline");
            item.deadline.clear();
        }
        true
    }

    /// Live selection in an assignee dropdown; false when the row is gone or
    /// the value is not in the current domain
    pub fn select_assignee(&mut self, ordinal: usize, value: &str) -> bool {
        self.action_items
            .get_mut(ordinal)
            .is_some_and(|item| item.assignee.select(value))
    }

    // Synchronization

    /// Rebuild every assignee domain from a fresh attendee snapshot
    pub fn refresh_assignee_domains(&mut self) {
        let names = self.collect_attendee_names();
        let sentinel_label = self.locale.labels().select;
        for entry in self.action_items.iter_mut() {
            entry.value_mut().assignee.refresh(&names, sentinel_label);
        }
        self.refresh_pending = false;
        trace!(
            attendees = names.len(),
            widgets = self.action_items.len(),
            "Refreshed assignee domains"
        );
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.refresh_pending
    }

    /// Run a deferred refresh if one is pending; returns whether it ran
    pub fn settle(&mut self) -> bool {
        if !self.refresh_pending {
            return false;
        }
        self.refresh_assignee_domains();
        true
    }

    // Submission

    /// Field name/value pairs as the browser would post them
    pub fn form_fields(&self) -> Vec<(FieldName, String)> {
        let mut fields = Vec::new();
        for entry in self.agenda.iter() {
            fields.push((FieldName::Agenda(entry.ordinal()), entry.value().clone()));
        }
        for entry in self.attendees.iter() {
            fields.push((FieldName::Attendee(entry.ordinal()), entry.value().clone()));
        }
        for entry in self.action_items.iter() {
            let n = entry.ordinal();
            let item = entry.value();
            fields.push((
                FieldName::ActionItem(n, ActionField::Description),
                item.description.clone(),
            ));
            fields.push((
                FieldName::ActionItem(n, ActionField::AssignedTo),
                item.assignee.selected().to_string(),
            ));
            fields.push((
                FieldName::ActionItem(n, ActionField::Deadline),
                item.deadline.submission_value(),
            ));
        }
        fields
    }

    /// What the backend stores for the current state
    pub fn to_submission(&self) -> MinutesSubmission {
        let action_items = self
            .action_items
            .values()
            .map(|item| ActionItemRecord {
                description: item.description.clone(),
                assigned_to: item.assignee.selected().to_string(),
                deadline: item.deadline.gregorian(),
            })
            .collect();
        MinutesSubmission::new(
            self.agenda.values().cloned().collect(),
            self.attendees.values().cloned().collect(),
            action_items,
        )
    }
}
