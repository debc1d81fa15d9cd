//! Form field naming for server-side form-array decoding
//!
//! Every dynamically created field carries its list ordinal in its `name` and
//! `id`, e.g. `attendees-3` or `action_items-1-assigned_to`.

use crate::error::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The dynamic lists on the minutes form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    Agenda,
    Attendees,
    ActionItems,
}

impl ListKind {
    /// Field-name prefix the server expects for this list
    pub fn prefix(self) -> &'static str {
        match self {
            ListKind::Agenda => "agenda_items",
            ListKind::Attendees => "attendees",
            ListKind::ActionItems => "action_items",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "agenda_items" => Some(ListKind::Agenda),
            "attendees" => Some(ListKind::Attendees),
            "action_items" => Some(ListKind::ActionItems),
            _ => None,
        }
    }
}

/// Sub-fields of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionField {
    Description,
    AssignedTo,
    Deadline,
}

impl ActionField {
    pub fn key(self) -> &'static str {
        match self {
            ActionField::Description => "description",
            ActionField::AssignedTo => "assigned_to",
            ActionField::Deadline => "deadline",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "description" => Some(ActionField::Description),
            "assigned_to" => Some(ActionField::AssignedTo),
            "deadline" => Some(ActionField::Deadline),
            _ => None,
        }
    }
}

/// A fully qualified dynamic field name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Agenda(usize),
    Attendee(usize),
    ActionItem(usize, ActionField),
}

impl FieldName {
    pub fn kind(&self) -> ListKind {
        match self {
            FieldName::Agenda(_) => ListKind::Agenda,
            FieldName::Attendee(_) => ListKind::Attendees,
            FieldName::ActionItem(..) => ListKind::ActionItems,
        }
    }

    pub fn ordinal(&self) -> usize {
        match *self {
            FieldName::Agenda(n) | FieldName::Attendee(n) | FieldName::ActionItem(n, _) => n,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Agenda(n) | FieldName::Attendee(n) => {
                write!(f, "{}-{}", self.kind().prefix(), n)
            }
            FieldName::ActionItem(n, field) => {
                write!(f, "{}-{}-{}", self.kind().prefix(), n, field.key())
            }
        }
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> FormResult<Self> {
        let mut parts = s.splitn(3, '-');
        let (Some(prefix), Some(index)) = (parts.next(), parts.next()) else {
            return Err(FormError::invalid_field_name(s));
        };
        let kind = ListKind::from_prefix(prefix).ok_or_else(|| FormError::invalid_field_name(s))?;
        let ordinal: usize = index
            .parse()
            .map_err(|_| FormError::invalid_field_name(s))?;

        match (kind, parts.next()) {
            (ListKind::Agenda, None) => Ok(FieldName::Agenda(ordinal)),
            (ListKind::Attendees, None) => Ok(FieldName::Attendee(ordinal)),
            (ListKind::ActionItems, Some(key)) => ActionField::from_key(key)
                .map(|field| FieldName::ActionItem(ordinal, field))
                .ok_or_else(|| FormError::invalid_field_name(s)),
            _ => Err(FormError::invalid_field_name(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FieldName::Attendee(3).to_string(), "attendees-3");
        assert_eq!(FieldName::Agenda(0).to_string(), "agenda_items-0");
        assert_eq!(
            FieldName::ActionItem(1, ActionField::AssignedTo).to_string(),
            "action_items-1-assigned_to"
        );
    }

    #[test]
    fn test_parse_action_item_fields() {
        let name: FieldName = "action_items-12-deadline".parse().unwrap();
        assert_eq!(name, FieldName::ActionItem(12, ActionField::Deadline));
        assert_eq!(name.ordinal(), 12);
        assert_eq!(name.kind(), ListKind::ActionItems);
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        for bad in [
            "attendees",
            "attendees-x",
            "attendees-1-description",
            "action_items-1",
            "action_items-1-owner",
            "minutes-0",
            "csrf_token",
        ] {
            assert!(bad.parse::<FieldName>().is_err(), "{bad} should not parse");
        }
    }
}
