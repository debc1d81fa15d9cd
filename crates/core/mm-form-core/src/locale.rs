//! Page locale and the labels used by dynamically rendered rows

use crate::calendar::CalendarKind;
use serde::{Deserialize, Serialize};

/// Locales the minutes form is rendered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fa,
}

/// Static text for rows created on the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub agenda_placeholder: &'static str,
    pub attendee_placeholder: &'static str,
    pub action_description_placeholder: &'static str,
    pub description: &'static str,
    pub assigned_to: &'static str,
    pub deadline: &'static str,
    /// Label of the sentinel assignee option
    pub select: &'static str,
}

const EN_LABELS: Labels = Labels {
    agenda_placeholder: "Enter agenda item",
    attendee_placeholder: "Enter attendee name",
    action_description_placeholder: "Action description...",
    description: "Description",
    assigned_to: "Assigned To",
    deadline: "Deadline",
    select: "Select",
};

const FA_LABELS: Labels = Labels {
    agenda_placeholder: "دستور جلسه را وارد کنید",
    attendee_placeholder: "نام شرکت‌کننده را وارد کنید",
    action_description_placeholder: "توضیح اقدام...",
    description: "توضیح",
    assigned_to: "مسئول",
    deadline: "مهلت",
    select: "انتخاب کنید",
};

impl Locale {
    /// Resolve the body's `data-locale` attribute; anything unrecognized is English
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("fa") => Locale::Fa,
            _ => Locale::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN_LABELS,
            Locale::Fa => &FA_LABELS,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Fa)
    }

    /// Calendar dates are displayed in
    pub fn calendar(self) -> CalendarKind {
        match self {
            Locale::En => CalendarKind::Gregorian,
            Locale::Fa => CalendarKind::Persian,
        }
    }
}
