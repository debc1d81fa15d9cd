//! Page configuration
//!
//! Every value has a default matching the server templates, so the page only
//! needs to supply a `data-form-config` JSON object when it deviates.

use crate::error::{FormError, FormResult};
use crate::theme::THEME_STORAGE_KEY;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// Element ids of one dynamic list section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionIds {
    /// Container holding the rows
    pub container: String,
    /// Button appending a row
    pub add_button: String,
}

impl SectionIds {
    pub fn new(container: impl Into<String>, add_button: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            add_button: add_button.into(),
        }
    }
}

/// Company select and the boxes revealed for a custom company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyIds {
    pub select: String,
    pub logo_uploader: String,
    pub custom_name: String,
    /// Select values meaning "some other company"
    pub other_values: Vec<String>,
}

impl Default for CompanyIds {
    fn default() -> Self {
        Self {
            select: "companySelect".to_string(),
            logo_uploader: "customLogoUploader".to_string(),
            custom_name: "customCompanyName".to_string(),
            other_values: vec!["Other".to_string(), "شرکت دیگر".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct FormConfig {
    #[builder(default = default_agenda())]
    pub agenda: SectionIds,

    #[builder(default = default_attendees())]
    pub attendees: SectionIds,

    #[builder(default = default_action_items())]
    pub action_items: SectionIds,

    #[builder(default)]
    pub company: CompanyIds,

    /// Local storage key for the theme mode
    #[builder(default = THEME_STORAGE_KEY.to_string())]
    pub theme_storage_key: String,

    /// Log level (trace, debug, info, warn, error)
    #[builder(default = default_log_level())]
    pub log_level: String,
}

fn default_agenda() -> SectionIds {
    SectionIds::new("agenda-items-container", "add-agenda-item")
}

fn default_attendees() -> SectionIds {
    SectionIds::new("attendees-container", "add-attendee-button")
}

fn default_action_items() -> SectionIds {
    SectionIds::new("action-items-container", "add-action-item-button")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            agenda: default_agenda(),
            attendees: default_attendees(),
            action_items: default_action_items(),
            company: CompanyIds::default(),
            theme_storage_key: THEME_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
        }
    }
}

impl FormConfig {
    /// Parse page-supplied JSON; missing keys take their defaults
    pub fn from_json(raw: &str) -> FormResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FormResult<()> {
        let ids = [
            ("agenda.container", &self.agenda.container),
            ("agenda.add_button", &self.agenda.add_button),
            ("attendees.container", &self.attendees.container),
            ("attendees.add_button", &self.attendees.add_button),
            ("action_items.container", &self.action_items.container),
            ("action_items.add_button", &self.action_items.add_button),
            ("theme_storage_key", &self.theme_storage_key),
        ];
        if let Some((field, _)) = ids.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(FormError::configuration(format!("{field} must not be empty")));
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(FormError::configuration(format!(
                "Invalid log level: {other}"
            ))),
        }
    }

    /// Whether the company select value should reveal the custom-company boxes
    pub fn is_other_company(&self, value: &str) -> bool {
        self.company.other_values.iter().any(|v| v == value)
    }
}
