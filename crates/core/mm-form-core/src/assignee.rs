//! Assignee dropdown model
//!
//! The option set is derived: the sentinel followed by the current attendee
//! names. Only the selection and the sticky marker are state of their own.

/// Value of the "no assignee chosen" option
pub const SENTINEL_VALUE: &str = "";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeOption {
    pub value: String,
    pub label: String,
}

impl AssigneeOption {
    pub fn sentinel(label: &str) -> Self {
        Self {
            value: SENTINEL_VALUE.to_string(),
            label: label.to_string(),
        }
    }

    pub fn attendee(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.value == SENTINEL_VALUE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssigneeSelect {
    options: Vec<AssigneeOption>,
    selected: String,
    /// Read once from the server-rendered `data-current` attribute
    sticky: String,
}

impl AssigneeSelect {
    /// A widget created on the client; its sticky marker is empty
    pub fn new() -> Self {
        Self::default()
    }

    /// A server-rendered widget carrying an initial assignment
    pub fn with_sticky(current: impl Into<String>) -> Self {
        Self::seeded(current, SENTINEL_VALUE)
    }

    /// A server-rendered widget with both its `data-current` marker and the
    /// value it showed at load; the latter only matters while no marker is set
    /// and only until the first refresh decides against it
    pub fn seeded(current: impl Into<String>, selected: impl Into<String>) -> Self {
        Self {
            options: Vec::new(),
            selected: selected.into(),
            sticky: current.into(),
        }
    }

    pub fn options(&self) -> &[AssigneeOption] {
        &self.options
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn sticky(&self) -> &str {
        &self.sticky
    }

    /// Sticky marker if set, otherwise the live selection
    pub fn preferred(&self) -> &str {
        if self.sticky.is_empty() {
            &self.selected
        } else {
            &self.sticky
        }
    }

    /// Live selection by the user. Values outside the domain select the
    /// sentinel, the way a `<select>` ignores unknown values.
    pub fn select(&mut self, value: &str) -> bool {
        let known = !value.is_empty() && self.options.iter().any(|o| o.value == value);
        self.selected = if known {
            value.to_string()
        } else {
            SENTINEL_VALUE.to_string()
        };
        known
    }

    /// Rebuild the options from an attendee snapshot and restore the
    /// preferred value when it is still in the domain
    pub fn refresh(&mut self, names: &[String], sentinel_label: &str) {
        let preferred = self.preferred().to_string();

        self.options.clear();
        self.options.push(AssigneeOption::sentinel(sentinel_label));
        self.options
            .extend(names.iter().map(|name| AssigneeOption::attendee(name)));

        self.selected = if !preferred.is_empty() && names.iter().any(|n| *n == preferred) {
            preferred
        } else {
            SENTINEL_VALUE.to_string()
        };
    }
}
