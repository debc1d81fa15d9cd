//! Platform-neutral model of the meeting-minutes form
//!
//! This crate holds everything the page script needs that does not touch the
//! DOM:
//!
//! - Dynamic agenda, attendee and action-item lists with stable ordinals
//! - The assignee synchronizer keeping every dropdown's options equal to the
//!   current attendee names
//! - Form field naming and decoding of posted form arrays
//! - Theme preference persistence over an injected storage
//! - Locale labels and Persian/Gregorian date pairing
//!
//! # Examples
//!
//! ```rust
//! use mm_form_core::{FormSeed, Locale, MinutesForm};
//!
//! let seed = FormSeed {
//!     attendees: vec!["Ana".to_string()],
//!     ..FormSeed::default()
//! };
//! let mut form = MinutesForm::from_seed(Locale::En, seed);
//!
//! let item = form.add_action_item();
//! let bo = form.add_attendee();
//! form.set_attendee_name(bo, "Bo");
//! form.select_assignee(item, "Bo");
//!
//! form.remove_attendee(bo);
//! form.settle();
//!
//! let assignee = &form.action_item(item).unwrap().assignee;
//! assert_eq!(assignee.option_values(), vec!["", "Ana"]);
//! assert_eq!(assignee.selected(), "");
//! ```

pub mod assignee;
pub mod calendar;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod locale;
pub mod naming;
pub mod submission;
pub mod theme;

pub use assignee::{AssigneeOption, AssigneeSelect, SENTINEL_VALUE};
pub use calendar::{CalendarKind, DeadlineField, JalaliDate};
pub use config::{CompanyIds, FormConfig, SectionIds};
pub use error::{FormError, FormResult};
pub use form::{ActionItem, ActionItemSeed, FormSeed, MinutesForm};
pub use list::{DynamicList, ListEntry};
pub use locale::{Labels, Locale};
pub use naming::{ActionField, FieldName, ListKind};
pub use submission::{ActionItemRecord, MinutesSubmission};
pub use theme::{MemoryStore, PreferenceStore, Theme, ThemeMode, ThemePreferences};
