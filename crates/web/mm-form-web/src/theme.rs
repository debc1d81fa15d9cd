//! Light/dark/auto theme switching on the page

use crate::dom::query_all;
use gloo_events::{EventListener, EventListenerOptions};
use mm_form_core::{PreferenceStore, Theme, ThemeMode, ThemePreferences};
use std::rc::Rc;
use tracing::{debug, info};
use web_sys::{Document, MediaQueryList};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

pub struct ThemeController {
    prefs: ThemePreferences<Box<dyn PreferenceStore>>,
    media: Option<MediaQueryList>,
    document: Document,
}

impl ThemeController {
    pub fn new(document: &Document, store: Box<dyn PreferenceStore>, key: &str) -> Rc<Self> {
        let media = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten());
        Rc::new(Self {
            prefs: ThemePreferences::with_key(store, key),
            media,
            document: document.clone(),
        })
    }

    fn system_prefers_dark(&self) -> bool {
        self.media.as_ref().is_some_and(MediaQueryList::matches)
    }

    /// Apply the stored mode without rewriting it and wire the theme menu and system listener
    pub fn init(self: &Rc<Self>) {
        let theme = self.prefs.initial_theme(self.system_prefers_dark());
        self.render(theme);
        debug!(theme = theme.attr_value(), "Initial theme applied");

        if let Some(media) = &self.media {
            let controller = Rc::clone(self);
            EventListener::new(media, "change", move |_| {
                if let Some(theme) = controller.prefs.on_system_change(controller.system_prefers_dark()) {
                    controller.render(theme);
                }
            })
            .forget();
        }

        let Some(root) = self.document.document_element() else {
            return;
        };
        for item in query_all(&root, ".theme-select") {
            let controller = Rc::clone(self);
            let target = item.clone();
            EventListener::new_with_options(
                &item,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let raw = target.get_attribute("data-theme").unwrap_or_default();
                    match raw.parse::<ThemeMode>() {
                        Ok(mode) => {
                            controller.select(mode);
                        }
                        Err(e) => debug!(error = %e, "Ignoring theme menu entry"),
                    }
                },
            )
            .forget();
        }
    }

    /// Persist `mode` and apply the resolved theme
    pub fn select(&self, mode: ThemeMode) -> Theme {
        let theme = self.prefs.apply(mode, self.system_prefers_dark());
        self.render(theme);
        info!(mode = %mode, theme = theme.attr_value(), "Theme applied");
        theme
    }

    fn render(&self, theme: Theme) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute("data-theme", theme.attr_value());
        }
        if let Ok(Some(icon)) = self
            .document
            .query_selector(".nav-item .material-symbols-rounded")
        {
            icon.set_text_content(Some(theme.icon()));
        }
    }
}
