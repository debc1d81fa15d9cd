//! Reveal the custom logo uploader when the company select is "Other"

use gloo_events::EventListener;
use gloo_timers::future::TimeoutFuture;
use mm_form_core::FormConfig;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlSelectElement};

struct CompanyToggle {
    select: HtmlSelectElement,
    uploader: HtmlElement,
    custom_name: Option<HtmlElement>,
    config: Rc<FormConfig>,
}

impl CompanyToggle {
    fn sync(&self) {
        let display = if self.config.is_other_company(&self.select.value()) {
            "block"
        } else {
            "none"
        };
        let _ = self.uploader.style().set_property("display", display);
        if let Some(name) = &self.custom_name {
            let _ = name.style().set_property("display", display);
        }
    }
}

pub fn bind_company_toggle(document: &Document, config: Rc<FormConfig>) {
    let ids = &config.company;
    let select = document
        .get_element_by_id(&ids.select)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
    let uploader = document
        .get_element_by_id(&ids.logo_uploader)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let (Some(select), Some(uploader)) = (select, uploader) else {
        return;
    };
    let custom_name = document
        .get_element_by_id(&ids.custom_name)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let toggle = Rc::new(CompanyToggle {
        select,
        uploader,
        custom_name,
        config: Rc::clone(&config),
    });

    let on_change = Rc::clone(&toggle);
    EventListener::new(&toggle.select, "change", move |_| on_change.sync()).forget();

    // Browsers restore form state after load; evaluate once that has happened
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(0).await;
        toggle.sync();
    });
}
