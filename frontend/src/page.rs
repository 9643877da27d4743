//! Page-wide enhancements for server-rendered markup.
//!
//! Applied once at boot to whatever the server rendered:
//!
//! - dismissible alerts close themselves after [`DISMISS_DELAY_MS`]
//! - submit buttons lock while their form submits, for [`SUBMIT_LOCKOUT_MS`]
//! - generic file inputs reject files over [`MAX_FILE_SIZE`]
//! - Bootstrap tooltips are activated when Bootstrap is loaded
//!
//! The submit lockout re-enables the button on a timer, not on request
//! completion. A form still submitting after the delay becomes clickable
//! again.

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement};

use crate::{
    DISMISS_DELAY_MS, MAX_FILE_SIZE, PROCESSING_LABEL, SUBMIT_LOCKOUT_MS, UPLOADER_FORM_ATTRIBUTE,
};

const SIZE_CAP_MESSAGE: &str = "The file is too large. Please choose a file of 10 MB or less.";

/// Run every enhancement against the current document.
pub fn enhance() {
    activate_tooltips();
    dismiss_alerts_later(DISMISS_DELAY_MS);
    lock_submitting_forms();
    cap_file_inputs();
}

/// Show a blocking browser dialog.
pub fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        log::warn!("Failed to show alert: {:?}", e);
    }
}

/// Reload the current page.
pub fn reload() {
    if let Err(e) = gloo_utils::window().location().reload() {
        log::error!("Failed to reload page: {:?}", e);
    }
}

pub fn exceeds_size_cap(bytes: u64) -> bool {
    bytes > MAX_FILE_SIZE
}

pub fn file_info_text(name: &str) -> String {
    format!("Selected file: {}", name)
}

fn busy_label_html() -> String {
    format!(
        r#"<span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span> {}"#,
        PROCESSING_LABEL
    )
}

fn query_all(selector: &str) -> Vec<Element> {
    match gloo_utils::document().query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(e) => {
            log::warn!("Invalid selector {}: {:?}", selector, e);
            Vec::new()
        }
    }
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("Failed to attach {} listener: {:?}", event, e);
    }
    // Listeners live as long as the page.
    closure.forget();
}

// =============================================================================
// Tooltips
// =============================================================================

fn activate_tooltips() {
    let window = gloo_utils::window();
    let constructor = Reflect::get(&window, &JsValue::from_str("bootstrap"))
        .ok()
        .filter(|bs| bs.is_object())
        .and_then(|bs| Reflect::get(&bs, &JsValue::from_str("Tooltip")).ok())
        .and_then(|ctor| ctor.dyn_into::<Function>().ok());

    let Some(constructor) = constructor else {
        log::debug!("Bootstrap not loaded, skipping tooltips");
        return;
    };

    for element in query_all(r#"[data-bs-toggle="tooltip"]"#) {
        if let Err(e) = Reflect::construct(&constructor, &Array::of1(&element)) {
            log::warn!("Failed to activate tooltip: {:?}", e);
        }
    }
}

// =============================================================================
// Alerts
// =============================================================================

fn dismiss_alerts_later(delay_ms: u32) {
    let alerts = query_all(".alert-dismissible");
    if alerts.is_empty() {
        return;
    }
    log::debug!("Dismissing {} alert(s) in {}ms", alerts.len(), delay_ms);

    Timeout::new(delay_ms, move || {
        for element in alerts {
            let _ = element.class_list().remove_1("show");
            element.remove();
        }
    })
    .forget();
}

// =============================================================================
// Submit lockout
// =============================================================================

fn lock_submitting_forms() {
    for form in query_all("form") {
        if form.has_attribute(UPLOADER_FORM_ATTRIBUTE) {
            continue;
        }
        let target = form.clone();
        listen(&form, "submit", move |_| {
            if let Ok(Some(button)) = target.query_selector(r#"button[type="submit"]"#) {
                lock_button(button, SUBMIT_LOCKOUT_MS);
            }
        });
    }
}

fn lock_button(button: Element, lockout_ms: u32) {
    let original = button
        .get_attribute("data-original-text")
        .unwrap_or_else(|| button.inner_html());

    let _ = button.set_attribute("disabled", "");
    button.set_inner_html(&busy_label_html());

    Timeout::new(lockout_ms, move || {
        let _ = button.remove_attribute("disabled");
        button.set_inner_html(&original);
    })
    .forget();
}

// =============================================================================
// File size cap
// =============================================================================

fn cap_file_inputs() {
    for element in query_all(r#"input[type="file"]"#) {
        let Ok(input) = element.clone().dyn_into::<HtmlInputElement>() else {
            continue;
        };
        listen(&element, "change", move |_| check_file_size(&input));
    }
}

fn check_file_size(input: &HtmlInputElement) {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return;
    };

    if exceeds_size_cap(file.size() as u64) {
        log::warn!("⚠️ {} exceeds the upload size cap", file.name());
        alert(SIZE_CAP_MESSAGE);
        input.set_value("");
        return;
    }

    if let Err(e) = show_file_info(input, &file.name()) {
        log::warn!("Failed to show file info: {:?}", e);
    }
}

fn show_file_info(input: &HtmlInputElement, name: &str) -> Result<(), JsValue> {
    let Some(parent) = input.parent_element() else {
        return Ok(());
    };
    if let Some(existing) = parent.query_selector(".file-info")? {
        existing.remove();
    }

    let info = gloo_utils::document().create_element("small")?;
    info.set_class_name("text-muted file-info");
    info.set_text_content(Some(&file_info_text(name)));
    parent.append_child(&info)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_cap_boundary() {
        assert!(!exceeds_size_cap(0));
        assert!(!exceeds_size_cap(MAX_FILE_SIZE));
        assert!(exceeds_size_cap(MAX_FILE_SIZE + 1));
    }

    #[test]
    fn test_file_info_text() {
        assert_eq!(file_info_text("report.pdf"), "Selected file: report.pdf");
    }

    #[test]
    fn test_busy_label_contains_spinner() {
        let html = busy_label_html();
        assert!(html.starts_with(r#"<span class="spinner-border"#));
        assert!(html.ends_with(PROCESSING_LABEL));
    }
}
