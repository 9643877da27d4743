//! Docstage - markdown upload client
//!
//! A WebAssembly client mounted into the server-rendered document pages.
//! It stages markdown files picked or dropped by the user, uploads them in
//! one multipart request with a progress bar, and applies a few page-wide
//! form and alert behaviors.
//!
//! # Modules
//!
//! - [`config`] - Constants and runtime configuration
//! - [`types`] - Notices and errors
//! - [`selection`] - Staged file selection and the extension filter
//! - [`session`] - Upload progress and outcome
//! - [`uploader`] - State machine driving the upload form
//! - [`components`] - Leptos UI components
//! - [`services`] - Multipart upload over XHR
//! - [`page`] - Page-wide enhancements for server-rendered markup

use std::sync::atomic::{AtomicBool, Ordering};

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod selection;
pub mod session;
pub mod uploader;
pub mod components;
pub mod services;
pub mod page;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Notices
    Notice, NoticeLevel,
    // Errors
    AppError, AppResult,
};

// State
pub use selection::{FileHandle, FileId, Selection, StageOutcome, StagedFile};
pub use session::{UploadOutcome, UploadSession};
pub use uploader::{UploadPhase, UploaderState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

static BOOTED: AtomicBool = AtomicBool::new(false);

/// WASM entry point - called automatically once the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    boot();
}

/// Install logging, enhance the page and mount the uploader.
///
/// Safe to call more than once; only the first call does anything.
pub fn boot() {
    if BOOTED.swap(true, Ordering::SeqCst) {
        return;
    }

    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Docstage uploader starting");

    // Runs before mounting so the uploader's own form and input are left alone.
    page::enhance();
    mount_uploader();
}

fn mount_uploader() {
    let Some(host) = gloo_utils::document()
        .get_element_by_id(UPLOAD_ROOT_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::debug!("No #{} on this page, uploader not mounted", UPLOAD_ROOT_ID);
        return;
    };

    let config = UploaderConfig::parse_or_default(host.get_attribute(CONFIG_ATTRIBUTE).as_deref());
    let action = config.action_or(|| gloo_utils::window().location().href().unwrap_or_default());
    let csrf_token = config.csrf_token_or(page_csrf_token);
    let title = config.title();

    if csrf_token.is_empty() {
        log::warn!("⚠️ No CSRF token found, uploads will likely be rejected");
    }

    mount_to(host, move || {
        view! { <UploadSection action=action csrf_token=csrf_token title=title/> }
    });
}

/// Token rendered by the server anywhere in the page.
fn page_csrf_token() -> String {
    gloo_utils::document()
        .query_selector(&format!("[name={}]", CSRF_FIELD))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}
