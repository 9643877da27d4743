//! Multipart upload of staged files to the server.
//!
//! Uses `XMLHttpRequest` rather than `fetch` because only XHR reports
//! upload-side progress events.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::{AppError, AppResult, CSRF_FIELD, FILE_FIELD};

/// Build the multipart body: the token first, then one `file` part per
/// staged file in selection order.
pub fn build_form_data(csrf_token: &str, files: &[File]) -> AppResult<FormData> {
    let form_data = FormData::new().map_err(|e| AppError::dom("Failed to create FormData", e))?;

    form_data
        .append_with_str(CSRF_FIELD, csrf_token)
        .map_err(|e| AppError::dom("Failed to append token", e))?;

    for file in files {
        form_data
            .append_with_blob_and_filename(FILE_FIELD, file, &file.name())
            .map_err(|e| AppError::dom("Failed to append file", e))?;
    }

    Ok(form_data)
}

/// POST the staged files to `action`.
///
/// `on_progress(loaded, total)` is called for every upload progress event
/// with a computable total. Resolves with the HTTP status once the response
/// has loaded; a transport failure resolves to [`AppError::Network`].
pub async fn send_upload(
    action: &str,
    csrf_token: &str,
    files: &[File],
    on_progress: impl Fn(f64, f64) + 'static,
) -> AppResult<u16> {
    let form_data = build_form_data(csrf_token, files)?;
    let xhr = XmlHttpRequest::new().map_err(|e| AppError::dom("Failed to create request", e))?;

    let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
        if ev.length_computable() {
            on_progress(ev.loaded(), ev.total());
        }
    });
    xhr.upload()
        .map_err(|e| AppError::dom("Upload target unavailable", e))?
        .set_onprogress(Some(progress.as_ref().unchecked_ref()));

    // Only one of load/error fires; the other callback is released with
    // the request.
    let mut executor = |resolve: Function, reject: Function| {
        let target = xhr.clone();
        let onload = Closure::once_into_js(move || {
            let status = target.status().unwrap_or(0);
            let _ = resolve.call1(&JsValue::NULL, &JsValue::from(status));
        });
        xhr.set_onload(Some(onload.unchecked_ref()));

        let onerror = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        xhr.set_onerror(Some(onerror.unchecked_ref()));
    };
    let done = Promise::new(&mut executor);

    xhr.open_with_async("POST", action, true)
        .map_err(|e| AppError::dom("Failed to open request", e))?;
    xhr.send_with_opt_form_data(Some(&form_data))
        .map_err(|e| AppError::Network(format!("{:?}", e)))?;

    log::debug!("📤 POST {} with {} file(s)", action, files.len());

    let result = JsFuture::from(done).await;
    xhr.upload()
        .map(|upload| upload.set_onprogress(None))
        .ok();
    drop(progress);

    let status = result.map_err(|_| AppError::Network("connection failed".to_string()))?;
    status
        .as_f64()
        .map(|s| s as u16)
        .ok_or_else(|| AppError::Network("response status unavailable".to_string()))
}
