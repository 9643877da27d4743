//! Markdown upload form with drag & drop support.
//!
//! Handles file selection, staging, and submission to the server. All
//! state lives in one [`UploaderState`] signal; handlers update it and the
//! view projects it.

use leptos::*;
use web_sys::{DragEvent, Event, File, FileList as DomFileList, HtmlInputElement, SubmitEvent};

use crate::components::{push_notice, FileList, NoticeStack, ProgressSection};
use crate::services::send_upload;
use crate::{
    page, AppError, Notice, NoticeLevel, UploadOutcome, UploaderState, ACCEPTED_EXTENSION,
    CSRF_FIELD, FILE_FIELD,
};

/// Uploader state shared by the upload components.
pub type UploadState = RwSignal<UploaderState<File>>;

fn files_of(list: DomFileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

fn drop_zone_style(dragging: bool) -> &'static str {
    if dragging {
        "border: 2px dashed #007bff; background-color: #f8f9fa;"
    } else {
        "border: 2px dashed #dee2e6;"
    }
}

#[component]
pub fn UploadSection(
    /// Upload endpoint
    #[prop(into)]
    action: String,
    /// Anti-forgery token for the hidden form field
    #[prop(into)]
    csrf_token: String,
    /// Heading above the drop zone
    #[prop(into)]
    title: String,
) -> impl IntoView {
    let state: UploadState = create_rw_signal(UploaderState::new());
    let notices = create_rw_signal(Vec::<Notice>::new());
    let (dragging, set_dragging) = create_signal(false);
    let form_ref = create_node_ref::<leptos::html::Form>();
    let token_ref = create_node_ref::<leptos::html::Input>();

    let stage = move |batch: Vec<File>| {
        let Some((outcome, warning)) = state.try_update(|s| s.stage(batch)) else {
            return;
        };
        log::info!(
            "📄 Staged {} file(s), rejected {}",
            outcome.accepted,
            outcome.rejected.len()
        );
        if let Some(warning) = warning {
            push_notice(notices, NoticeLevel::Warning, warning.to_string());
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let files = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .map(files_of)
            .unwrap_or_default();
        stage(files);
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = input.files().map(files_of).unwrap_or_default();
        // Picking the same file again must fire another change event.
        input.set_value("");
        stage(files);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let files = match state.try_update(|s| s.begin_submit()) {
            Some(Ok(files)) => files,
            Some(Err(AppError::InFlight)) => {
                log::debug!("Upload already in flight, ignoring submit");
                return;
            }
            Some(Err(e)) => {
                log::warn!("⚠️ Submission blocked: {}", e);
                push_notice(notices, NoticeLevel::Warning, e.to_string());
                return;
            }
            None => return,
        };

        let action = form_ref
            .get_untracked()
            .map(|form| form.action())
            .unwrap_or_default();
        let token = token_ref
            .get_untracked()
            .map(|input| input.value())
            .unwrap_or_default();

        log::info!("📤 Uploading {} file(s) to {}", files.len(), action);

        spawn_local(async move {
            let response = send_upload(&action, &token, &files, move |loaded, total| {
                state.update(|s| {
                    s.record_progress(loaded, total);
                });
            })
            .await;

            match state.try_update(|s| s.finish(response)) {
                Some(UploadOutcome::Succeeded) => {
                    log::info!("✅ Upload accepted, reloading page");
                    page::reload();
                }
                Some(UploadOutcome::Failed(e)) => {
                    log::error!("❌ Upload failed: {}", e);
                    page::alert(&e.to_string());
                }
                None => {}
            }
        });
    };

    view! {
        <div class="upload-section">
            <NoticeStack notices=notices/>

            <h2 class="h4 mb-3">{title}</h2>

            <form
                id="upload-form"
                method="post"
                enctype="multipart/form-data"
                action=action
                data-uploader="true"
                node_ref=form_ref
                on:submit=on_submit
            >
                <input type="hidden" name=CSRF_FIELD value=csrf_token node_ref=token_ref/>

                <div
                    id="drop-zone"
                    class="drop-zone rounded p-5 text-center"
                    style=move || drop_zone_style(dragging.get())
                    on:dragenter=on_drag_over
                    on:dragover=on_drag_over
                    on:dragleave=on_drag_leave
                    on:drop=on_drop
                >
                    <i class="fas fa-cloud-upload-alt fa-3x text-muted mb-3"></i>
                    <p class="mb-2">"Drag and drop markdown files here"</p>
                    <p class="text-muted small">"or"</p>
                    <label for="id_file" class="btn btn-outline-primary">
                        "Choose files"
                    </label>
                    <input
                        type="file"
                        id="id_file"
                        name=FILE_FIELD
                        accept=ACCEPTED_EXTENSION
                        multiple=true
                        class="d-none"
                        on:change=on_file_change
                    />
                </div>

                <FileList state=state/>
                <ProgressSection state=state/>

                <button
                    type="submit"
                    id="upload-btn"
                    class="btn btn-primary mt-3"
                    disabled=move || !state.with(|s| s.submit_enabled())
                >
                    <i class="fas fa-upload me-2"></i>
                    "Upload"
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_zone_highlight() {
        assert!(drop_zone_style(true).contains("#007bff"));
        assert!(!drop_zone_style(false).contains("#007bff"));
    }
}
