use leptos::*;

use crate::components::UploadState;

#[component]
pub fn ProgressSection(state: UploadState) -> impl IntoView {
    let visible = move || state.with(|s| s.in_flight());
    let width = move || {
        state.with(|s| {
            s.session()
                .map(|session| session.bar_width())
                .unwrap_or_else(|| "0%".to_string())
        })
    };
    let label = move || state.with(|s| s.session().map(|session| session.label()).unwrap_or_default());

    view! {
        <div
            id="upload-progress"
            class="mt-3"
            style:display=move || if visible() { "block" } else { "none" }
        >
            <div class="progress">
                <div
                    id="progress-bar"
                    class="progress-bar progress-bar-striped progress-bar-animated"
                    role="progressbar"
                    style:width=width
                ></div>
            </div>
            <small id="progress-text" class="text-muted">{label}</small>
        </div>
    }
}
