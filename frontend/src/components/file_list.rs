//! Removable list of staged files.

use leptos::*;

use crate::components::UploadState;
use crate::selection::format_size;

#[component]
pub fn FileList(state: UploadState) -> impl IntoView {
    let rows = move || {
        state.with(|s| {
            s.selection()
                .iter()
                .map(|f| (f.id(), f.name().to_string(), f.size()))
                .collect::<Vec<_>>()
        })
    };
    let hidden = move || state.with(|s| s.selection().is_empty());

    view! {
        <div
            id="file-list"
            class="mt-3"
            style:display=move || if hidden() { "none" } else { "block" }
        >
            <h6 class="mb-2">"Selected files"</h6>
            <div id="file-items">
                <For
                    each=rows
                    key=|(id, _, _)| *id
                    children=move |(id, name, size)| {
                        // Bound to the file identity, not its row position.
                        let on_remove = move |_| {
                            if let Some(removed) = state.try_update(|s| s.remove(id)).flatten() {
                                log::info!("🗑️ Removed {}", removed.name());
                            }
                        };

                        view! {
                            <div class="alert alert-light d-flex justify-content-between align-items-center py-2">
                                <span>
                                    <i class="fas fa-file-alt me-2"></i>
                                    {name}
                                    <small class="text-muted ms-2">{format_size(size)}</small>
                                </span>
                                <button
                                    type="button"
                                    class="btn btn-sm btn-outline-danger"
                                    aria-label="Remove"
                                    on:click=on_remove
                                >
                                    <i class="fas fa-times"></i>
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
