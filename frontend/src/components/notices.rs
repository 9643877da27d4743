//! Transient toast notices.
//!
//! Notices stack in the top-right corner and dismiss themselves after
//! [`DISMISS_DELAY_MS`], or earlier when closed.

use gloo_timers::callback::Timeout;
use leptos::*;

use crate::{Notice, NoticeLevel, DISMISS_DELAY_MS, MAX_NOTICES};

/// Show a notice and schedule its removal.
pub fn push_notice(notices: RwSignal<Vec<Notice>>, level: NoticeLevel, message: impl Into<String>) {
    let notice = Notice::new(level, message);
    let id = notice.id;
    log::info!("{} {}", level.emoji(), notice.message);

    notices.update(|list| {
        list.push(notice);
        // Keep the stack short
        if list.len() > MAX_NOTICES {
            list.remove(0);
        }
    });

    Timeout::new(DISMISS_DELAY_MS, move || dismiss(notices, id)).forget();
}

fn dismiss(notices: RwSignal<Vec<Notice>>, id: u64) {
    notices.update(|list| list.retain(|n| n.id != id));
}

#[component]
pub fn NoticeStack(notices: RwSignal<Vec<Notice>>) -> impl IntoView {
    view! {
        <div
            class="notice-stack position-fixed"
            style="top: 20px; right: 20px; z-index: 9999; min-width: 300px;"
        >
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let Notice { id, level, message, timestamp } = notice;
                    view! {
                        <div class=format!("alert {} alert-dismissible fade show", level.css_class()) role="alert">
                            <small class="text-muted me-2">{timestamp}</small>
                            {level.emoji()} " " {message}
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| dismiss(notices, id)
                            ></button>
                        </div>
                    }
                }
            />
        </div>
    }
}
