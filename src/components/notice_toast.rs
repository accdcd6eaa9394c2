//! Notice Toast Component
//!
//! Shows the latest notice; it clears itself after a timeout.

use leptos::prelude::*;

use crate::context::use_board_context;
use crate::models::NoticeKind;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeToast() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_board_context();

    view! {
        {move || store.notice().get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Info => "notice-toast info",
                NoticeKind::Error => "notice-toast error",
            };
            view! {
                <div class=class role="status">
                    <span class="notice-message">{notice.message}</span>
                    <button class="notice-close" on:click=move |_| ctx.dismiss_notice()>"×"</button>
                </div>
            }
        })}
    }
}
