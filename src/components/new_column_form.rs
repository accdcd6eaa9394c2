//! New Column Form Component
//!
//! Appends a column to the end of the open board.

use leptos::prelude::*;

use crate::context::use_board_context;
use crate::models::NewColumn;

#[component]
pub fn NewColumnForm() -> impl IntoView {
    let ctx = use_board_context();

    let (title, set_title) = signal(String::new());
    let (wip_limit, set_wip_limit) = signal(String::new());

    let create_column = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() { return; }
        // unparseable limits become 0, which validation rejects
        let limit = wip_limit.get();
        let limit = limit.trim();
        let wip_limit = if limit.is_empty() {
            None
        } else {
            Some(limit.parse::<i64>().unwrap_or(0))
        };
        ctx.create_column(NewColumn {
            title: text,
            wip_limit,
            ..Default::default()
        });
        set_title.set(String::new());
        set_wip_limit.set(String::new());
    };

    view! {
        <form class="new-column-form" on:submit=create_column>
            <input
                type="text"
                placeholder="New column..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <input
                type="number"
                class="wip-input"
                min="1"
                placeholder="WIP"
                prop:value=move || wip_limit.get()
                on:input=move |ev| set_wip_limit.set(event_target_value(&ev))
            />
            <button type="submit">"Add column"</button>
        </form>
    }
}
