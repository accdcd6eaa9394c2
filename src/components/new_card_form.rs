//! New Card Form Component
//!
//! Form for appending a card to a column, with a priority selector.

use leptos::prelude::*;

use crate::components::PrioritySelector;
use crate::context::use_board_context;
use crate::models::{ColumnId, NewCard, Priority};

#[component]
pub fn NewCardForm(column_id: ColumnId) -> impl IntoView {
    let ctx = use_board_context();

    let (new_title, set_new_title) = signal(String::new());
    let (priority, set_priority) = signal(Priority::default());
    let (open, set_open) = signal(false);

    let create_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get();
        if title.trim().is_empty() { return; }
        let mut input = NewCard::new(column_id.clone(), title);
        input.priority = priority.get();
        ctx.create_card(input);
        set_new_title.set(String::new());
        set_priority.set(Priority::default());
    };

    view! {
        <Show
            when=move || open.get()
            fallback=move || view! {
                <button class="add-card-btn" on:click=move |_| set_open.set(true)>"+ Add card"</button>
            }
        >
            <form class="new-card-form" on:submit=create_card.clone()>
                <div class="new-card-row">
                    <input
                        type="text"
                        placeholder="Card title..."
                        prop:value=move || new_title.get()
                        on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    />
                    <button type="submit">"Add"</button>
                    <button type="button" class="cancel-btn" on:click=move |_| set_open.set(false)>"×"</button>
                </div>
                <PrioritySelector
                    current=Signal::from(priority)
                    on_change=move |p| set_priority.set(p)
                />
            </form>
        </Show>
    }
}
