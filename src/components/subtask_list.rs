//! Subtask List Component
//!
//! Checklist inside the card editor.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_board_context;
use crate::models::{Card, NewSubtask, Subtask, SubtaskUpdate};

#[component]
pub fn SubtaskList(card: Memo<Option<Card>>) -> impl IntoView {
    let ctx = use_board_context();
    let (title, set_title) = signal(String::new());

    let subtasks = Memo::new(move |_| card.with(|c| c.as_ref().map(|c| c.subtasks.clone()).unwrap_or_default()));

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() { return; }
        let Some(card_id) = card.with_untracked(|c| c.as_ref().map(|c| c.id.clone())) else { return };
        ctx.create_subtask(NewSubtask::new(card_id, text));
        set_title.set(String::new());
    };

    view! {
        <div class="subtask-list">
            <For
                each=move || subtasks.get()
                // rows rebuild on any change so their captured fields stay current
                key=|s| (s.id.clone(), s.position, s.is_completed, s.title.clone())
                children=move |subtask: Subtask| {
                    let Subtask { id, board_id, card_id, title, is_completed, position } = subtask;
                    let base = SubtaskUpdate::new(board_id, card_id.clone(), id.clone());
                    let toggle = {
                        let base = base.clone();
                        move |_| {
                            let mut update = base.clone();
                            update.is_completed = Some(!is_completed);
                            ctx.update_subtask(update);
                        }
                    };
                    let shift = move |step: i64| {
                        let mut update = base.clone();
                        update.target_position = Some(position + step);
                        ctx.update_subtask(update);
                    };
                    let shift_up = shift.clone();

                    view! {
                        <div class=if is_completed { "subtask done" } else { "subtask" }>
                            <input type="checkbox" prop:checked=is_completed on:change=toggle />
                            <span class="subtask-title">{title}</span>
                            <button type="button" class="subtask-move" on:click=move |_| shift_up(-1)>"↑"</button>
                            <button type="button" class="subtask-move" on:click=move |_| shift(1)>"↓"</button>
                            <DeleteConfirmButton
                                button_class="subtask-delete-btn"
                                on_confirm=move |_| ctx.delete_subtask(card_id.clone(), id.clone())
                            />
                        </div>
                    }
                }
            />
            <form class="subtask-add-form" on:submit=on_add>
                <input
                    type="text"
                    placeholder="Add subtask..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
        </div>
    }
}
