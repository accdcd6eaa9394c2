//! Board Picker Component
//!
//! Tab bar for switching between boards, with inline create, rename and
//! delete.

use leptos::prelude::*;

use crate::context::use_board_context;
use crate::models::BoardId;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::components::DeleteConfirmButton;

/// Board Picker component
#[component]
pub fn BoardPicker() -> impl IntoView {
    let ctx = use_board_context();
    let store = use_app_store();
    let (adding, set_adding) = signal(false);
    let (new_title, set_new_title) = signal(String::new());
    let (renaming, set_renaming) = signal(None::<BoardId>);
    let (rename_title, set_rename_title) = signal(String::new());

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get();
        if title.trim().is_empty() { return; }
        ctx.create_board(title);
        set_new_title.set(String::new());
        set_adding.set(false);
    };

    let on_rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(board_id) = renaming.get() {
            ctx.rename_board(board_id, rename_title.get());
        }
        set_renaming.set(None);
    };

    view! {
        <nav class="board-picker">
            <For
                each=move || store.boards().get()
                key=|board| (board.id.clone(), board.title.clone())
                children=move |board| {
                    let id = board.id.clone();
                    let is_active = {
                        let id = id.clone();
                        move || store.current_board().get().as_ref() == Some(&id)
                    };
                    let is_renaming = {
                        let id = id.clone();
                        move || renaming.get().as_ref() == Some(&id)
                    };
                    let open_id = id.clone();
                    let rename_id = id.clone();
                    let delete_id = id.clone();
                    let title = board.title.clone();

                    view! {
                        <div class=move || if is_active() { "board-tab active" } else { "board-tab" }>
                            {move || if is_renaming() {
                                view! {
                                    <form class="board-rename-form" on:submit=on_rename>
                                        <input
                                            type="text"
                                            prop:value=move || rename_title.get()
                                            on:input=move |ev| set_rename_title.set(event_target_value(&ev))
                                        />
                                        <button type="submit">"✓"</button>
                                    </form>
                                }.into_any()
                            } else {
                                let open_id = open_id.clone();
                                let rename_id = rename_id.clone();
                                let title = title.clone();
                                let rename_from = title.clone();
                                view! {
                                    <button
                                        class="board-tab-title"
                                        on:click=move |_| ctx.open_board(open_id.clone())
                                        on:dblclick=move |_| {
                                            set_rename_title.set(rename_from.clone());
                                            set_renaming.set(Some(rename_id.clone()));
                                        }
                                    >
                                        {title}
                                    </button>
                                }.into_any()
                            }}
                            <DeleteConfirmButton
                                button_class="board-delete-btn"
                                prompt="Delete board and all its cards?"
                                on_confirm=move |_| ctx.delete_board(delete_id.clone())
                            />
                        </div>
                    }
                }
            />

            {move || if adding.get() {
                view! {
                    <form class="board-add-form" on:submit=on_add>
                        <input
                            type="text"
                            placeholder="Board name"
                            prop:value=move || new_title.get()
                            on:input=move |ev| set_new_title.set(event_target_value(&ev))
                        />
                        <button type="submit">"+"</button>
                        <button type="button" on:click=move |_| set_adding.set(false)>"×"</button>
                    </form>
                }.into_any()
            } else {
                view! {
                    <button class="board-add-btn" on:click=move |_| set_adding.set(true)>
                        "+"
                    </button>
                }.into_any()
            }}
        </nav>
    }
}
