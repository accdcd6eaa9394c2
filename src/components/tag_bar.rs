//! Tag Bar Component
//!
//! The open board's tags with an add input. Double-click a tag to rename it.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_board_context;
use crate::models::{NewTag, TagId};
use crate::store::{use_app_store, AppStateStoreFields};

/// Tag add input
#[component]
fn TagAddInput() -> impl IntoView {
    let ctx = use_board_context();

    let (label, set_label) = signal(String::new());
    let (color, set_color) = signal(String::from("#6B7280"));

    let add_tag = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = label.get();
        if text.trim().is_empty() { return; }
        ctx.create_tag(NewTag {
            label: text,
            color: Some(color.get()),
        });
        set_label.set(String::new());
    };

    view! {
        <form class="tag-add-form" on:submit=add_tag>
            <input
                type="text"
                placeholder="Add tag..."
                prop:value=move || label.get()
                on:input=move |ev| set_label.set(event_target_value(&ev))
            />
            <input
                type="color"
                prop:value=move || color.get()
                on:input=move |ev| set_color.set(event_target_value(&ev))
            />
            <button type="submit">"+"</button>
        </form>
    }
}

#[component]
pub fn TagBar() -> impl IntoView {
    let ctx = use_board_context();
    let store = use_app_store();
    let (renaming, set_renaming) = signal(None::<TagId>);
    let (rename_label, set_rename_label) = signal(String::new());

    let on_rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let label = rename_label.get();
        if let Some(tag_id) = renaming.get() {
            if !label.trim().is_empty() {
                ctx.rename_tag(tag_id, label);
            }
        }
        set_renaming.set(None);
    };

    view! {
        <div class="tag-bar">
            <For
                each=move || store.tags().get()
                key=|tag| (tag.id.clone(), tag.label.clone(), tag.color.clone())
                children=move |tag| {
                    let tag_id = tag.id.clone();
                    let is_renaming = {
                        let tag_id = tag_id.clone();
                        move || renaming.get().as_ref() == Some(&tag_id)
                    };
                    let color = tag.color.clone().unwrap_or_else(|| "#666".to_string());
                    let label = tag.label.clone();
                    let delete_id = tag_id.clone();
                    view! {
                        <span class="tag-chip" style=format!("background-color: {};", color)>
                            {move || if is_renaming() {
                                view! {
                                    <form class="tag-rename-form" on:submit=on_rename>
                                        <input
                                            type="text"
                                            prop:value=move || rename_label.get()
                                            on:input=move |ev| set_rename_label.set(event_target_value(&ev))
                                        />
                                    </form>
                                }.into_any()
                            } else {
                                let tag_id = tag_id.clone();
                                let label = label.clone();
                                let rename_from = label.clone();
                                view! {
                                    <span
                                        class="tag-label"
                                        on:dblclick=move |_| {
                                            set_rename_label.set(rename_from.clone());
                                            set_renaming.set(Some(tag_id.clone()));
                                        }
                                    >
                                        {label}
                                    </span>
                                }.into_any()
                            }}
                            <DeleteConfirmButton
                                button_class="tag-delete-btn"
                                on_confirm=move |_| ctx.delete_tag(delete_id.clone())
                            />
                        </span>
                    }
                }
            />
            <TagAddInput />
        </div>
    }
}
