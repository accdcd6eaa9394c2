//! Card Tile Component
//!
//! A single card in a column lane: draggable, a drop target for other
//! cards, and an inline editor for priority, tags and subtasks.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_dragdrop::make_on_mousedown;

use crate::components::{DeleteConfirmButton, PrioritySelector, SubtaskList};
use crate::context::use_board_context;
use crate::models::{Card, CardUpdate, DragItem, TagId};
use crate::store::{store_find_tag, use_app_store, AppStateStoreFields};

#[component]
pub fn CardTile(card: Memo<Option<Card>>) -> impl IntoView {
    let ctx = use_board_context();
    let store = use_app_store();
    let dnd = ctx.dnd;

    let Some(initial) = card.get_untracked() else {
        return ().into_any();
    };
    let card_id = initial.id.clone();
    let board_id = initial.board_id.clone();
    let item = DragItem::Card(card_id.clone());

    let node = NodeRef::<Div>::new();
    dnd.register_droppable(item.clone(), node);
    let on_mousedown = make_on_mousedown(dnd, item.clone());

    let (editing, set_editing) = signal(false);

    let tile_class = {
        let item = item.clone();
        move || {
            let mut c = String::from("card-tile");
            if dnd.is_dragging(&item) { c.push_str(" dragging"); }
            if dnd.is_over(&item) { c.push_str(" drop-target"); }
            c
        }
    };
    let tile_style = {
        let item = item.clone();
        move || {
            if dnd.is_dragging(&item) {
                let (dx, dy) = dnd.offset.get();
                format!("transform: translate({}px, {}px);", dx, dy)
            } else {
                String::new()
            }
        }
    };

    let priority = Signal::derive(move || card.with(|c| c.as_ref().map(|c| c.priority).unwrap_or_default()));
    let on_priority = {
        let card_id = card_id.clone();
        let board_id = board_id.clone();
        Callback::new(move |priority| {
            let mut update = CardUpdate::new(board_id.clone(), card_id.clone());
            update.priority = Some(priority);
            ctx.update_card(update);
        })
    };

    let toggle_tag = {
        let card_id = card_id.clone();
        move |tag_id: TagId| {
            let Some(current) = card.get_untracked() else { return };
            let mut tag_ids = current.tag_ids.clone();
            if current.has_tag(&tag_id) {
                tag_ids.retain(|id| id != &tag_id);
            } else {
                tag_ids.push(tag_id);
            }
            ctx.set_card_tags(card_id.clone(), tag_ids);
        }
    };

    let delete_id = card_id.clone();

    view! {
        <div
            class=tile_class
            style=tile_style
            node_ref=node
            on:mousedown=on_mousedown
            on:click=move |_| {
                if !dnd.drag_just_ended.get_untracked() {
                    set_editing.update(|e| *e = !*e);
                }
            }
        >
            <div class="card-header">
                <span class=move || format!("priority-dot priority-{}", priority.get().as_str()) />
                <span class="card-title">{move || card.with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default())}</span>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    on_confirm=move |_| ctx.delete_card(delete_id.clone())
                />
            </div>

            {move || card.with(|c| c.as_ref().and_then(|c| c.due_date.clone())).map(|due| view! {
                <div class="card-due">{due}</div>
            })}

            {move || card.with(|c| c.as_ref().filter(|c| !c.subtasks.is_empty()).map(|c| {
                let done = c.subtasks.iter().filter(|s| s.is_completed).count();
                format!("{}/{}", done, c.subtasks.len())
            })).map(|progress| view! {
                <div class="card-subtask-progress">{progress}</div>
            })}

            <div class="card-tags">
                {move || card.get().map(|c| c.tag_ids).unwrap_or_default().into_iter().filter_map(|tag_id| {
                    store_find_tag(&store, &tag_id).map(|tag| {
                        let color = tag.color.clone().unwrap_or_else(|| "#666".to_string());
                        view! {
                            <span class="tag-chip" style=format!("background-color: {};", color)>{tag.label}</span>
                        }
                    })
                }).collect_view()}
            </div>

            <Show when=move || editing.get()>
                <div class="card-editor" on:click=|ev| ev.stop_propagation()>
                    <PrioritySelector current=priority on_change=on_priority />
                    <div class="card-tag-toggles">
                        {
                            let toggle_tag = toggle_tag.clone();
                            move || {
                                let toggle_tag = toggle_tag.clone();
                                store.tags().get().into_iter().map(move |tag| {
                                    let tag_id = tag.id.clone();
                                    let has = {
                                        let tag_id = tag_id.clone();
                                        move || card.with(|c| c.as_ref().is_some_and(|c| c.has_tag(&tag_id)))
                                    };
                                    let toggle_tag = toggle_tag.clone();
                                    view! {
                                        <button
                                            type="button"
                                            class=move || if has() { "tag-toggle active" } else { "tag-toggle" }
                                            on:click=move |_| toggle_tag(tag_id.clone())
                                        >
                                            {tag.label.clone()}
                                        </button>
                                    }
                                }).collect_view()
                            }
                        }
                    </div>
                    <SubtaskList card=card />
                </div>
            </Show>
        </div>
    }
    .into_any()
}
