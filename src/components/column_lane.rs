//! Column Lane Component
//!
//! One column of the board: a draggable header, its cards in order, the
//! append slot and the new card form.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_dragdrop::make_on_mousedown;

use crate::components::{CardTile, ContainerSlot, DeleteConfirmButton, NewCardForm};
use crate::context::use_board_context;
use crate::models::{ColumnId, ColumnView, DragItem};

#[component]
pub fn ColumnLane(column_id: ColumnId, lane: Memo<Option<ColumnView>>) -> impl IntoView {
    let ctx = use_board_context();
    let dnd = ctx.dnd;

    let item = DragItem::Column(column_id.clone());
    let node = NodeRef::<Div>::new();
    dnd.register_droppable(item.clone(), node);
    let on_mousedown = make_on_mousedown(dnd, item.clone());

    let lane_class = {
        let item = item.clone();
        move || {
            let mut c = String::from("column-lane");
            if dnd.is_dragging(&item) { c.push_str(" dragging"); }
            if dnd.is_over(&item) { c.push_str(" drop-target"); }
            if lane.with(|l| l.as_ref().is_some_and(|l| l.over_limit)) { c.push_str(" over-limit"); }
            c
        }
    };
    let lane_style = {
        let item = item.clone();
        move || {
            let mut style = lane
                .with(|l| l.as_ref().and_then(|l| l.column.color.clone()))
                .map(|color| format!("border-top-color: {};", color))
                .unwrap_or_default();
            if dnd.is_dragging(&item) {
                let (dx, dy) = dnd.offset.get();
                style.push_str(&format!("transform: translate({}px, {}px);", dx, dy));
            }
            style
        }
    };

    let title = move || lane.with(|l| l.as_ref().map(|l| l.column.title.clone()).unwrap_or_default());
    let icon = move || lane.with(|l| l.as_ref().map(|l| l.column.icon_or_default().to_string()).unwrap_or_default());
    let count = move || {
        lane.with(|l| match l {
            Some(l) => match l.column.wip_limit {
                Some(limit) => format!("{}/{}", l.cards.len(), limit),
                None => l.cards.len().to_string(),
            },
            None => String::new(),
        })
    };
    let card_ids = move || lane.with(|l| l.as_ref().map(|l| l.cards.iter().map(|c| c.id.clone()).collect::<Vec<_>>()).unwrap_or_default());

    let hide_id = column_id.clone();
    let delete_id = column_id.clone();

    view! {
        <section class=lane_class style=lane_style node_ref=node>
            <header class="column-header" on:mousedown=on_mousedown>
                <span class="column-icon" data-icon=icon />
                <span class="column-title">{title}</span>
                <span class="column-count">{count}</span>
                <button
                    class="column-hide-btn"
                    title="Hide column"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.set_column_enabled(hide_id.clone(), false);
                    }
                >
                    "–"
                </button>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    on_confirm=move |_| ctx.delete_column(delete_id.clone())
                />
            </header>

            <div class="column-cards">
                <For
                    each=card_ids
                    key=|id| id.clone()
                    children=move |card_id| {
                        let card = Memo::new(move |_| {
                            lane.with(|l| l.as_ref().and_then(|l| l.cards.iter().find(|c| c.id == card_id).cloned()))
                        });
                        view! { <CardTile card=card /> }
                    }
                />
                <ContainerSlot column_id=column_id.clone() />
            </div>

            <NewCardForm column_id=column_id.clone() />
        </section>
    }
}
