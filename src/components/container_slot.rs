//! Container Slot Component
//!
//! The empty tail of a column lane. Dropping a card here appends it.

use leptos::html::Div;
use leptos::prelude::*;

use crate::context::use_board_context;
use crate::models::{ColumnId, DragItem};

#[component]
pub fn ContainerSlot(column_id: ColumnId) -> impl IntoView {
    let ctx = use_board_context();
    let dnd = ctx.dnd;
    let node = NodeRef::<Div>::new();
    let item = DragItem::ContainerSlot(column_id);
    dnd.register_droppable(item.clone(), node);

    // Only highlighted while a card is dragged
    let is_dragging_card = move || dnd.active.with(|a| a.as_ref().is_some_and(DragItem::is_card));
    let slot_class = move || {
        let mut c = String::from("container-slot");
        if is_dragging_card() { c.push_str(" visible"); }
        if dnd.is_over(&item) { c.push_str(" active"); }
        c
    };

    view! { <div class=slot_class node_ref=node /> }
}
