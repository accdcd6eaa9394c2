//! Board View Component
//!
//! Renders the open board's enabled columns left to right, the hidden
//! column shelf, the tag bar and the new column form.

use leptos::prelude::*;

use crate::components::{ColumnLane, NewColumnForm, TagBar};
use crate::context::use_board_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardView() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_board_context();

    let column_ids = move || {
        store.board().with(|b| {
            b.as_ref()
                .map(|b| b.columns.iter().map(|c| c.column.id.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };
    let hidden = move || store.board().with(|b| b.as_ref().map(|b| b.hidden_columns.clone()).unwrap_or_default());

    view! {
        <div class="board-view">
            <TagBar />

            <Show when=move || !hidden().is_empty()>
                <div class="hidden-columns">
                    <span class="hidden-columns-label">"Hidden:"</span>
                    {move || hidden().into_iter().map(|column| {
                        let id = column.id.clone();
                        view! {
                            <button class="hidden-column-btn" on:click=move |_| ctx.set_column_enabled(id.clone(), true)>
                                {column.title.clone()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </Show>

            <div class="board-columns">
                <For
                    each=column_ids
                    key=|id| id.clone()
                    children=move |column_id| {
                        let lookup = column_id.clone();
                        let lane = Memo::new(move |_| {
                            store.board().with(|b| {
                                b.as_ref().and_then(|b| b.columns.iter().find(|c| c.column.id == lookup).cloned())
                            })
                        });
                        view! { <ColumnLane column_id=column_id lane=lane /> }
                    }
                />
                <NewColumnForm />
            </div>
        </div>
    }
}
