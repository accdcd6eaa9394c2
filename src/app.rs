//! Modulo Frontend App
//!
//! Board picker on top, the open board below, notices in the corner.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{BoardPicker, BoardView, NoticeToast};
use crate::context::BoardContext;
use crate::models::DragItem;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let ctx = BoardContext::new(store);
    provide_context(ctx);

    leptos_dragdrop::bind_global_listeners(
        ctx.dnd,
        |active: &DragItem, candidate: &DragItem| active.accepts(candidate),
        move |end| ctx.handle_drag_end(end),
    );

    ctx.load_boards();

    view! {
        <div class="app-layout">
            <BoardPicker />

            <main class="main-content">
                {move || {
                    if let Some(err) = store.load_error().get() {
                        view! {
                            <div class="load-error">
                                <p>"Could not load this board."</p>
                                <p class="load-error-detail">{err}</p>
                                <button on:click=move |_| ctx.retry_load()>"Retry"</button>
                            </div>
                        }.into_any()
                    } else if store.loading().get() {
                        view! { <p class="loading">"Loading..."</p> }.into_any()
                    } else if store.board().with(|b| b.is_some()) {
                        view! { <BoardView /> }.into_any()
                    } else {
                        view! { <p class="empty-state">"Create a board to get started."</p> }.into_any()
                    }
                }}
            </main>

            <NoticeToast />
        </div>
    }
}
