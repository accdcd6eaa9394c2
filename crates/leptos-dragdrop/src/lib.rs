//! Leptos DragDrop Utilities
//!
//! Pointer-driven drag and drop for Leptos using mouse events.
//! A movement threshold distinguishes click from drag; the drop target is
//! chosen by nearest-corners collision among registered droppables.
//!
//! The item key `K` is whatever the application drags (an enum of entity
//! ids, typically). [`DndContext`] is `Copy` and can be handed to every
//! component that needs it.

pub mod collision;
pub mod geometry;
pub mod session;

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub use collision::{closest_corners, sort_by_layout, Droppable};
pub use geometry::{Point, Rect};
pub use session::{DragConfig, DragEnd, DragPhase, DragSession};

/// How long `drag_just_ended` stays set, so the click that follows a drop is
/// not treated as a click on the item.
const CLICK_SUPPRESS_MS: i32 = 100;

/// DnD state shared by draggables, droppables and the global listeners.
pub struct DndContext<K: Send + Sync + 'static> {
    session: StoredValue<DragSession<K>, LocalStorage>,
    droppables: StoredValue<Vec<(K, NodeRef<Div>)>, LocalStorage>,
    /// Item being dragged
    pub active: RwSignal<Option<K>>,
    /// Current drop target
    pub over: RwSignal<Option<K>>,
    /// Pointer travel since the press, for rendering the dragged item
    pub offset: RwSignal<(f64, f64)>,
    pub drag_just_ended: RwSignal<bool>,
}

impl<K: Send + Sync + 'static> Clone for DndContext<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for DndContext<K> {}

impl<K> DndContext<K>
where
    K: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    pub fn new(config: DragConfig) -> Self {
        Self {
            session: StoredValue::new_local(DragSession::new(config)),
            droppables: StoredValue::new_local(Vec::new()),
            active: RwSignal::new(None),
            over: RwSignal::new(None),
            offset: RwSignal::new((0.0, 0.0)),
            drag_just_ended: RwSignal::new(false),
        }
    }

    /// Register an element as a drop target for as long as the calling
    /// component lives.
    pub fn register_droppable(&self, id: K, node: NodeRef<Div>) {
        let droppables = self.droppables;
        droppables.update_value(|list| {
            list.retain(|(existing, _)| existing != &id);
            list.push((id.clone(), node));
        });
        on_cleanup(move || {
            droppables.update_value(|list| list.retain(|(existing, _)| existing != &id));
        });
    }

    pub fn is_dragging(&self, id: &K) -> bool {
        self.active.with(|active| active.as_ref() == Some(id))
    }

    pub fn is_over(&self, id: &K) -> bool {
        self.over.with(|over| over.as_ref() == Some(id))
    }

    /// Abort a drag in progress, e.g. when the board unmounts.
    pub fn cancel(&self) -> Option<DragEnd<K>> {
        let mut end = None;
        self.session.update_value(|session| end = session.cancel());
        if end.is_some() {
            self.reset();
        }
        end
    }

    fn reset(&self) {
        self.active.set(None);
        self.over.set(None);
        self.offset.set((0.0, 0.0));
    }

    fn mark_just_ended(&self) {
        self.drag_just_ended.set(true);
        if let Some(win) = web_sys::window() {
            let clear = self.drag_just_ended;
            let cb = Closure::<dyn FnMut()>::new(move || {
                clear.set(false);
            });
            let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                CLICK_SUPPRESS_MS,
            );
            cb.forget();
        }
    }

    /// Rectangles of every registered droppable `accepts` allows, in layout
    /// order.
    fn candidates<A>(&self, active: &K, accepts: &A) -> Vec<Droppable<K>>
    where
        A: Fn(&K, &K) -> bool,
    {
        let mut candidates = self.droppables.with_value(|list| {
            list.iter()
                .filter(|(id, _)| id != active && accepts(active, id))
                .filter_map(|(id, node)| {
                    let el = node.get_untracked()?;
                    Some(Droppable {
                        id: id.clone(),
                        rect: Rect::from_dom(&el.get_bounding_client_rect()),
                    })
                })
                .collect::<Vec<_>>()
        });
        sort_by_layout(&mut candidates);
        candidates
    }
}

/// Create mousedown handler for a draggable item.
/// Records a pending drag with the start position and the item's rectangle.
pub fn make_on_mousedown<K>(dnd: DndContext<K>, item: K) -> impl Fn(web_sys::MouseEvent) + 'static
where
    K: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is a form control
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
            {
                return;
            }
        }
        let Some(el) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        // nested draggables: the innermost one wins
        ev.stop_propagation();
        let rect = Rect::from_dom(&el.get_bounding_client_rect());
        let origin = Point::new(ev.client_x() as f64, ev.client_y() as f64);
        let item = item.clone();
        dnd.session.update_value(|session| session.press(item, origin, rect));
    }
}

/// Bind document-level mousemove, mouseup and Escape handlers.
///
/// `accepts(active, candidate)` decides which droppables a given drag may
/// land on. `on_end` receives every finished drag, dropped or cancelled.
pub fn bind_global_listeners<K, A, F>(dnd: DndContext<K>, accepts: A, on_end: F)
where
    K: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
    A: Fn(&K, &K) -> bool + 'static,
    F: Fn(DragEnd<K>) + Clone + 'static,
{
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pointer = Point::new(ev.client_x() as f64, ev.client_y() as f64);
        let mut started = false;
        dnd.session.update_value(|session| started = session.pointer_move(pointer));

        let Some((active, rect, offset)) = dnd.session.with_value(|session| {
            Some((session.active()?.clone(), session.active_rect()?, session.offset()?))
        }) else {
            return;
        };
        if started {
            log::debug!("[dnd] drag started: {:?}", active);
            dnd.active.set(Some(active.clone()));
        }
        dnd.offset.set(offset);

        let candidates = dnd.candidates(&active, &accepts);
        let target = closest_corners(&rect, &candidates).cloned();
        if dnd.over.with_untracked(|over| over != &target) {
            dnd.session.update_value(|session| session.set_over(target.clone()));
            dnd.over.set(target);
        }
    });

    let end_mouseup = on_end.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let mut end = None;
        dnd.session.update_value(|session| end = session.release());
        // Not dragging - the click event will fire naturally on the element
        let Some(end) = end else {
            return;
        };
        log::debug!("[dnd] drag ended: {:?}", end);
        dnd.reset();
        dnd.mark_just_ended();
        end_mouseup(end);
    });

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        if let Some(end) = dnd.cancel() {
            log::debug!("[dnd] drag cancelled by Escape: {:?}", end);
            on_end(end);
        }
    });

    let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    on_mousemove.forget();
    on_mouseup.forget();
    on_keydown.forget();
}
