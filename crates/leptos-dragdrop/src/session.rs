//! Drag session state machine
//!
//! `Idle -> Pressed -> Dragging -> {Dropped, Cancelled} -> Idle`.
//!
//! A press only becomes a drag once the pointer has moved further than
//! [`DragConfig::activation_distance`]; releasing before that is a click and
//! ends nothing. The session knows nothing about the DOM.

use crate::geometry::{Point, Rect};

/// Movement in pixels needed after press before a drag starts
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    pub activation_distance: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragPhase<K> {
    Idle,
    Pressed {
        active: K,
        origin: Point,
        rect: Rect,
    },
    Dragging {
        active: K,
        origin: Point,
        rect: Rect,
        pointer: Point,
        over: Option<K>,
    },
}

/// How a drag finished.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEnd<K> {
    /// Released over a valid target.
    Dropped { active: K, over: K },
    /// Released over nothing, or cancelled explicitly.
    Cancelled { active: K },
}

#[derive(Clone, Debug)]
pub struct DragSession<K> {
    config: DragConfig,
    phase: DragPhase<K>,
}

impl<K: Clone + PartialEq> DragSession<K> {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            phase: DragPhase::Idle,
        }
    }

    pub fn phase(&self) -> &DragPhase<K> {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The dragged item, once activation distance was exceeded.
    pub fn active(&self) -> Option<&K> {
        match &self.phase {
            DragPhase::Dragging { active, .. } => Some(active),
            _ => None,
        }
    }

    pub fn over(&self) -> Option<&K> {
        match &self.phase {
            DragPhase::Dragging { over, .. } => over.as_ref(),
            _ => None,
        }
    }

    /// Pointer travel since the press, while dragging.
    pub fn offset(&self) -> Option<(f64, f64)> {
        match &self.phase {
            DragPhase::Dragging { origin, pointer, .. } => Some((pointer.x - origin.x, pointer.y - origin.y)),
            _ => None,
        }
    }

    /// The dragged element's rectangle moved along with the pointer.
    pub fn active_rect(&self) -> Option<Rect> {
        match &self.phase {
            DragPhase::Dragging {
                origin, rect, pointer, ..
            } => Some(rect.translate(pointer.x - origin.x, pointer.y - origin.y)),
            _ => None,
        }
    }

    /// Primary button went down on a draggable. Ignored mid-drag.
    pub fn press(&mut self, active: K, origin: Point, rect: Rect) {
        if self.is_dragging() {
            return;
        }
        self.phase = DragPhase::Pressed { active, origin, rect };
    }

    /// Track the pointer. Returns true when this move started the drag.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match &mut self.phase {
            DragPhase::Idle => false,
            DragPhase::Pressed { active, origin, rect } => {
                if origin.distance(&pointer) <= self.config.activation_distance {
                    return false;
                }
                self.phase = DragPhase::Dragging {
                    active: active.clone(),
                    origin: *origin,
                    rect: *rect,
                    pointer,
                    over: None,
                };
                true
            }
            DragPhase::Dragging { pointer: current, .. } => {
                *current = pointer;
                false
            }
        }
    }

    /// Record the hovered target. The active item never targets itself.
    pub fn set_over(&mut self, target: Option<K>) {
        if let DragPhase::Dragging { active, over, .. } = &mut self.phase {
            *over = target.filter(|t| t != active);
        }
    }

    /// Pointer released. `None` if no drag was in progress (a click).
    pub fn release(&mut self) -> Option<DragEnd<K>> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging {
                active, over: Some(over), ..
            } => Some(DragEnd::Dropped { active, over }),
            DragPhase::Dragging { active, over: None, .. } => Some(DragEnd::Cancelled { active }),
            DragPhase::Idle | DragPhase::Pressed { .. } => None,
        }
    }

    /// Escape key or unmount. `None` if no drag was in progress.
    pub fn cancel(&mut self) -> Option<DragEnd<K>> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging { active, .. } => Some(DragEnd::Cancelled { active }),
            DragPhase::Idle | DragPhase::Pressed { .. } => None,
        }
    }
}
