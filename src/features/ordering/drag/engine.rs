//! Gesture state machine for one drag context
//!
//! Raw pointer, touch and keyboard events go in; at most one [`DragEnd`]
//! per gesture comes out, on release or keyboard drop. Live movement only
//! updates the tracked drop target.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::collision::{CollisionStrategy, Droppable};
use super::geometry::Point;
use super::intent::{DragEnd, DropTarget, ScopeId, SortableLayout};
use super::sensor::{Activation, ActivationConstraint, PendingActivation};
use crate::core::config::OrderingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragContextKind {
    Categories,
    Products,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContextConfig {
    pub kind: DragContextKind,
    pub strategy: CollisionStrategy,
    pub pointer: ActivationConstraint,
    pub touch: ActivationConstraint,
}

impl DragContextConfig {
    pub fn categories(config: &OrderingConfig) -> Self {
        Self::new(DragContextKind::Categories, CollisionStrategy::ClosestCenter, config)
    }

    pub fn products(config: &OrderingConfig) -> Self {
        Self::new(DragContextKind::Products, CollisionStrategy::RectIntersection, config)
    }

    fn new(kind: DragContextKind, strategy: CollisionStrategy, config: &OrderingConfig) -> Self {
        Self {
            kind,
            strategy,
            pointer: ActivationConstraint::Distance {
                distance: config.pointer_activation_distance,
            },
            touch: ActivationConstraint::Delay {
                delay: config.touch_activation_delay,
                tolerance: config.touch_activation_tolerance,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerDown { item: Uuid, position: Point, at_ms: u64 },
    TouchStart { item: Uuid, position: Point, at_ms: u64 },
    Move { position: Point, at_ms: u64 },
    Release { position: Point, at_ms: u64 },
    Cancel,
    KeyActivate { item: Uuid },
    KeyStep(Direction),
    KeyDrop,
    KeyCancel,
}

/// Measured positions of the context's sortable members and drop regions
#[derive(Debug, Clone, PartialEq)]
pub struct DragLayout {
    pub sortable: SortableLayout,
    pub droppables: Vec<Droppable>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    Pending {
        active: Uuid,
        activation: PendingActivation,
    },
    Dragging {
        active: Uuid,
        origin: Point,
        over: Option<DropTarget>,
    },
    KeyboardDragging {
        active: Uuid,
        slot: usize,
    },
    /// Dropped. One engine serves one gesture, so later events are ignored.
    Settling,
}

pub struct DragEngine {
    config: DragContextConfig,
    state: DragState,
}

impl DragEngine {
    pub fn new(config: DragContextConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Feed events until the first drop; later events are ignored
    pub fn replay(&mut self, events: &[GestureEvent], layout: &DragLayout) -> Option<DragEnd> {
        events.iter().find_map(|event| self.handle(*event, layout))
    }

    pub fn handle(&mut self, event: GestureEvent, layout: &DragLayout) -> Option<DragEnd> {
        let state = std::mem::replace(&mut self.state, DragState::Idle);

        let (next, end) = match (state, event) {
            (DragState::Settling, _) => (DragState::Settling, None),

            (DragState::Idle, GestureEvent::PointerDown { item, position, at_ms }) => {
                (self.start(item, self.config.pointer, position, at_ms, layout), None)
            }
            (DragState::Idle, GestureEvent::TouchStart { item, position, at_ms }) => {
                (self.start(item, self.config.touch, position, at_ms, layout), None)
            }
            (DragState::Idle, GestureEvent::KeyActivate { item }) => {
                let state = keyboard_slots(&layout.sortable, item)
                    .iter()
                    .position(|slot| *slot == DropTarget::Item(item))
                    .map(|slot| DragState::KeyboardDragging { active: item, slot })
                    .unwrap_or(DragState::Idle);
                (state, None)
            }

            (DragState::Pending { active, activation }, GestureEvent::Move { position, at_ms }) => {
                match activation.on_move(position, at_ms) {
                    Activation::Pending => (DragState::Pending { active, activation }, None),
                    Activation::Aborted => (DragState::Idle, None),
                    Activation::Activated => {
                        let over = self.detect(active, activation.origin(), position, layout);
                        (
                            DragState::Dragging {
                                active,
                                origin: activation.origin(),
                                over,
                            },
                            None,
                        )
                    }
                }
            }
            (DragState::Pending { active, activation }, GestureEvent::Release { position, at_ms }) => {
                match activation.on_release(at_ms) {
                    Activation::Activated => {
                        let over = self.detect(active, activation.origin(), position, layout);
                        (DragState::Settling, Some(DragEnd { active, over }))
                    }
                    _ => (DragState::Idle, None),
                }
            }

            (DragState::Dragging { active, origin, .. }, GestureEvent::Move { position, .. }) => {
                let over = self.detect(active, origin, position, layout);
                (DragState::Dragging { active, origin, over }, None)
            }
            (DragState::Dragging { active, origin, .. }, GestureEvent::Release { position, .. }) => {
                let over = self.detect(active, origin, position, layout);
                (DragState::Settling, Some(DragEnd { active, over }))
            }

            (DragState::KeyboardDragging { active, slot }, GestureEvent::KeyStep(direction)) => {
                let last = keyboard_slots(&layout.sortable, active).len().saturating_sub(1);
                let slot = match direction {
                    Direction::Up => slot.saturating_sub(1),
                    Direction::Down => (slot + 1).min(last),
                };
                (DragState::KeyboardDragging { active, slot }, None)
            }
            (DragState::KeyboardDragging { active, slot }, GestureEvent::KeyDrop) => {
                let over = keyboard_slots(&layout.sortable, active).get(slot).copied();
                (DragState::Settling, Some(DragEnd { active, over }))
            }

            // Either kind of cancel aborts whichever gesture is in progress
            (
                DragState::Pending { .. }
                | DragState::Dragging { .. }
                | DragState::KeyboardDragging { .. },
                GestureEvent::Cancel | GestureEvent::KeyCancel,
            ) => (DragState::Idle, None),

            // Anything else leaves the gesture where it was
            (state, _) => (state, None),
        };

        self.state = next;
        end
    }

    fn start(
        &self,
        item: Uuid,
        constraint: ActivationConstraint,
        position: Point,
        at_ms: u64,
        layout: &DragLayout,
    ) -> DragState {
        if layout.sortable.locate(item).is_none() {
            return DragState::Idle;
        }

        let (activation, outcome) = PendingActivation::start(constraint, position, at_ms);
        match outcome {
            Activation::Activated => DragState::Dragging {
                active: item,
                origin: position,
                over: self.detect(item, position, position, layout),
            },
            _ => DragState::Pending {
                active: item,
                activation,
            },
        }
    }

    /// Drop target under the dragged item's rectangle moved by the pointer delta
    fn detect(
        &self,
        active: Uuid,
        origin: Point,
        position: Point,
        layout: &DragLayout,
    ) -> Option<DropTarget> {
        let rect = layout
            .droppables
            .iter()
            .find(|d| d.target == DropTarget::Item(active))?
            .rect
            .translate(position.x - origin.x, position.y - origin.y);

        let candidates: Vec<Droppable> = layout
            .droppables
            .iter()
            .filter(|d| match self.config.kind {
                DragContextKind::Categories => matches!(d.target, DropTarget::Item(_)),
                DragContextKind::Products => true,
            })
            .cloned()
            .collect();

        self.config.strategy.detect(&rect, &candidates)
    }
}

/// Keyboard positions for `active` in visual order.
///
/// The active item's own list offers its members. Every other category
/// offers its members followed by its container, so stepping into a list
/// from below lands at its end and an empty category is one slot.
fn keyboard_slots(layout: &SortableLayout, active: Uuid) -> Vec<DropTarget> {
    layout
        .lists
        .iter()
        .flat_map(|list| {
            let members = list.items.iter().map(|id| DropTarget::Item(*id));
            match list.scope {
                ScopeId::Category(_) if !list.items.contains(&active) => members
                    .chain(std::iter::once(DropTarget::Container(list.scope)))
                    .collect::<Vec<_>>(),
                _ => members.collect(),
            }
        })
        .collect()
}
