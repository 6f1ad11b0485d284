//! Drag interaction engine: gestures in, move intents out

pub mod collision;
pub mod engine;
pub mod geometry;
pub mod intent;
pub mod sensor;

pub use collision::{CollisionStrategy, Droppable};
pub use engine::{
    Direction, DragContextConfig, DragContextKind, DragEngine, DragLayout, DragState, GestureEvent,
};
pub use geometry::{Point, Rect};
pub use intent::{resolve_drop, DragEnd, DropTarget, MoveIntent, ScopeId, ScopeList, SortableLayout};
pub use sensor::{Activation, ActivationConstraint, PendingActivation};
