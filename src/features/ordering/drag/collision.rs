//! Collision detection between the dragged rectangle and drop targets

use super::geometry::Rect;
use super::intent::DropTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// Droppable whose center is nearest to the dragged rectangle's center
    ClosestCenter,
    /// Droppable with the largest overlap ratio (intersection over union);
    /// no overlap means no target
    RectIntersection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    pub target: DropTarget,
    pub rect: Rect,
}

impl CollisionStrategy {
    /// Pick the drop target under `dragged`, if any.
    ///
    /// Ties keep the earliest droppable in `droppables`.
    pub fn detect(&self, dragged: &Rect, droppables: &[Droppable]) -> Option<DropTarget> {
        match self {
            CollisionStrategy::ClosestCenter => {
                let center = dragged.center();
                droppables
                    .iter()
                    .map(|d| (d, center.distance_to(d.rect.center())))
                    .fold(None, |best: Option<(&Droppable, f64)>, (d, distance)| match best {
                        Some((_, best_distance)) if best_distance <= distance => best,
                        _ => Some((d, distance)),
                    })
                    .map(|(d, _)| d.target)
            }
            CollisionStrategy::RectIntersection => droppables
                .iter()
                .filter_map(|d| {
                    let intersection = dragged.intersection_area(&d.rect);
                    let union = dragged.area() + d.rect.area() - intersection;
                    (intersection > 0.0 && union > 0.0).then(|| (d, intersection / union))
                })
                .fold(None, |best: Option<(&Droppable, f64)>, (d, ratio)| match best {
                    Some((_, best_ratio)) if best_ratio >= ratio => best,
                    _ => Some((d, ratio)),
                })
                .map(|(d, _)| d.target),
        }
    }
}
