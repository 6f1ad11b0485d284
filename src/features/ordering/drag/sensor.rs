//! Activation constraints separating drags from clicks, taps and scrolls

use std::time::Duration;

use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationConstraint {
    /// Activate once the pointer travelled `distance` from its origin
    /// (zero activates immediately)
    Distance { distance: f64 },
    /// Activate after holding for `delay`; moving further than `tolerance`
    /// before that is treated as a scroll and aborts the gesture
    Delay { delay: Duration, tolerance: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Pending,
    Activated,
    Aborted,
}

/// A gesture that started but is not yet a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingActivation {
    constraint: ActivationConstraint,
    origin: Point,
    started_at_ms: u64,
}

impl PendingActivation {
    pub fn start(constraint: ActivationConstraint, origin: Point, at_ms: u64) -> (Self, Activation) {
        let pending = Self {
            constraint,
            origin,
            started_at_ms: at_ms,
        };
        let activation = match constraint {
            ActivationConstraint::Distance { distance } if distance <= 0.0 => Activation::Activated,
            _ => Activation::Pending,
        };
        (pending, activation)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    fn delay_elapsed(&self, delay: Duration, at_ms: u64) -> bool {
        at_ms.saturating_sub(self.started_at_ms) as u128 >= delay.as_millis()
    }

    pub fn on_move(&self, position: Point, at_ms: u64) -> Activation {
        let travelled = self.origin.distance_to(position);
        match self.constraint {
            ActivationConstraint::Distance { distance } => {
                if travelled >= distance {
                    Activation::Activated
                } else {
                    Activation::Pending
                }
            }
            ActivationConstraint::Delay { delay, tolerance } => {
                // Every earlier move stayed within tolerance, so the hold
                // timer fired before this one
                if self.delay_elapsed(delay, at_ms) {
                    Activation::Activated
                } else if travelled > tolerance {
                    Activation::Aborted
                } else {
                    Activation::Pending
                }
            }
        }
    }

    pub fn on_release(&self, at_ms: u64) -> Activation {
        match self.constraint {
            ActivationConstraint::Distance { .. } => Activation::Aborted,
            ActivationConstraint::Delay { delay, .. } => {
                if self.delay_elapsed(delay, at_ms) {
                    Activation::Activated
                } else {
                    Activation::Aborted
                }
            }
        }
    }
}
