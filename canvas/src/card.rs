//! Per-card visual state and the commands that move a single card.
//!
//! A [`CardController`] tracks the transform last requested for its card
//! (the animator converges on it), a snapshot taken before the card was
//! focused, and any spread-out waiting on its first phase to finish. The
//! controller never talks to the animator itself; each command returns the
//! [`Animation`] the engine should request, or `None` when the command is a
//! no-op in the card's current state.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use serde::{Deserialize, Serialize};

use crate::consts::{SPREAD_DISTANCE_PX, SPREAD_PADDING_PX, SPREAD_ROTATION_DEG, SPRING_DAMPING, SPRING_STIFFNESS};
use crate::geom::{Point, Size, center_offset, clamp};
use crate::jitter::Jitter;

/// Identifies one animation request so its completion can be matched up.
pub type AnimationTicket = u64;

/// Visual transform of a card relative to the card container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for Transform {
    /// Cards mount invisible at the origin until the first spread-out.
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, rotation: 0.0, scale: 1.0, opacity: 0.0 }
    }
}

/// How the animator should reach a target transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Jump to the target with zero duration.
    Instant,
    /// Spring physics toward the target.
    Spring { stiffness: f64, damping: f64 },
}

impl Default for Transition {
    fn default() -> Self {
        Self::Spring { stiffness: SPRING_STIFFNESS, damping: SPRING_DAMPING }
    }
}

/// A transform the engine should ask the animator to reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub target: Transform,
    pub transition: Transition,
}

/// Parameters for [`CardController::spread_out`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadParams {
    /// Maximum offset from the container center per axis.
    pub distance: i64,
    /// Fixed rotation; `None` draws one from `±max_rotation`.
    pub rotation: Option<f64>,
    pub max_rotation: i64,
    /// Minimum gap between the card and every container edge.
    pub padding: f64,
    /// Transition for the second phase.
    pub transition: Transition,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            distance: SPREAD_DISTANCE_PX,
            rotation: None,
            max_rotation: SPREAD_ROTATION_DEG,
            padding: SPREAD_PADDING_PX,
            transition: Transition::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingSpread {
    ticket: AnimationTicket,
    baseline: Point,
    container: Size,
    element: Size,
    params: SpreadParams,
}

/// Transform state and commands for one card.
#[derive(Debug, Clone, Default)]
pub struct CardController {
    current: Transform,
    before_focus: Transform,
    focused: bool,
    pending_spread: Option<PendingSpread>,
}

impl CardController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The transform most recently requested for this card.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.current
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// True while a spread-out is waiting for its snap to complete.
    #[must_use]
    pub fn has_pending_spread(&self) -> bool {
        self.pending_spread.is_some()
    }

    /// Center the card in `container` at `scale`, remembering where it was.
    ///
    /// A missing container leaves the card at offset `(0, 0)`. No-op when the
    /// card is already focused.
    pub fn center(&mut self, container: Option<Size>, element: Size, scale: f64, transition: Transition) -> Option<Animation> {
        if self.focused {
            return None;
        }
        self.before_focus = self.current;
        self.focused = true;

        let offset = container.map_or_else(Point::default, |c| center_offset(c, element));
        let target = Transform { x: offset.x, y: offset.y, rotation: 0.0, scale, ..self.current };
        Some(self.request(target, transition))
    }

    /// Return to the transform captured by [`center`](Self::center).
    ///
    /// No-op when the card is not focused.
    pub fn unfocus(&mut self, transition: Transition) -> Option<Animation> {
        if !self.focused {
            return None;
        }
        self.focused = false;
        Some(self.request(self.before_focus, transition))
    }

    /// Start a two-phase spread-out: snap to the container center now, then
    /// scatter once the animator reports `ticket` complete.
    ///
    /// Returns the instantaneous first phase. No-op when the card is focused.
    pub fn spread_out(
        &mut self,
        ticket: AnimationTicket,
        params: SpreadParams,
        container: Size,
        element: Size,
    ) -> Option<Animation> {
        if self.focused {
            return None;
        }
        let baseline = center_offset(container, element);
        self.pending_spread = Some(PendingSpread { ticket, baseline, container, element, params });
        let target = Transform { x: baseline.x, y: baseline.y, ..self.current };
        Some(self.request(target, Transition::Instant))
    }

    /// Handle the animator finishing `ticket`.
    ///
    /// Completing a spread-out snap yields its second phase: a random offset
    /// of up to `distance` from the baseline, clamped so the card stays
    /// `padding` away from every container edge. If the card was focused while
    /// the snap ran, the pending scatter is dropped.
    pub fn complete(&mut self, ticket: AnimationTicket, jitter: &mut Jitter) -> Option<Animation> {
        let pending = self.pending_spread.filter(|p| p.ticket == ticket)?;
        self.pending_spread = None;
        if self.focused {
            return None;
        }

        let PendingSpread { baseline, container, element, params, .. } = pending;
        let dx = jitter.symmetric(params.distance) as f64;
        let dy = jitter.symmetric(params.distance) as f64;
        let x = clamp(params.padding, container.width - element.width - params.padding, baseline.x + dx);
        let y = clamp(params.padding, container.height - element.height - params.padding, baseline.y + dy);
        let rotation = params.rotation.unwrap_or_else(|| jitter.symmetric(params.max_rotation) as f64);

        let target = Transform { x, y, rotation, opacity: 1.0, ..self.current };
        Some(self.request(target, params.transition))
    }

    /// Move to a grid slot chosen by organize.
    pub fn arrange(&mut self, position: Point, rotation: f64, transition: Transition) -> Animation {
        let target = Transform { x: position.x, y: position.y, rotation, ..self.current };
        self.request(target, transition)
    }

    /// Record where a user drag left the card.
    pub fn drag_to(&mut self, position: Point) {
        self.current.x = position.x;
        self.current.y = position.y;
    }

    fn request(&mut self, target: Transform, transition: Transition) -> Animation {
        self.current = target;
        Animation { target, transition }
    }
}
