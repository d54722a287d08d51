//! Input model: keys, device size classes, and gesture state tracked between
//! events.
//!
//! `Key` carries the browser's key name; [`Key::nav`] folds it into the small
//! set of navigation intents the engine reacts to. `ResizeState` is the
//! active corner-handle drag, carrying everything needed to turn later pointer
//! positions into a new card size. `UiState` holds the selection and roving
//! focus the presentation layer styles against.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::collection::CardId;
use crate::consts::{MOBILE_VIEWPORT_MAX_PX, SMALL_VIEWPORT_MAX_PX};
use crate::geom::{Point, Size};

/// A keyboard key as reported by the browser (e.g. `"ArrowLeft"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// The navigation intent of this key, if it has one.
    #[must_use]
    pub fn nav(&self) -> Option<Nav> {
        match self.0.as_str() {
            "Escape" | "Esc" => Some(Nav::Dismiss),
            "ArrowLeft" | "ArrowUp" | "Left" | "Up" => Some(Nav::Previous),
            "ArrowRight" | "ArrowDown" | "Right" | "Down" => Some(Nav::Next),
            "Home" => Some(Nav::First),
            "End" => Some(Nav::Last),
            "Enter" | " " | "Spacebar" => Some(Nav::Activate),
            _ => None,
        }
    }
}

/// What a key asks the canvas to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// Clear the selection.
    Dismiss,
    /// Step backwards through the collection, wrapping.
    Previous,
    /// Step forwards through the collection, wrapping.
    Next,
    /// Jump to the first card.
    First,
    /// Jump to the last card.
    Last,
    /// Select the card that holds keyboard focus.
    Activate,
}

impl Nav {
    /// Step direction for `Previous`/`Next`.
    #[must_use]
    pub fn step(self) -> Option<isize> {
        match self {
            Self::Previous => Some(-1),
            Self::Next => Some(1),
            _ => None,
        }
    }
}

/// Index `step` places away from `index` in a list of `len`, wrapping.
#[must_use]
pub fn wrap_index(index: usize, step: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    let wrapped = (index as isize + step).rem_euclid(len as isize) as usize;
    Some(wrapped)
}

/// Device size class, which scales how fast a resize handle grows a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Narrow phones.
    Small,
    /// Tablets and wide phones.
    Mobile,
    #[default]
    Desktop,
}

impl SizeClass {
    /// Classify a viewport by its CSS width.
    #[must_use]
    pub fn from_viewport_width(width: f64) -> Self {
        if width < SMALL_VIEWPORT_MAX_PX {
            Self::Small
        } else if width < MOBILE_VIEWPORT_MAX_PX {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Factor cards are rendered at on this class of device.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Small => 0.6,
            Self::Mobile => 0.8,
            Self::Desktop => 1.0,
        }
    }
}

/// An in-progress corner-handle resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    /// Card being resized.
    pub id: CardId,
    /// Pointer position when the handle was grabbed.
    pub start_pointer: Point,
    /// Card size when the handle was grabbed.
    pub start_size: Size,
    /// Size-class factor captured at grab time.
    pub factor: f64,
}

impl ResizeState {
    /// Unclamped size for the pointer now being at `pointer`.
    ///
    /// Pointer travel is divided by `factor` so the handle tracks the pointer
    /// on devices that render cards scaled down.
    #[must_use]
    pub fn size_at(&self, pointer: Point) -> Size {
        let factor = if self.factor > 0.0 { self.factor } else { 1.0 };
        Size::new(
            self.start_size.width + (pointer.x - self.start_pointer.x) / factor,
            self.start_size.height + (pointer.y - self.start_pointer.y) / factor,
        )
    }
}

/// UI state visible to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The selected (focused and centered) card, if any.
    pub selected_id: Option<CardId>,
    /// The card holding keyboard focus, for roving traversal.
    pub focus_id: Option<CardId>,
    /// The active resize gesture, if any.
    pub resizing: Option<ResizeState>,
    pub size_class: SizeClass,
}
