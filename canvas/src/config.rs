//! Tunable engine parameters.
//!
//! Every field has a default from [`crate::consts`], so a host can supply a
//! partial JSON object (e.g. `{"stagger_ms": 20}`) and inherit the rest.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::card::{SpreadParams, Transition};
use crate::consts::*;
use crate::geom::{GridSpacing, Size};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Scale of the selected card.
    pub focus_scale: f64,
    /// Organize grid padding and gap.
    pub grid: GridSpacing,
    /// Organize rotation jitter (±degrees) when a card's row fit.
    pub organize_jitter_fit: i64,
    /// Organize rotation jitter (±degrees) when a card's row overflowed.
    pub organize_jitter_loose: i64,
    /// Spread-out maximum offset from the container center.
    pub spread_distance: i64,
    /// Spread-out minimum distance from the container edges.
    pub spread_padding: f64,
    /// Spread-out rotation range (±degrees).
    pub spread_rotation: i64,
    /// Delay between cards of a spread-out cascade.
    pub stagger_ms: u64,
    /// Transition for every non-instant move.
    pub transition: Transition,
    /// Size of cards without declared dimensions.
    pub default_card_size: Size,
    /// Smallest size a resize can produce.
    pub min_card_size: Size,
    /// Largest size a resize can produce.
    pub max_card_size: Size,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            focus_scale: FOCUS_SCALE,
            grid: GridSpacing { padding_x: GRID_PADDING_X, padding_y: GRID_PADDING_Y, gap: GRID_GAP },
            organize_jitter_fit: ORGANIZE_JITTER_FIT_DEG,
            organize_jitter_loose: ORGANIZE_JITTER_LOOSE_DEG,
            spread_distance: SPREAD_DISTANCE_PX,
            spread_padding: SPREAD_PADDING_PX,
            spread_rotation: SPREAD_ROTATION_DEG,
            stagger_ms: SPREAD_STAGGER_MS,
            transition: Transition::default(),
            default_card_size: Size::new(DEFAULT_CARD_WIDTH, DEFAULT_CARD_HEIGHT),
            min_card_size: Size::new(RESIZE_MIN_WIDTH, RESIZE_MIN_HEIGHT),
            max_card_size: Size::new(RESIZE_MAX_WIDTH, RESIZE_MAX_HEIGHT),
        }
    }
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Spread-out parameters derived from this config.
    #[must_use]
    pub fn spread_params(&self) -> SpreadParams {
        SpreadParams {
            distance: self.spread_distance,
            rotation: None,
            max_rotation: self.spread_rotation,
            padding: self.spread_padding,
            transition: self.transition,
        }
    }
}
