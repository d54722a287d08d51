//! Shared numeric constants for the canvas crate.

// ── Cards ───────────────────────────────────────────────────────

/// Width used for cards that declare no explicit width.
pub const DEFAULT_CARD_WIDTH: f64 = 220.0;

/// Height used for cards that declare no explicit height.
pub const DEFAULT_CARD_HEIGHT: f64 = 160.0;

/// Scale applied to a card when it is selected and centered.
pub const FOCUS_SCALE: f64 = 1.5;

// ── Organize ────────────────────────────────────────────────────

/// Horizontal inset between the container edge and the first grid column.
pub const GRID_PADDING_X: f64 = 12.0;

/// Vertical inset between the container edge and the first grid row.
pub const GRID_PADDING_Y: f64 = 12.0;

/// Gap between neighboring cards in both axes.
pub const GRID_GAP: f64 = 12.0;

/// Rotation jitter (degrees, ±) for cards whose grid row fit the container.
pub const ORGANIZE_JITTER_FIT_DEG: i64 = 5;

/// Rotation jitter (degrees, ±) for cards whose grid row overflowed.
pub const ORGANIZE_JITTER_LOOSE_DEG: i64 = 15;

// ── Spread out ──────────────────────────────────────────────────

/// Maximum offset (pixels, ±) from the container center per axis.
pub const SPREAD_DISTANCE_PX: i64 = 500;

/// Minimum distance between a spread card and the container edge.
pub const SPREAD_PADDING_PX: f64 = 50.0;

/// Rotation range (degrees, ±) when no fixed rotation is requested.
pub const SPREAD_ROTATION_DEG: i64 = 15;

/// Delay between consecutive cards of a spread-out cascade.
pub const SPREAD_STAGGER_MS: u64 = 5;

// ── Motion ──────────────────────────────────────────────────────

/// Spring stiffness for card moves.
pub const SPRING_STIFFNESS: f64 = 500.0;

/// Spring damping for card moves.
pub const SPRING_DAMPING: f64 = 80.0;

// ── Resize ──────────────────────────────────────────────────────

pub const RESIZE_MIN_WIDTH: f64 = 80.0;
pub const RESIZE_MAX_WIDTH: f64 = 500.0;
pub const RESIZE_MIN_HEIGHT: f64 = 60.0;
pub const RESIZE_MAX_HEIGHT: f64 = 400.0;

/// Viewports narrower than this use the small size class.
pub const SMALL_VIEWPORT_MAX_PX: f64 = 640.0;

/// Viewports narrower than this (and not small) use the mobile size class.
pub const MOBILE_VIEWPORT_MAX_PX: f64 = 768.0;
