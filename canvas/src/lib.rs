//! Interactive card canvas engine for the portfolio homepage.
//!
//! Cards from a collection are scattered across a container, can be dragged,
//! resized, selected (raised, centered and enlarged), stepped through with the
//! keyboard, and re-packed into a grid. The engine owns stacking order,
//! per-card transforms and the selection; the host owns the DOM, the animator
//! and timers, and carries out the [`engine::Action`]s the engine returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Orchestrator [`engine::EngineCore`], host actions, the `Measure` seam |
//! | [`card`] | Per-card transform controller (center, unfocus, spread out) |
//! | [`zorder`] | Stacking registry with bounded z-indices |
//! | [`geom`] | Geometry primitives and the grid arrangement solver |
//! | [`collection`] | Card records and named collections |
//! | [`input`] | Keys, size classes, resize and selection state |
//! | [`schedule`] | Virtual-time task queue |
//! | [`headless`] | Host that runs the engine without a browser |
//! | [`jitter`] | Seedable randomness for placement |
//! | [`config`] | Tunable engine parameters |
//! | [`error`] | Load-boundary errors |
//! | [`consts`] | Default numeric constants |
//! | `web` | DOM binding (feature `web`) |

pub mod card;
pub mod collection;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod headless;
pub mod input;
pub mod jitter;
pub mod schedule;
#[cfg(feature = "web")]
pub mod web;
pub mod zorder;
