//! Errors raised at the engine's load boundaries.
//!
//! Gestures never fail: a gesture against an unknown card, a dragging card or
//! a focused card is ignored and yields no actions. Only loading card data and
//! decoding host-supplied tasks can go wrong.

/// Errors produced while loading collections or decoding host input.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// Two cards in one collection share an id.
    #[error("duplicate card id `{id}` in collection `{collection}`")]
    DuplicateCardId { collection: String, id: String },

    /// The requested collection does not exist.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// Collection data could not be parsed.
    #[error("invalid collection data: {0}")]
    InvalidCollection(#[from] serde_json::Error),

    /// A task handed back by the host could not be decoded.
    #[error("invalid task: {0}")]
    InvalidTask(String),
}
