//! Error Types
//!
//! The main error type [`MarrowError`] covers the failure modes the
//! core can surface: import failures propagated from a model loader,
//! and name lookups that callers chose to treat as hard errors.
//!
//! Lookup misses inside the frame loop (a stale key, an unknown bone
//! name on an already-built task) are deliberately *not* errors — they
//! degrade to logged no-ops so a single bad target can never take down
//! the frame loop.

use thiserror::Error;

/// The main error type for the marrow scene graph.
#[derive(Error, Debug)]
pub enum MarrowError {
    // ========================================================================
    // Import Errors
    // ========================================================================
    /// The loader could not read the model file.
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    /// The loader read the file but could not make sense of it.
    #[error("model import failed: {0}")]
    ImportFailed(String),

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// No bone with the given name is reachable from the target node.
    #[error("bone not found: {0}")]
    BoneNotFound(String),

    /// No node with the given name exists under the searched root.
    #[error("node not found: {0}")]
    NodeNotFound(String),
}

/// Convenience alias used by all fallible public APIs.
pub type Result<T> = std::result::Result<T, MarrowError>;
