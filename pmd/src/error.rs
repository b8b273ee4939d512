//! Error types for registration, dispatch and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::hierarchy::TypeId;
use crate::ids::MethodId;

/// Errors raised by the dispatch engine.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered method is applicable at every argument position.
    ///
    /// Arity mismatches end up here too: a method whose specializer count
    /// differs from the argument count never becomes a candidate.
    #[error("no applicable method for `{procedure}` with arguments ({})", .arguments.join(", "))]
    NoApplicableMethod {
        procedure: String,
        arguments: Vec<String>,
    },

    /// Several candidates share the most specific rank vector and the
    /// context is configured to reject ties.
    #[error("ambiguous call to `{procedure}`: {} methods are equally specific", .candidates.len())]
    AmbiguousMethod {
        procedure: String,
        candidates: Vec<MethodId>,
    },

    /// Re-linking `child` under `parent` would make the hierarchy cyclic.
    #[error("cyclic type hierarchy: `{child}` cannot delegate to `{parent}`")]
    CyclicHierarchy { child: String, parent: String },

    /// A type marker that is not registered in this context.
    #[error("unknown type marker {0}")]
    UnknownType(TypeId),
}

/// Errors raised while loading a [`DispatchConfig`](crate::DispatchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dispatch config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
