//! Error types for introspection queries.
//!
//! A missing capability is never an error; probes answer `false`. The
//! variants here cover queries that have no meaningful answer.

use alloc::string::String;

use thiserror::Error;

/// Result type for introspection queries.
pub type Result<T, E = IntrospectError> = core::result::Result<T, E>;

/// Errors raised when a query cannot be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectError {
    /// More than one call operator; no overload is picked silently.
    #[error("cannot normalize `{entity}`: {overloads} call operator overloads, expected exactly one")]
    IndeterminateCallable {
        entity: &'static str,
        overloads: usize,
    },

    /// A signature was requested for a type that is not callable.
    #[error("`{entity}` is not callable")]
    NotCallable { entity: &'static str },

    /// The type is callable but was registered without its signature.
    #[error("`{entity}` is callable but its signature was not recorded")]
    MissingSignature { entity: &'static str },

    /// Asked to drop more leading parameters than the signature has.
    #[error("cannot drop {requested} leading parameters from a signature of arity {arity}")]
    OutOfDomainDrop { requested: usize, arity: usize },

    /// A capability spelling that names no capability.
    #[error("unknown capability name: {0}")]
    UnknownCapability(String),

    /// The type was never registered.
    #[error("type `{0}` is not registered")]
    NotRegistered(&'static str),

    /// The global registry can only be installed once.
    #[error("the global registry is already installed")]
    AlreadyInstalled,
}
