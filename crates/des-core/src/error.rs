//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `DesError` as one
//! variant via `From`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::{ProcessId, ResourceId, StoreId};

/// The base error type shared by every `des-*` crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesError {
    /// A timeout or event was scheduled before the current instant.
    #[error("invalid delay {0}: delays must be finite and non-negative")]
    InvalidDelay(f64),

    /// A store request carried a negative or non-finite amount.
    #[error("invalid amount {0}: amounts must be finite and non-negative")]
    InvalidAmount(f64),

    /// A store request that can never succeed given the store's capacity.
    #[error("{store}: request for {amount} can never be satisfied (capacity {capacity})")]
    UnsatisfiableRequest {
        store:    StoreId,
        amount:   f64,
        capacity: f64,
    },

    /// A release without a matching grant.
    #[error("{process} released {resource} without holding a slot")]
    ResourceMisuse {
        resource: ResourceId,
        process:  ProcessId,
    },

    #[error("process {0} not found")]
    UnknownProcess(ProcessId),

    #[error("resource {0} not found")]
    UnknownResource(ResourceId),

    #[error("store {0} not found")]
    UnknownStore(StoreId),

    #[error("configuration error: {0}")]
    Config(String),
}

impl DesError {
    /// `false` for errors that only terminate the requesting process; `true`
    /// for errors that abort the whole run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DesError::UnsatisfiableRequest { .. })
    }
}

/// Shorthand result type for all `des-*` crates.
pub type DesResult<T> = Result<T, DesError>;
