//! Product store capability.
//!
//! The store is the authority on which products exist. Every operation is
//! asynchronous and may fail; callers decide how failures are reported.

mod config;
mod memory;
pub mod wire;

#[cfg(feature = "http-store")]
mod http;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Product, ProductDraft, ProductId};

pub use config::HttpStoreConfig;
#[cfg(feature = "http-store")]
pub use http::HttpEntityStore;
pub use memory::InMemoryEntityStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl StoreOperation {
    /// Create, update and delete change store contents; list and get only read.
    #[must_use]
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Delete)
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{operation} request failed: {message}")]
    Transport {
        operation: StoreOperation,
        message: String,
    },

    #[error("{operation} request rejected with status {status}")]
    Status {
        operation: StoreOperation,
        status: u16,
    },

    #[error("{operation} response could not be decoded: {message}")]
    Decode {
        operation: StoreOperation,
        message: String,
    },

    #[error("product `{id}` not found")]
    NotFound { id: ProductId },
}

impl StoreError {
    #[must_use]
    pub fn operation(&self) -> Option<StoreOperation> {
        match self {
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::NotFound { .. } => None,
        }
    }
}

/// Asynchronous product store.
///
/// Implementations are driven from a single-threaded event loop, so the
/// returned futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait EntityStore {
    /// All products in storage order.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn get(&self, id: &ProductId) -> StoreResult<Product>;

    /// Stores a new product and returns it with its assigned id.
    async fn create(&self, draft: &ProductDraft) -> StoreResult<Product>;

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<()>;

    async fn delete(&self, id: &ProductId) -> StoreResult<()>;
}
