//! Persistence capability for accepted namespaces.

use async_trait::async_trait;
use thiserror::Error;

use crate::namespace::Namespace;

/// Errors returned by a namespace store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected or failed the commit.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Trait for committing validated namespaces.
#[async_trait]
pub trait NamespaceStore: Send + Sync {
    /// Commits a namespace that has already passed validation.
    async fn commit(&self, namespace: &Namespace) -> Result<(), StoreError>;
}

/// Store that accepts every namespace without keeping it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNamespaceStore;

impl NoopNamespaceStore {
    /// Creates a new no-op store.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NamespaceStore for NoopNamespaceStore {
    async fn commit(&self, namespace: &Namespace) -> Result<(), StoreError> {
        tracing::debug!(namespace = %namespace.name, "namespace commit skipped (no-op store)");
        Ok(())
    }
}
