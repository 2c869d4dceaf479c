//! Domain layer for the namespace registration service.
//!
//! This crate provides:
//! - The `Namespace` record accepted by the registration endpoint
//! - Field validation with ordered, first-violation-wins semantics
//! - The `NamespaceStore` capability invoked after a record is accepted

pub mod namespace;
pub mod store;

pub use namespace::{Namespace, NamespaceError};
pub use store::{NamespaceStore, NoopNamespaceStore, StoreError};
