//! Namespace record and its validation errors.

mod record;

pub use record::Namespace;

use thiserror::Error;

/// Validation failures for a namespace record.
///
/// Only the first violation is ever reported. The `Display` form is the
/// message returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    #[error("namespace name must not be empty")]
    EmptyName,

    #[error("labels must not be empty")]
    EmptyLabels,

    #[error("label keys must not be empty")]
    EmptyLabelKey,

    #[error("value of label '{key}' must not be empty")]
    EmptyLabelValue { key: String },

    #[error("admin_user must not be empty")]
    EmptyAdminUsers,

    /// `position` is zero-based.
    #[error("admin user at position {position} must not be empty")]
    EmptyAdminUser { position: usize },

    #[error("admin_group must not be empty")]
    EmptyAdminGroups,

    /// `position` is zero-based.
    #[error("admin group at position {position} must not be empty")]
    EmptyAdminGroup { position: usize },

    #[error("flavor must not be empty")]
    EmptyFlavor,
}

impl NamespaceError {
    /// Returns the JSON field the violation belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            NamespaceError::EmptyName => "name",
            NamespaceError::EmptyLabels
            | NamespaceError::EmptyLabelKey
            | NamespaceError::EmptyLabelValue { .. } => "labels",
            NamespaceError::EmptyAdminUsers | NamespaceError::EmptyAdminUser { .. } => {
                "admin_user"
            }
            NamespaceError::EmptyAdminGroups | NamespaceError::EmptyAdminGroup { .. } => {
                "admin_group"
            }
            NamespaceError::EmptyFlavor => "flavor",
        }
    }
}
