//! The namespace record submitted for registration.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::NamespaceError;

/// A named grouping with labels and administrative ownership.
///
/// Every field, label value and admin entry reads as empty when absent or
/// `null` in the JSON body, so such gaps surface as validation failures
/// rather than parse errors. Keys also match in their capitalized and
/// upper-case forms.
///
/// Labels are kept in key order, which makes validation deterministic when
/// several entries are invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespace {
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(alias = "Labels", alias = "LABELS", deserialize_with = "labels_null_as_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(
        rename = "admin_user",
        alias = "Admin_user",
        alias = "ADMIN_USER",
        deserialize_with = "entries_null_as_empty"
    )]
    pub admin_users: Vec<String>,
    #[serde(
        rename = "admin_group",
        alias = "Admin_group",
        alias = "ADMIN_GROUP",
        deserialize_with = "entries_null_as_empty"
    )]
    pub admin_groups: Vec<String>,
    #[serde(alias = "Flavor", alias = "FLAVOR", deserialize_with = "null_as_empty")]
    pub flavor: String,
}

impl Namespace {
    /// Creates a namespace with the given name and flavor and no labels or admins.
    pub fn new(name: impl Into<String>, flavor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flavor: flavor.into(),
            ..Self::default()
        }
    }

    /// Adds a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Appends an admin user.
    pub fn with_admin_user(mut self, user: impl Into<String>) -> Self {
        self.admin_users.push(user.into());
        self
    }

    /// Appends an admin group.
    pub fn with_admin_group(mut self, group: impl Into<String>) -> Self {
        self.admin_groups.push(group.into());
        self
    }

    /// Checks that every field is present and non-empty.
    ///
    /// Fields are checked in the order name, labels, admin users, admin
    /// groups, flavor, and the first violation found is returned.
    pub fn validate(&self) -> Result<(), NamespaceError> {
        if self.name.is_empty() {
            return Err(NamespaceError::EmptyName);
        }

        if self.labels.is_empty() {
            return Err(NamespaceError::EmptyLabels);
        }
        for (key, value) in &self.labels {
            if key.is_empty() {
                return Err(NamespaceError::EmptyLabelKey);
            }
            if value.is_empty() {
                return Err(NamespaceError::EmptyLabelValue { key: key.clone() });
            }
        }

        if self.admin_users.is_empty() {
            return Err(NamespaceError::EmptyAdminUsers);
        }
        if let Some(position) = first_empty(&self.admin_users) {
            return Err(NamespaceError::EmptyAdminUser { position });
        }

        if self.admin_groups.is_empty() {
            return Err(NamespaceError::EmptyAdminGroups);
        }
        if let Some(position) = first_empty(&self.admin_groups) {
            return Err(NamespaceError::EmptyAdminGroup { position });
        }

        if self.flavor.is_empty() {
            return Err(NamespaceError::EmptyFlavor);
        }

        Ok(())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn labels_null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels: Option<BTreeMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(labels
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

fn entries_null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

fn first_empty(entries: &[String]) -> Option<usize> {
    entries.iter().position(String::is_empty)
}
