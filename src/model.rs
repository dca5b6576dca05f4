//! Resource entity and its request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// Lifecycle status of a resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ResourceStatus::Active),
            "inactive" => Ok(ResourceStatus::Inactive),
            other => Err(format!("invalid status: {} (expected active or inactive)", other)),
        }
    }
}

/// A persisted resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[schema(example = "3f1c2a9e-8a4b-4a57-9a36-3f0c1d2b7e10")]
    pub id: String,
    #[schema(example = "Sample Resource")]
    pub name: String,
    #[schema(example = "This is a sample resource")]
    pub description: Option<String>,
    #[schema(example = "technology")]
    pub category: Option<String>,
    pub status: ResourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST body. `name` stays optional here so a missing name reaches the handler's
/// own check instead of a deserialization rejection.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResource {
    #[schema(example = "Sample Resource")]
    pub name: Option<String>,
    #[schema(example = "This is a sample resource")]
    pub description: Option<String>,
    #[schema(example = "technology")]
    pub category: Option<String>,
    pub status: Option<ResourceStatus>,
}

/// Validated insert handed to a store: name present, status resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: ResourceStatus,
}

/// PUT body. Absent fields are left untouched; `description` and `category`
/// accept an explicit `null` to clear the stored value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResource {
    #[schema(example = "Updated Resource Name")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Updated description")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "updated-category")]
    pub category: Option<Option<String>>,
    pub status: Option<ResourceStatus>,
}

impl UpdateResource {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.category.is_none() && self.status.is_none()
    }
}

/// Marks a field as present, keeping `null` distinct from absent.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// List filters; every field is optional and an absent field is not applied.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResourceFilter {
    /// Exact category match.
    #[param(example = "technology")]
    pub category: Option<String>,
    /// Exact status match; a value outside the enumeration matches nothing.
    #[param(example = "active")]
    pub status: Option<String>,
    /// Substring match against name or description (case-sensitive).
    #[param(example = "sample")]
    pub search: Option<String>,
}

/// Filter after validation, with empty strings dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(category) = &self.category {
            if resource.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if resource.status.as_str() != status {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let in_name = resource.name.contains(term.as_str());
            let in_description = resource
                .description
                .as_deref()
                .map(|d| d.contains(term.as_str()))
                .unwrap_or(false);
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}
