//! Request validation for resource payloads and list filters.

use crate::error::AppError;
use crate::model::{CreateResource, ListFilter, NewResource, ResourceFilter, UpdateResource};

pub struct RequestValidator;

impl RequestValidator {
    /// `name` must be present and non-empty; `status` defaults to active.
    pub fn validate_create(body: CreateResource) -> Result<NewResource, AppError> {
        let name = body
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("Name is required".into()))?;
        Ok(NewResource {
            name,
            description: body.description,
            category: body.category,
            status: body.status.unwrap_or_default(),
        })
    }

    /// Validate only the fields present (for PUT). A supplied name may not be empty.
    pub fn validate_update(body: &UpdateResource) -> Result<(), AppError> {
        if body.name.as_deref() == Some("") {
            return Err(AppError::BadRequest("Name cannot be empty".into()));
        }
        Ok(())
    }

    /// Empty query values count as not supplied. Values are matched as given,
    /// so an unknown status simply selects nothing.
    pub fn validate_filter(params: ResourceFilter) -> ListFilter {
        ListFilter {
            category: non_empty(params.category),
            status: non_empty(params.status),
            search: non_empty(params.search),
        }
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}
