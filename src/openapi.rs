//! OpenAPI document derived from the handler annotations.

use crate::handlers::resource;
use crate::model::{CreateResource, Resource, ResourceStatus, UpdateResource};
use crate::response::ErrorBody;
use utoipa::OpenApi;

/// Path the document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Documentation entry point; redirects to [`OPENAPI_PATH`].
pub const DOCS_PATH: &str = "/api-docs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resource Management API",
        description = "CRUD backend for resource management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        resource::create,
        resource::list,
        resource::read,
        resource::update,
        resource::delete,
    ),
    components(schemas(Resource, ResourceStatus, CreateResource, UpdateResource, ErrorBody)),
    tags((name = "Resources", description = "Resource management"))
)]
pub struct ApiDoc;
