//! ResourceService: the accessor between handlers and the store.

mod resource;
mod validation;
pub use resource::ResourceService;
pub use validation::RequestValidator;
