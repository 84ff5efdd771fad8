pub mod public;
pub mod suggest;

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Larder", description = "Recipe suggestions from the ingredients you have"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![public::ApiDoc::openapi(), suggest::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let spec = openapi();
        assert!(spec.paths.paths.contains_key("/api/suggest"));
        assert!(spec.paths.paths.contains_key("/api/test/unauthed-ping"));

        let schemas = &spec.components.unwrap().schemas;
        assert!(schemas.contains_key("ErrorResponse"));
        assert!(schemas.contains_key("SuggestRequest"));
        assert!(schemas.contains_key("SuggestFailure"));
    }
}
