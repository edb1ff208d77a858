use super::handlers::{health, search};
use crate::search::{ErrorBody, SearchResponse, UserRecord};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(health::health, search::search),
    components(schemas(UserRecord, SearchResponse, ErrorBody, health::Health)),
    tags(
        (name = "users", description = "Filter, order and paginate the user dataset"),
        (name = "health", description = "Service and dataset status"),
    )
)]
pub struct ApiDoc;
