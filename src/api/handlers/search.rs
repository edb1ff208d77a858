use crate::search::{
    dataset::UserSource, pipeline, Defaults, EffectiveParams, ErrorBody, ParamsError,
    RawSearchParams, SearchResponse, ERROR_BAD_ORDER_FIELD,
};
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

#[utoipa::path(
    get,
    path = "/v1/users",
    params(RawSearchParams),
    responses(
        (status = 200, description = "One page of matching users", body = SearchResponse, content_type = "application/json"),
        (status = 400, description = "Unknown order field; Error is ErrorBadOrderField", body = ErrorBody),
        (status = 500, description = "Dataset could not be read", body = ErrorBody),
    ),
    tag = "users"
)]
// axum handler for search, also mounted at `/`
#[instrument(skip(source, defaults))]
pub async fn search(
    Query(pairs): Query<Vec<(String, String)>>,
    Extension(source): Extension<Arc<dyn UserSource>>,
    Extension(defaults): Extension<Defaults>,
) -> Response {
    let raw = RawSearchParams::from_pairs(pairs);

    let params = match EffectiveParams::from_raw(raw, &defaults) {
        Ok(params) => params,
        Err(ParamsError::BadOrderField(field)) => {
            debug!("Rejecting order field {:?}", field);

            return error_response(StatusCode::BAD_REQUEST, ERROR_BAD_ORDER_FIELD);
        }
    };

    let users = match source.users() {
        Ok(users) => users,
        Err(err) => {
            error!("Failed to load dataset: {err}");

            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cannot load dataset");
        }
    };

    let page = pipeline::process(&users, &params);

    debug!(
        "returning {} of {} users, next_page: {}",
        page.users.len(),
        users.len(),
        page.next_page
    );

    (StatusCode::OK, Json(page)).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
