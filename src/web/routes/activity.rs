use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::database::activities_repo::SharedActivityStore;
use crate::error::detail_response;
use crate::services::signup_service;

#[derive(Debug, Deserialize)]
pub struct SignupQuery {
    pub email: String,
}

pub async fn activity_signup_handler(
    Path(activity_name): Path<String>,
    State(store): State<SharedActivityStore>,
    query: Result<Query<SignupQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => {
            warn!(activity = %activity_name, "signup query rejected: {}", rejection.body_text());
            return detail_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match signup_service::signup(&store, &activity_name, &query.email) {
        Ok(confirmation) => {
            Json(serde_json::json!({ "message": confirmation.message() })).into_response()
        }
        Err(e) => e.into_response(),
    }
}
