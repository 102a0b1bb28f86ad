use axum::{extract::State, Json};

use crate::database::activities_repo::SharedActivityStore;
use crate::models::ActivitiesSnapshot;
use crate::services::activities_service;

pub async fn activities_handler(State(store): State<SharedActivityStore>) -> Json<ActivitiesSnapshot> {
    Json(activities_service::list_activities(&store))
}
