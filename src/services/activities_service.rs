use crate::database::activities_repo::{Activities, ActivityStore};
use crate::models::ActivitiesSnapshot;

pub fn list_activities(store: &ActivityStore) -> ActivitiesSnapshot {
    store.read(Activities::snapshot)
}
