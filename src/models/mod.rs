pub mod activities;

pub use activities::{ActivitiesSnapshot, ActivityRecord, SignupConfirmation};
