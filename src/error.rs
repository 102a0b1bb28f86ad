use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Why a signup was refused. `Display` is the detail text sent to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Student already signed up")]
    AlreadyEnrolled,

    #[error("Activity is full")]
    ActivityFull,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Invalid email domain")]
    InvalidDomain,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email is too long")]
    EmailTooLong,

    #[error("Email already signed up for another activity")]
    DuplicateAcrossActivities,

    #[error("Email is a {role} email")]
    ReservedRoleEmail { role: &'static str },
}

impl SignupError {
    pub fn status(&self) -> StatusCode {
        match self {
            SignupError::ActivityNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    // Short stable name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SignupError::ActivityNotFound => "activity_not_found",
            SignupError::AlreadyEnrolled => "already_enrolled",
            SignupError::ActivityFull => "activity_full",
            SignupError::InvalidEmailFormat => "invalid_email_format",
            SignupError::InvalidDomain => "invalid_domain",
            SignupError::EmptyEmail => "empty_email",
            SignupError::EmailTooLong => "email_too_long",
            SignupError::DuplicateAcrossActivities => "duplicate_across_activities",
            SignupError::ReservedRoleEmail { .. } => "reserved_role_email",
        }
    }
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        detail_response(self.status(), self.to_string())
    }
}

pub fn detail_response(status: StatusCode, detail: impl Into<String>) -> Response {
    let detail: String = detail.into();
    (status, Json(serde_json::json!({ "detail": detail }))).into_response()
}
