use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::ErrorReport;
use crate::application::recipes::RecipeError;
use crate::application::repos::RepoError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const DUPLICATE: &str = "duplicate";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const REPO: &str = "repo_error";
    pub const WRITE_ABORTED: &str = "write_aborted";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
        }
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RecipeError> for ApiError {
    fn from(error: RecipeError) -> Self {
        match error {
            RecipeError::Validation(message) => {
                ApiError::bad_request("Invalid recipe payload", Some(message))
            }
            RecipeError::NotFound => ApiError::not_found("Recipe Not Found"),
            RecipeError::Store(err) => repo_error_to_api(err),
            RecipeError::WriteAborted(detail) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::WRITE_ABORTED,
                "Write did not complete",
                Some(detail),
            ),
        }
    }
}

fn repo_error_to_api(err: RepoError) -> ApiError {
    let detail = err.to_string();
    match err {
        RepoError::NotFound => ApiError::not_found("Recipe Not Found"),
        RepoError::InvalidInput { .. } => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INVALID_INPUT,
            "Store rejected the recipe",
            Some(detail),
        ),
        RepoError::Duplicate { .. } => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::DUPLICATE,
            "Store rejected the recipe",
            Some(detail),
        ),
        RepoError::Timeout => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::DB_TIMEOUT,
            "Store timed out",
            None,
        ),
        RepoError::Persistence(_) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Store unavailable",
            Some(detail),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hint = self.hint.clone();
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(
            "infra::http",
            self.status,
            format!("{}: {}", self.code, hint.as_deref().unwrap_or(self.message)),
        )
        .attach(&mut response);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(RecipeError::Validation("bad".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RecipeError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(RecipeError::Store(RepoError::Timeout)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(RecipeError::Store(RepoError::from_persistence("down"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(RecipeError::WriteAborted("panicked".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_carries_error_report_for_logging() {
        let response = ApiError::not_found("Recipe Not Found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("error report attached");
        assert_eq!(report.status, StatusCode::NOT_FOUND);
        assert_eq!(report.messages, vec!["not_found: Recipe Not Found".to_string()]);
    }
}
