use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Could not find page content")]
    Extraction,

    #[error("No supported model available (candidates: {0:?})")]
    NoSupportedModel(Vec<String>),

    #[error("Model API request failed: {0}")]
    GenerationRequest(String),

    #[error("Model did not return valid JSON. Raw output: {0}")]
    InvalidModelOutput(String),

    #[error("Model JSON missing 'questions' field or it is not a list")]
    MalformedPayload,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PageNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Network(_) | AppError::Extraction => StatusCode::BAD_GATEWAY,
            AppError::NoSupportedModel(_)
            | AppError::GenerationRequest(_)
            | AppError::InvalidModelOutput(_)
            | AppError::MalformedPayload
            | AppError::Database(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::GenerationRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
