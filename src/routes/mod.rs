//! HTTP boundary: route handlers and the error envelope.

use actix_multipart::form::MultipartFormConfig;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use thiserror::Error;
use validator::ValidationErrors;

use crate::dto::api::ApiResponse;
use crate::forms::apartments::MAX_UPLOAD_FILES;
use crate::services::ServiceError;

pub mod apartments;

/// Upper bound for a single uploaded file.
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Errors rendered as `{code, message, data: null}` envelopes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ApiResponse::<()>::empty(status, self.to_string()))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        log::error!("Request failed: {err}");
        ApiError::Internal
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Registers the apartment endpoints together with extractor settings that
/// turn malformed requests into `400` envelopes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected JSON body: {err}");
        ApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected query string: {err}");
        ApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(
        MultipartFormConfig::default()
            .total_limit(MAX_UPLOAD_FILES * MAX_FILE_SIZE)
            .error_handler(|err, _req| {
                log::warn!("Rejected multipart body: {err}");
                ApiError::BadRequest(err.to_string()).into()
            }),
    )
    .service(apartments::create_apartment)
    .service(apartments::list_apartments)
    .service(apartments::get_apartment)
    .service(apartments::update_apartment)
    .service(apartments::delete_apartment)
    .service(apartments::upload_images)
    .service(apartments::remove_image);
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;
    use crate::repository::errors::RepositoryError;

    #[actix_web::test]
    async fn errors_render_envelopes() {
        let cases = [
            (ApiError::NotFound("Apartment not found"), 404, "Apartment not found"),
            (
                ApiError::BadRequest("No files uploaded".to_string()),
                400,
                "No files uploaded",
            ),
            (ApiError::Internal, 500, "Internal server error"),
        ];

        for (err, code, message) in cases {
            let response = err.error_response();
            assert_eq!(response.status().as_u16(), code);

            let body = to_bytes(response.into_body()).await.unwrap();
            let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(&body).unwrap();
            assert_eq!(envelope.code, code);
            assert_eq!(envelope.message, message);
            assert!(envelope.data.is_none());
        }
    }

    #[test]
    fn service_errors_hide_details() {
        let err = ApiError::from(ServiceError::Repository(RepositoryError::DatabaseError(
            "disk I/O error".to_string(),
        )));
        assert!(matches!(err, ApiError::Internal));
    }
}
