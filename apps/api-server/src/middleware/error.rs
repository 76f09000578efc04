//! HTTP error mapping for domain errors.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use murmur_core::DomainError;
use murmur_shared::response::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

/// Wrapper giving `DomainError` an HTTP rendering.
#[derive(Debug)]
pub struct AppError(DomainError);

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match &self.0 {
            DomainError::Validation(detail) => {
                HttpResponse::UnprocessableEntity().json(ErrorResponse::validation(detail))
            }
            DomainError::Unauthenticated => {
                HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
            }
            DomainError::Forbidden(detail) => {
                HttpResponse::Forbidden().json(ErrorResponse::forbidden(*detail))
            }
            DomainError::NotFound(detail) => {
                HttpResponse::NotFound().json(ErrorResponse::not_found(detail))
            }
            DomainError::Conflict(detail) => {
                HttpResponse::Conflict().json(ErrorResponse::conflict(detail))
            }
            DomainError::Internal(detail) => {
                // The detail stays in the logs; the client gets a generic body.
                tracing::error!(error = %detail, "internal error");
                HttpResponse::InternalServerError().json(ErrorResponse::internal_error())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let cases = [
            (DomainError::Validation("bad".into()), 422),
            (DomainError::Unauthenticated, 401),
            (DomainError::Forbidden("cannot rate own post"), 403),
            (DomainError::NotFound("gone".into()), 404),
            (DomainError::Conflict("dup".into()), 409),
            (DomainError::Internal("boom".into()), 500),
        ];

        for (err, status) in cases {
            let err = AppError::from(err);
            assert_eq!(err.status_code().as_u16(), status);
            assert_eq!(err.error_response().status().as_u16(), status);
        }
    }

    #[actix_rt::test]
    async fn forbidden_body_carries_the_detail() {
        let err = AppError::from(DomainError::Forbidden("cannot rate own post"));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.status, 403);
        assert_eq!(parsed.detail.as_deref(), Some("cannot rate own post"));
    }
}
