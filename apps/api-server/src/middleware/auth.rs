//! Request identity extraction from the `Authorization` header.

use std::fmt;
use std::future::{Ready, ready};

use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};

use murmur_core::ports::AuthError;
use murmur_shared::response::ErrorResponse;

use crate::state::AppState;

/// The authenticated caller of the current request. Extracting this on a
/// handler makes the route require a valid bearer token.
///
/// Only the token signature and expiry are checked here. Whether the user
/// behind the id still exists is the services' concern, so a token for a
/// deleted account fails there, not here.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i64,
}

#[derive(Debug)]
pub struct AuthenticationError(AuthError);

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AuthError::InvalidToken | AuthError::MissingAuth => StatusCode::UNAUTHORIZED,
            AuthError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // One response body for every authentication failure. The client
        // must not learn which check rejected the token.
        match self.0 {
            AuthError::InvalidToken | AuthError::MissingAuth => {
                HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
            }
            AuthError::Hashing(_) => {
                HttpResponse::InternalServerError().json(ErrorResponse::internal_error())
            }
        }
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_identity(req))
    }
}

fn extract_identity(req: &HttpRequest) -> Result<Identity, AuthenticationError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthenticationError(AuthError::Hashing(
            "application state not configured".to_string(),
        )))?;

    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or(AuthenticationError(AuthError::MissingAuth))?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthenticationError(AuthError::InvalidToken))?;

    let user_id = state
        .tokens
        .verify(token)
        .map_err(AuthenticationError)?;

    Ok(Identity { user_id })
}
