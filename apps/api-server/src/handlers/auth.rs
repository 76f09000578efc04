use actix_web::{HttpResponse, web};

use murmur_shared::dto::{AuthResponse, LoginRequest};

use crate::middleware::AppResult;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let issued = state.auth.login(&body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: issued.access_token,
        token_type: issued.token_type.to_string(),
        expires_in: issued.expires_in,
    }))
}
