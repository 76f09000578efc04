use actix_web::{HttpResponse, web};

use murmur_core::domain::User;
use murmur_shared::dto::{RegisterUserRequest, UserResponse};

use crate::middleware::AppResult;
use crate::state::AppState;

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
    }
}

/// POST /api/users
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user = state.auth.register(body.email, body.password).await?;

    Ok(HttpResponse::Created().json(user_response(user)))
}

/// GET /api/users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let user = state.auth.get_user(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}
