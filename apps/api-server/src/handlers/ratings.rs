use actix_web::{HttpResponse, web};

use murmur_shared::dto::DetailResponse;

use crate::middleware::{AppResult, Identity};
use crate::state::AppState;

/// POST /api/posts/{id}/ratings
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .ratings
        .add(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(DetailResponse::new("rating is saved")))
}

/// DELETE /api/posts/{id}/ratings
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .ratings
        .remove(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
