use actix_web::{HttpResponse, web};

use murmur_core::domain::{Page, PostUpdate, PostWithLikes};
use murmur_shared::dto::{CreatePostRequest, PostListQuery, PostResponse, UpdatePostRequest};

use crate::middleware::{AppResult, Identity};
use crate::state::AppState;

fn post_response(post: PostWithLikes) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        published: post.published,
        created_at: post.created_at,
        owner_id: post.owner_id,
        likes: post.likes,
    }
}

fn post_responses(posts: Vec<PostWithLikes>) -> Vec<PostResponse> {
    posts.into_iter().map(post_response).collect()
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = Page::new(query.limit, query.skip);

    let posts = state.posts.list(query.search, page).await?;
    Ok(HttpResponse::Ok().json(post_responses(posts)))
}

/// GET /api/posts/my
pub async fn list_mine(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = Page::new(query.limit, query.skip);

    let posts = state.posts.list_mine(identity.user_id, page).await?;
    Ok(HttpResponse::Ok().json(post_responses(posts)))
}

/// GET /api/posts/latest
pub async fn latest(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let post = state.posts.latest().await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/posts/{id}
pub async fn get(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    let post = state
        .posts
        .create(identity.user_id, body.title, body.content, body.published)
        .await?;
    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let changes = PostUpdate {
        title: body.title,
        content: body.content,
        published: body.published,
    };

    let post = state
        .posts
        .update(identity.user_id, path.into_inner(), changes)
        .await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts/{id}/publish
pub async fn toggle_publish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .toggle_publish(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
