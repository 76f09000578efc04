//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DbConn, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
};

use murmur_core::domain::{NewPost, NewUser, Page, Post, PostFilter, PostUpdate, PostWithLikes, User};
use murmur_core::error::RepoError;
use murmur_core::ports::{PostRepository, RatingRepository, UserRepository};

use super::entity::{post, rating, user};

/// Translate a SeaORM error into the repository taxonomy. Unique and
/// foreign-key violations become `Constraint`: they are the backstop signal
/// the services turn into `Conflict`.
fn map_db_err(e: DbErr) -> RepoError {
    if let Some(
        SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg),
    ) = e.sql_err()
    {
        return RepoError::Constraint(msg);
    }
    match e {
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            id: NotSet,
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            created_at: Set(Utc::now().into()),
        };

        let inserted = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// Mask an email for logging to keep PII out of logs. Works on chars, not
/// bytes, so a multi-byte first character never splits mid-boundary.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => "***".to_string(),
        },
        None => "***".to_string(),
    }
}

/// Query-result row for a post joined with its like count.
#[derive(Debug, FromQueryResult)]
struct PostWithLikesRow {
    id: i64,
    title: String,
    content: String,
    published: bool,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
    owner_id: i64,
    likes: i64,
}

impl From<PostWithLikesRow> for PostWithLikes {
    fn from(row: PostWithLikesRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            published: row.published,
            created_at: row.created_at.into(),
            owner_id: row.owner_id,
            likes: row.likes,
        }
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Base select joining the like count onto each post. The count is
    /// recomputed here on every read; nothing stores it.
    fn select_with_likes() -> Select<post::Entity> {
        post::Entity::find()
            .left_join(rating::Entity)
            .column_as(rating::Column::UserId.count(), "likes")
            .group_by(post::Column::Id)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: NotSet,
            title: Set(new_post.title),
            content: Set(new_post.content),
            published: Set(new_post.published),
            created_at: Set(Utc::now().into()),
            owner_id: Set(new_post.owner_id),
        };

        let inserted = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let result = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_with_likes(&self, id: i64) -> Result<Option<PostWithLikes>, RepoError> {
        let row = Self::select_with_likes()
            .filter(post::Column::Id.eq(id))
            .into_model::<PostWithLikesRow>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        filter: PostFilter,
        page: Page,
    ) -> Result<Vec<PostWithLikes>, RepoError> {
        let mut query = Self::select_with_likes();

        query = match filter {
            PostFilter::Published { title_contains } => {
                let mut q = query.filter(post::Column::Published.eq(true));
                if let Some(needle) = title_contains {
                    // LIKE '%needle%': case-sensitive containment.
                    q = q.filter(post::Column::Title.contains(&needle));
                }
                q
            }
            PostFilter::OwnedBy(owner_id) => query.filter(post::Column::OwnerId.eq(owner_id)),
        };

        let rows = query
            .order_by_desc(post::Column::CreatedAt)
            .offset(page.skip)
            .limit(page.limit)
            .into_model::<PostWithLikesRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn latest_published(&self) -> Result<Option<PostWithLikes>, RepoError> {
        let row = Self::select_with_likes()
            .filter(post::Column::Published.eq(true))
            .order_by_desc(post::Column::CreatedAt)
            .into_model::<PostWithLikesRow>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: i64, changes: PostUpdate) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Set(id),
            title: changes.title.map_or(NotSet, Set),
            content: changes.content.map_or(NotSet, Set),
            published: changes.published.map_or(NotSet, Set),
            created_at: NotSet,
            owner_id: NotSet,
        };

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => map_db_err(other),
        })?;
        Ok(updated.into())
    }

    async fn toggle_published(&self, id: i64) -> Result<Post, RepoError> {
        // One `SET published = NOT published` statement: the flip is atomic
        // at the row level, so concurrent toggles serialize instead of both
        // writing the same stale negation.
        let result = post::Entity::update_many()
            .col_expr(
                post::Column::Published,
                Expr::col(post::Column::Published).not(),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// PostgreSQL rating repository.
pub struct PostgresRatingRepository {
    db: DbConn,
}

impl PostgresRatingRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn insert(&self, user_id: i64, post_id: i64) -> Result<(), RepoError> {
        let model = rating::ActiveModel {
            user_id: Set(user_id),
            post_id: Set(post_id),
        };

        // A duplicate pair violates the composite primary key and comes back
        // as RepoError::Constraint.
        rating::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn exists(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError> {
        let found = rating::Entity::find_by_id((user_id, post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(found.is_some())
    }

    async fn delete(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError> {
        let result = rating::Entity::delete_by_id((user_id, post_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}
