use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use murmur_core::domain::PostUpdate;
use murmur_core::error::RepoError;
use murmur_core::ports::{PostRepository, RatingRepository, UserRepository};

use super::entity::{post, rating, user};
use super::repos::{PostgresPostRepository, PostgresRatingRepository, PostgresUserRepository};

fn post_model(id: i64, owner_id: i64, published: bool) -> post::Model {
    post::Model {
        id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        published,
        created_at: Utc::now().into(),
        owner_id,
    }
}

#[tokio::test]
async fn find_post_by_id_maps_to_domain() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(7, 1, true)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let found = repo.find_by_id(7).await.unwrap().unwrap();
    assert_eq!(found.id, 7);
    assert_eq!(found.owner_id, 1);
    assert_eq!(found.title, "Test Post");
}

#[tokio::test]
async fn find_post_by_id_missing_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
async fn find_user_by_email_maps_to_domain() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: 3,
            email: "a@x.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: Utc::now().into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, 3);
    assert_eq!(found.email, "a@x.com");
}

#[tokio::test]
async fn delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.delete(99).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn update_missing_post_is_not_found() {
    // An UPDATE touching no rows surfaces as RecordNotUpdated.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let changes = PostUpdate {
        title: Some("new".to_owned()),
        ..Default::default()
    };
    assert!(matches!(
        repo.update(99, changes).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn toggle_publish_is_a_single_row_update() {
    // One UPDATE statement flips the flag, then the row is re-read.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results(vec![vec![post_model(7, 1, false)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.toggle_published(7).await.unwrap();
    assert!(!post.published);
}

#[tokio::test]
async fn toggle_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.toggle_published(99).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn rating_exists_checks_the_pair() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![rating::Model {
            user_id: 1,
            post_id: 2,
        }]])
        .append_query_results(vec![Vec::<rating::Model>::new()])
        .into_connection();

    let repo = PostgresRatingRepository::new(db);

    assert!(repo.exists(1, 2).await.unwrap());
    assert!(!repo.exists(1, 3).await.unwrap());
}

#[tokio::test]
async fn rating_delete_reports_affected_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresRatingRepository::new(db);

    assert!(repo.delete(1, 2).await.unwrap());
    assert!(!repo.delete(1, 2).await.unwrap());
}
