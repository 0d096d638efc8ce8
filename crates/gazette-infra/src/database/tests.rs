use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

use gazette_core::domain::{Post, PostKind};
use gazette_core::error::RepoError;
use gazette_core::ports::{BaseRepository, CommentRepository, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};

#[tokio::test]
async fn find_post_by_id_maps_the_row() {
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 7,
            author_id: 1,
            kind: post::Kind::News,
            title: "Test Post".to_owned(),
            body: "Content".to_owned(),
            rating: 0,
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.id, 7);
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.kind, PostKind::News);
}

#[tokio::test]
async fn adjust_rating_issues_one_update() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    repo.adjust_rating(7, 1).await.unwrap();
}

#[tokio::test]
async fn adjust_rating_on_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(matches!(
        repo.adjust_rating(999, -1).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn post_rating_sum_coalesces_null_to_zero() {
    // SUM over an empty filter comes back as one NULL row.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![BTreeMap::from([("total", Value::BigInt(None))])]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert_eq!(repo.sum_ratings_by_author(1).await.unwrap(), 0);
}

#[tokio::test]
async fn comment_rating_sum_returns_the_aggregate() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![BTreeMap::from([(
            "total",
            Value::BigInt(Some(15)),
        )])]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    assert_eq!(repo.sum_ratings_by_user(3).await.unwrap(), 15);
}
