//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, OnConflict};
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect, Set};

use gazette_core::domain::{Author, Category, Comment, Post, User};
use gazette_core::error::RepoError;
use gazette_core::ports::{
    AppointmentRepository, AuthorRepository, CategoryRepository, CommentRepository, PostRepository,
    UserRepository,
};

use super::entity::appointment::Entity as AppointmentEntity;
use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::category_subscription::{self, Entity as CategorySubscriptionEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_category::{self, Entity as PostCategoryEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL appointment repository.
pub type PostgresAppointmentRepository = PostgresBaseRepository<AppointmentEntity>;

/// Row shape for SUM aggregates; `None` when the filter matched no rows.
#[derive(FromQueryResult)]
struct RatingSum {
    total: Option<i64>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Author>, RepoError> {
        let result = AuthorEntity::find()
            .filter(author::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn set_rating(&self, id: i64, rating: i64) -> Result<(), RepoError> {
        let result = AuthorEntity::update_many()
            .set(author::ActiveModel {
                rating: Set(rating),
                ..Default::default()
            })
            .filter(author::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn subscribe(&self, category_id: i64, user_id: i64) -> Result<(), RepoError> {
        let link = category_subscription::ActiveModel {
            category_id: Set(category_id),
            user_id: Set(user_id),
        };

        // ON CONFLICT DO NOTHING keeps re-subscribing idempotent.
        CategorySubscriptionEntity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    category_subscription::Column::CategoryId,
                    category_subscription::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn unsubscribe(&self, category_id: i64, user_id: i64) -> Result<(), RepoError> {
        CategorySubscriptionEntity::delete_many()
            .filter(category_subscription::Column::CategoryId.eq(category_id))
            .filter(category_subscription::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn subscriber_ids(&self, category_id: i64) -> Result<Vec<i64>, RepoError> {
        let rows = CategorySubscriptionEntity::find()
            .filter(category_subscription::Column::CategoryId.eq(category_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.user_id).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_author_id(&self, author_id: i64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn adjust_rating(&self, id: i64, delta: i32) -> Result<(), RepoError> {
        // Single in-database increment; no read-modify-write window.
        let result = PostEntity::update_many()
            .col_expr(
                post::Column::Rating,
                Expr::col(post::Column::Rating).add(delta),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn sum_ratings_by_author(&self, author_id: i64) -> Result<i64, RepoError> {
        let sum = PostEntity::find()
            .select_only()
            .column_as(post::Column::Rating.sum(), "total")
            .filter(post::Column::AuthorId.eq(author_id))
            .into_model::<RatingSum>()
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        // SUM over zero rows is NULL; treat it as zero.
        Ok(sum.and_then(|row| row.total).unwrap_or(0))
    }

    async fn attach_category(&self, post_id: i64, category_id: i64) -> Result<(), RepoError> {
        let link = post_category::ActiveModel {
            post_id: Set(post_id),
            category_id: Set(category_id),
        };

        PostCategoryEntity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    post_category::Column::PostId,
                    post_category::Column::CategoryId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn detach_category(&self, post_id: i64, category_id: i64) -> Result<(), RepoError> {
        PostCategoryEntity::delete_many()
            .filter(post_category::Column::PostId.eq(post_id))
            .filter(post_category::Column::CategoryId.eq(category_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn category_ids(&self, post_id: i64) -> Result<Vec<i64>, RepoError> {
        let rows = PostCategoryEntity::find()
            .filter(post_category::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.category_id).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn adjust_rating(&self, id: i64, delta: i32) -> Result<(), RepoError> {
        let result = CommentEntity::update_many()
            .col_expr(
                comment::Column::Rating,
                Expr::col(comment::Column::Rating).add(delta),
            )
            .filter(comment::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn sum_ratings_by_user(&self, user_id: i64) -> Result<i64, RepoError> {
        let sum = CommentEntity::find()
            .select_only()
            .column_as(comment::Column::Rating.sum(), "total")
            .filter(comment::Column::UserId.eq(user_id))
            .into_model::<RatingSum>()
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(sum.and_then(|row| row.total).unwrap_or(0))
    }
}

impl AppointmentRepository for PostgresAppointmentRepository {}
