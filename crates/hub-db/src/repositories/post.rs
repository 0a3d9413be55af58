//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hub_core::{
    Comment, Post, PostFilter, PostRepository, PostSort, RepoResult, Share, Snowflake,
};

use crate::mappers::{CommentInsert, PostInsert};
use crate::models::{CommentModel, LikeModel, PostModel, ShareModel};

use super::error::{comment_not_found, map_db_error, post_not_found, raw_ids};

const POST_COLUMNS: &str = "id, author_id, content, images, tags, location, is_public, \
     original_post_id, created_at, updated_at";

// Null-tolerant predicates so one statement covers every filter combination:
// $1 search term, $2 tag list, $3 author
const FEED_FILTER: &str = r"
    is_public
    AND ($1::TEXT IS NULL
         OR content ILIKE '%' || $1 || '%'
         OR EXISTS (SELECT 1 FROM unnest(tags) AS t WHERE t ILIKE '%' || $1 || '%'))
    AND (cardinality($2::TEXT[]) = 0 OR tags && $2)
    AND ($3::BIGINT IS NULL OR author_id = $3)
";

fn feed_order(sort: PostSort) -> &'static str {
    match sort {
        PostSort::Newest => "created_at DESC",
        PostSort::Oldest => "created_at ASC",
        PostSort::Popular => {
            "(SELECT COUNT(*) FROM post_likes WHERE post_id = posts.id) DESC, created_at DESC"
        }
    }
}

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let insert = PostInsert::new(post);

        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, content, images, tags, location,
                               is_public, original_post_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.content)
        .bind(insert.images)
        .bind(insert.tags)
        .bind(insert.location)
        .bind(insert.is_public)
        .bind(insert.original_post_id)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &PostFilter, offset: i64, limit: i64) -> RepoResult<Vec<Post>> {
        let order = feed_order(filter.sort);

        let results = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS} FROM posts
            WHERE {FEED_FILTER}
            ORDER BY {order}
            OFFSET $4 LIMIT $5
            "
        ))
        .bind(filter.search.as_deref())
        .bind(&filter.tags)
        .bind(filter.author_id.map(Snowflake::into_inner))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &PostFilter) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM posts WHERE {FEED_FILTER}"
        ))
        .bind(filter.search.as_deref())
        .bind(&filter.tags)
        .bind(filter.author_id.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS} FROM posts
            WHERE author_id = $1 AND is_public
            ORDER BY created_at DESC
            "
        ))
        .bind(author_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // comments, likes and shares cascade via foreign keys
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn toggle_like(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        // Insert wins the race when two toggles arrive at once; the loser's
        // conflict turns into a delete, so the pair is never half-applied.
        let inserted = sqlx::query(
            r"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        if inserted > 0 {
            return Ok(true);
        }

        sqlx::query(
            r"
            DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(false)
    }

    #[instrument(skip(self))]
    async fn likes_for(
        &self,
        post_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, Snowflake)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, LikeModel>(
            r"
            SELECT post_id, user_id FROM post_likes WHERE post_id = ANY($1)
            ",
        )
        .bind(raw_ids(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|row| (Snowflake::new(row.post_id), Snowflake::new(row.user_id)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn add_comment(&self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);

        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(insert.id)
        .bind(insert.post_id)
        .bind(insert.author_id)
        .bind(insert.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_comment(&self, comment_id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, author_id, content, created_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(comment_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, comment_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn comments_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, author_id, content, created_at
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            ",
        )
        .bind(raw_ids(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_share(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO post_shares (post_id, user_id, shared_at)
            VALUES ($1, $2, NOW())
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn shares_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Share>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ShareModel>(
            r"
            SELECT post_id, user_id, shared_at
            FROM post_shares
            WHERE post_id = ANY($1)
            ORDER BY shared_at DESC
            ",
        )
        .bind(raw_ids(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Share::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }

    #[test]
    fn test_feed_order_variants() {
        assert_eq!(feed_order(PostSort::Newest), "created_at DESC");
        assert_eq!(feed_order(PostSort::Oldest), "created_at ASC");
        assert!(feed_order(PostSort::Popular).contains("post_likes"));
    }
}
