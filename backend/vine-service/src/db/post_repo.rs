use super::PostRepository;
use crate::error::{AppError, Result};
use crate::models::{Comment, Like, NewComment, NewPost, Post};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    name: String,
    avatar: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct LikeRow {
    post_id: Uuid,
    user_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    post_id: Uuid,
    #[sqlx(flatten)]
    comment: Comment,
}

impl PostRow {
    fn into_post(self, likes: Vec<Like>, comments: Vec<Comment>) -> Post {
        Post {
            id: self.id,
            user: self.user_id,
            text: self.text,
            name: self.name,
            avatar: self.avatar,
            likes,
            comments,
            created_at: self.created_at,
        }
    }
}

fn is_missing_post(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn hydrate(&self, rows: Vec<PostRow>) -> Result<Vec<Post>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let likes = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT post_id, user_id
            FROM post_likes
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let comments = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT post_id, id, user_id, text, name, avatar, created_at
            FROM post_comments
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut likes_by_post: HashMap<Uuid, Vec<Like>> = HashMap::new();
        for row in likes {
            likes_by_post
                .entry(row.post_id)
                .or_default()
                .push(Like { user: row.user_id });
        }
        let mut comments_by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in comments {
            comments_by_post.entry(row.post_id).or_default().push(row.comment);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let likes = likes_by_post.remove(&row.id).unwrap_or_default();
                let comments = comments_by_post.remove(&row.id).unwrap_or_default();
                row.into_post(likes, comments)
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, text, name, avatar, created_at
            "#,
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(&post.text)
        .bind(&post.name)
        .bind(&post.avatar)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_post(Vec::new(), Vec::new()))
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, text, name, avatar, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, text, name, avatar, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn delete_post(&self, post_id: Uuid, author_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(author_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected() == 1),
            Err(err) if is_missing_post(&err) => Err(AppError::NotFound("Post not found".into())),
            Err(err) => Err(err.into()),
        }
    }

    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn likes(&self, post_id: Uuid) -> Result<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT user_id
            FROM post_likes
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn add_comment(&self, post_id: Uuid, comment: NewComment) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_comments (id, post_id, user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id)
        .bind(post_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .bind(&comment.name)
        .bind(&comment.avatar)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) if is_missing_post(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM post_comments WHERE id = $1 AND post_id = $2 AND user_id = $3",
        )
        .bind(comment_id)
        .bind(post_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, user_id, text, name, avatar, created_at
            FROM post_comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
