/// Post service - posts, likes and comments
///
/// Every mutation reads the post first so a missing post is reported before
/// anything else, then issues one guarded statement. Ownership is checked
/// between the read and the write, and the write itself repeats the
/// ownership predicate.
use crate::db::PostRepository;
use crate::error::{AppError, Result};
use crate::middleware::{check_comment_ownership, check_post_ownership};
use crate::models::{Comment, Like, NewComment, NewPost, Post};
use crate::services::UserService;
use std::sync::Arc;
use uuid::Uuid;

pub const POST_NOT_FOUND: &str = "Post not found";
pub const COMMENT_NOT_FOUND: &str = "Comment does not exist";

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: UserService,
}

fn post_not_found() -> AppError {
    AppError::NotFound(POST_NOT_FOUND.to_string())
}

fn require_text(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(vec![crate::error::FieldError::new(
            "text",
            "Text is required",
        )]));
    }
    Ok(trimmed)
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: UserService) -> Self {
        Self { posts, users }
    }

    async fn existing_post(&self, post_id: Uuid) -> Result<Post> {
        self.posts.find_post(post_id).await?.ok_or_else(post_not_found)
    }

    /// Create a post carrying the author's current name and avatar
    pub async fn create_post(&self, user_id: Uuid, text: &str) -> Result<Post> {
        let text = require_text(text)?;
        let (name, avatar) = self.users.author_snapshot(user_id).await?;

        let post = self
            .posts
            .create_post(NewPost {
                id: Uuid::new_v4(),
                author_id: user_id,
                text: text.to_string(),
                name,
                avatar,
            })
            .await?;

        tracing::info!(post_id = %post.id, %user_id, "post created");
        Ok(post)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.posts.list_posts().await
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        self.existing_post(post_id).await
    }

    pub async fn delete_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        let post = self.existing_post(post_id).await?;
        check_post_ownership(user_id, &post)?;

        if !self.posts.delete_post(post_id, user_id).await? {
            // Removed by a concurrent request after our read
            return Err(post_not_found());
        }

        tracing::info!(%post_id, %user_id, "post deleted");
        Ok(())
    }

    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<Vec<Like>> {
        self.existing_post(post_id).await?;

        if !self.posts.add_like(post_id, user_id).await? {
            return Err(AppError::Conflict("Post already liked".to_string()));
        }
        self.posts.likes(post_id).await
    }

    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<Vec<Like>> {
        self.existing_post(post_id).await?;

        if !self.posts.remove_like(post_id, user_id).await? {
            return Err(AppError::Conflict("Post has not yet been liked".to_string()));
        }
        self.posts.likes(post_id).await
    }

    pub async fn add_comment(&self, user_id: Uuid, post_id: Uuid, text: &str) -> Result<Vec<Comment>> {
        let text = require_text(text)?;
        self.existing_post(post_id).await?;
        let (name, avatar) = self.users.author_snapshot(user_id).await?;

        let comment = NewComment {
            id: Uuid::new_v4(),
            author_id: user_id,
            text: text.to_string(),
            name,
            avatar,
        };
        if !self.posts.add_comment(post_id, comment).await? {
            return Err(post_not_found());
        }
        self.posts.comments(post_id).await
    }

    pub async fn delete_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Vec<Comment>> {
        let post = self.existing_post(post_id).await?;
        let comment = post
            .comment(comment_id)
            .ok_or_else(|| AppError::NotFound(COMMENT_NOT_FOUND.to_string()))?;
        check_comment_ownership(user_id, comment)?;

        if !self.posts.delete_comment(post_id, comment_id, user_id).await? {
            return Err(AppError::NotFound(COMMENT_NOT_FOUND.to_string()));
        }
        self.posts.comments(post_id).await
    }
}
