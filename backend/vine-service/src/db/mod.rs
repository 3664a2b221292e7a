/// Database access layer
///
/// Each store is an `async_trait` repository with a PostgreSQL
/// implementation. Services hold `Arc<dyn ...Repository>` so tests can swap
/// in in-memory or mocked stores.
///
/// List mutations (likes, comments, experience, education) are single
/// statements guarded by the relevant key or ownership predicate, so two
/// concurrent requests on the same document cannot lose each other's write.
use crate::error::Result;
use crate::models::{
    Comment, Like, NewComment, NewEducation, NewExperience, NewPost, NewUser, Post, Profile,
    ProfileFields, User,
};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use uuid::Uuid;

pub mod post_repo;
pub mod profile_repo;
pub mod user_repo;

pub use post_repo::PgPostRepository;
pub use profile_repo::PgProfileRepository;
pub use user_repo::PgUserRepository;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. `None` when the email is already registered.
    async fn create_user(&self, user: NewUser) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create the user's profile or merge `fields` into the existing one
    async fn upsert_profile(&self, user_id: Uuid, fields: ProfileFields) -> Result<Profile>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>>;

    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    /// Prepend an experience entry. `false` when the user has no profile.
    async fn add_experience(&self, user_id: Uuid, entry: NewExperience) -> Result<bool>;

    /// Remove one of the user's own experience entries; unknown ids are ignored
    async fn remove_experience(&self, user_id: Uuid, entry_id: Uuid) -> Result<()>;

    async fn add_education(&self, user_id: Uuid, entry: NewEducation) -> Result<bool>;

    async fn remove_education(&self, user_id: Uuid, entry_id: Uuid) -> Result<()>;

    /// Remove the profile and the account in one transaction. Posts are kept.
    async fn delete_account(&self, user_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    /// All posts, newest first
    async fn list_posts(&self) -> Result<Vec<Post>>;

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// Delete the post only if `author_id` wrote it; `true` when a row went away
    async fn delete_post(&self, post_id: Uuid, author_id: Uuid) -> Result<bool>;

    /// `false` when the user already liked the post
    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// `false` when the user had not liked the post
    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn likes(&self, post_id: Uuid) -> Result<Vec<Like>>;

    /// `false` when the post no longer exists
    async fn add_comment(&self, post_id: Uuid, comment: NewComment) -> Result<bool>;

    /// Delete the comment only if `author_id` wrote it
    async fn delete_comment(&self, post_id: Uuid, comment_id: Uuid, author_id: Uuid)
        -> Result<bool>;

    async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;
}
