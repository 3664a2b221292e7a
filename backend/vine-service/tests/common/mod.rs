//! In-memory stores and request helpers for HTTP tests
//!
//! `MemoryStore` implements every repository trait over one shared state so
//! account deletion can touch users and profiles together, the way the
//! PostgreSQL transaction does. Lists are kept newest first.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, App};
use async_trait::async_trait;
use chrono::Utc;
use crypto_core::JwtKeys;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use vine_service::db::{PostRepository, ProfileRepository, UserRepository};
use vine_service::models::{
    Comment, Like, NewComment, NewEducation, NewExperience, NewPost, NewUser, Post, Profile,
    ProfileFields, ProfileUser, SocialLinks, User,
};
use vine_service::{AppError, AppState, Result};

pub const TEST_SECRET: &str = "vine-test-secret";

#[derive(Default)]
struct State {
    users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }
}

fn merge(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<Option<User>> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar: user.avatar,
            created_at: Utc::now(),
        };
        state.users.push(created.clone());
        Ok(Some(created))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn upsert_profile(&self, user_id: Uuid, fields: ProfileFields) -> Result<Profile> {
        let mut state = self.state.lock().unwrap();

        if let Some(profile) = state.profiles.iter_mut().find(|p| p.user.id == user_id) {
            merge(&mut profile.company, fields.company);
            merge(&mut profile.website, fields.website);
            merge(&mut profile.location, fields.location);
            merge(&mut profile.bio, fields.bio);
            merge(&mut profile.githubusername, fields.githubusername);
            merge(&mut profile.social.youtube, fields.youtube);
            merge(&mut profile.social.twitter, fields.twitter);
            merge(&mut profile.social.facebook, fields.facebook);
            merge(&mut profile.social.linkedin, fields.linkedin);
            merge(&mut profile.social.instagram, fields.instagram);
            if let Some(status) = fields.status {
                profile.status = status;
            }
            if let Some(skills) = fields.skills {
                profile.skills = skills;
            }
            return Ok(profile.clone());
        }

        let user = state
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let profile = Profile {
            id: Uuid::new_v4(),
            user: ProfileUser {
                id: user.id,
                name: user.name,
                avatar: user.avatar,
            },
            company: fields.company,
            website: fields.website,
            location: fields.location,
            bio: fields.bio,
            status: fields.status.unwrap_or_default(),
            githubusername: fields.githubusername,
            skills: fields.skills.unwrap_or_default(),
            social: SocialLinks {
                youtube: fields.youtube,
                twitter: fields.twitter,
                facebook: fields.facebook,
                linkedin: fields.linkedin,
                instagram: fields.instagram,
            },
            experience: Vec::new(),
            education: Vec::new(),
            created_at: Utc::now(),
        };
        state.profiles.insert(0, profile.clone());
        Ok(profile)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let state = self.state.lock().unwrap();
        Ok(state.profiles.iter().find(|p| p.user.id == user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.state.lock().unwrap().profiles.clone())
    }

    async fn add_experience(&self, user_id: Uuid, entry: NewExperience) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.profiles.iter_mut().find(|p| p.user.id == user_id) {
            Some(profile) => {
                profile.experience.insert(0, entry.into_entry());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_experience(&self, user_id: Uuid, entry_id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(profile) = state.profiles.iter_mut().find(|p| p.user.id == user_id) {
            profile.experience.retain(|e| e.id != entry_id);
        }
        Ok(())
    }

    async fn add_education(&self, user_id: Uuid, entry: NewEducation) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.profiles.iter_mut().find(|p| p.user.id == user_id) {
            Some(profile) => {
                profile.education.insert(0, entry.into_entry());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_education(&self, user_id: Uuid, entry_id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(profile) = state.profiles.iter_mut().find(|p| p.user.id == user_id) {
            profile.education.retain(|e| e.id != entry_id);
        }
        Ok(())
    }

    async fn delete_account(&self, user_id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.profiles.retain(|p| p.user.id != user_id);
        state.users.retain(|u| u.id != user_id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let created = Post {
            id: post.id,
            user: post.author_id,
            text: post.text,
            name: post.name,
            avatar: post.avatar,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().posts.insert(0, created.clone());
        Ok(created)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.state.lock().unwrap().posts.clone())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|p| p.id == post_id).cloned())
    }

    async fn delete_post(&self, post_id: Uuid, author_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state
            .posts
            .retain(|p| !(p.id == post_id && p.user == author_id));
        Ok(state.posts.len() < before)
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        if post.is_liked_by(user_id) {
            return Ok(false);
        }
        post.likes.insert(0, Like { user: user_id });
        Ok(true)
    }

    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(false);
        };
        match post.likes.iter().position(|l| l.user == user_id) {
            Some(index) => {
                post.likes.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn likes(&self, post_id: Uuid) -> Result<Vec<Like>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.likes.clone())
            .unwrap_or_default())
    }

    async fn add_comment(&self, post_id: Uuid, comment: NewComment) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(false);
        };
        post.comments.insert(
            0,
            Comment {
                id: comment.id,
                user: comment.author_id,
                text: comment.text,
                name: comment.name,
                avatar: comment.avatar,
                created_at: Utc::now(),
            },
        );
        Ok(true)
    }

    async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(false);
        };
        match post
            .comments
            .iter()
            .position(|c| c.id == comment_id && c.user == author_id)
        {
            Some(index) => {
                post.comments.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.comments.clone())
            .unwrap_or_default())
    }
}

pub fn test_keys() -> Arc<JwtKeys> {
    Arc::new(JwtKeys::new(TEST_SECRET, 3600))
}

pub fn test_state(store: &MemoryStore) -> AppState {
    AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        test_keys(),
    )
}

/// Full route table over the given store
pub async fn setup_test_app(
    store: &MemoryStore,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = test_state(store);
    test::init_service(App::new().configure(|cfg| vine_service::configure(cfg, &state))).await
}

/// Register through the API and return the issued token
pub async fn register<S>(app: &S, name: &str, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "name": name, "email": email, "password": "secret123" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "registration failed: {}", resp.status());

    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

pub fn user_id(token: &str) -> Uuid {
    test_keys().user_id_from_token(token).unwrap()
}

/// Create a minimal profile for the token's user
pub async fn create_profile<S>(app: &S, token: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/profile")
        .insert_header(("x-auth-token", token))
        .set_json(json!({ "status": "Developer", "skills": "rust, sql" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "profile creation failed: {}", resp.status());
    test::read_body_json(resp).await
}

pub async fn create_post<S>(app: &S, token: &str, text: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("x-auth-token", token))
        .set_json(json!({ "text": text }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "post creation failed: {}", resp.status());
    test::read_body_json(resp).await
}
