/// Data models for vine-service
///
/// - `user`: accounts and the register/login payloads
/// - `profile`: profiles with experience and education entries
/// - `post`: posts with their likes and comments
pub mod post;
pub mod profile;
pub mod user;

pub use post::{Comment, CreateCommentRequest, CreatePostRequest, Like, NewComment, NewPost, Post};
pub use profile::{
    Education, EducationRequest, Experience, ExperienceRequest, NewEducation, NewExperience,
    Profile, ProfileFields, ProfileUser, SocialLinks, UpsertProfileRequest,
};
pub use user::{LoginRequest, NewUser, RegisterRequest, TokenResponse, User};
