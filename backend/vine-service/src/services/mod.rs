/// Business logic layer
///
/// Services validate input, apply ownership rules and call the repository
/// traits. They never touch the database directly.
pub mod posts;
pub mod profiles;
pub mod users;

pub use posts::PostService;
pub use profiles::ProfileService;
pub use users::UserService;
