//! Shared cryptographic helpers for Vine services
//!
//! - `jwt`: identity token issuing and verification
//! - `password`: Argon2id password hashing
//! - `avatar`: email-derived avatar identifiers

pub mod avatar;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtKeys, TokenError};
pub use password::{hash_password, verify_password, PasswordError};
