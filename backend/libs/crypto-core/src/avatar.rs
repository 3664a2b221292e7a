/// Email-derived avatar identifiers (Gravatar)
use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "//www.gravatar.com/avatar";

/// Compute the avatar digest for an email: SHA-256 of the trimmed, lowercased address
pub fn email_digest(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// Avatar URL for an email (200px, PG rated, mystery-man fallback)
pub fn gravatar_url(email: &str) -> String {
    format!("{}/{}?s=200&r=pg&d=mm", GRAVATAR_BASE, email_digest(email))
}
