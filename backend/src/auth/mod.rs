//! Authentication module
//!
//! Argon2id credential hashing, HMAC-signed JWTs and the bearer-token
//! middleware guarding authenticated routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::TokenService;
pub use middleware::{require_auth, AuthUser};
pub use password::CredentialHasher;
