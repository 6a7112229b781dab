//! Business logic services
//!
//! Services coordinate the credential hasher, the token service and the
//! account repository.

pub mod account;

pub use account::AccountService;
