//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and the administrator password check.

pub mod password;
