//! Argon2id password hashing and verification.
//!
//! Hashes use the PHC string format so that algorithm parameters and salt are
//! embedded in the hash itself. The administrator password is configured as
//! such a hash in `ADMIN_PASSWORD_HASH`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a PHC-formatted Argon2 hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminAuthError {
    /// No usable hash is configured. Not the caller's fault.
    #[error("administrator password hash is not configured or invalid: {0}")]
    Misconfigured(String),

    #[error("wrong administrator password")]
    Denied,
}

/// Check an administrator login attempt against the configured hash.
pub fn verify_admin_password(
    password: &str,
    configured_hash: Option<&str>,
) -> Result<(), AdminAuthError> {
    let hash = configured_hash
        .ok_or_else(|| AdminAuthError::Misconfigured("ADMIN_PASSWORD_HASH is unset".into()))?;
    match verify_password(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AdminAuthError::Denied),
        Err(e) => Err(AdminAuthError::Misconfigured(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("impacto-2026").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify_password("impacto-2026", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_admin_password_accepted() {
        let hash = hash_password("impacto-2026").unwrap();
        assert_eq!(verify_admin_password("impacto-2026", Some(&hash)), Ok(()));
    }

    #[test]
    fn test_admin_wrong_password_denied() {
        let hash = hash_password("impacto-2026").unwrap();
        assert_eq!(
            verify_admin_password("guess", Some(&hash)),
            Err(AdminAuthError::Denied)
        );
    }

    #[test]
    fn test_missing_or_garbled_hash_is_misconfiguration() {
        assert!(matches!(
            verify_admin_password("impacto-2026", None),
            Err(AdminAuthError::Misconfigured(_))
        ));
        assert!(matches!(
            verify_admin_password("impacto-2026", Some("not-a-phc-string")),
            Err(AdminAuthError::Misconfigured(_))
        ));
    }
}
