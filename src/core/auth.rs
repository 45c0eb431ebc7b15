//! Password hashing and operator lookup.
//!
//! Stored form is `salt$hexdigest` with a SHA-256 digest over `salt + raw`.
//! The salt is a fresh ULID, so two users with the same password never share
//! a hash. Authentication builds the execution context for the REPL; nothing
//! in the interpreter enforces it.

use crate::core::error::TallerError;
use crate::core::store::{EntityStore, Record};
use sha2::{Digest, Sha256};
use ulid::Ulid;

pub fn hash_password(raw: &str) -> String {
    let salt = Ulid::new().to_string();
    format!("{}${}", salt, digest(&salt, raw))
}

pub fn verify_password(raw: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, expected)) => digest(salt, raw) == expected,
        None => false,
    }
}

fn digest(salt: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Looks a user up by email and checks the password against the stored hash.
/// Returns the user record on success, `None` on unknown email or mismatch.
pub fn authenticate(
    users: &dyn EntityStore,
    email: &str,
    password: &str,
) -> Result<Option<Record>, TallerError> {
    let mut matches = users.find_by_field("email", email)?;
    if matches.is_empty() {
        return Ok(None);
    }
    let user = matches.remove(0);
    let stored = user
        .get("password_hash")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if verify_password(password, stored) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("pass123");
        assert!(verify_password("pass123", &stored));
        assert!(!verify_password("pass124", &stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("pass123"), hash_password("pass123"));
    }

    #[test]
    fn test_verify_rejects_malformed_stored_value() {
        assert!(!verify_password("pass123", "not-a-stored-hash"));
        assert!(!verify_password("pass123", ""));
    }
}
