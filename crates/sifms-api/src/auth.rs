//! Password hashing and verification.
//!
//! Registration stores only the argon2 PHC string; login verifies against it.
//! A malformed stored hash verifies as false rather than erroring, so login
//! failures stay indistinguishable from unknown users.

use argon2::{
  password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand_core::OsRng;

use crate::error::ApiError;

/// Hash `password` with a fresh random salt, returning the PHC string,
/// e.g. `$argon2id$v=19$…`.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify `password` against a stored PHC string.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(stored_hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_and_verify_round_trip() {
    let hash = hash_password("abcdef").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("abcdef", &hash));
    assert!(!verify_password("abcdeg", &hash));
  }

  #[test]
  fn same_password_hashes_differently() {
    let a = hash_password("abcdef").unwrap();
    let b = hash_password("abcdef").unwrap();
    assert_ne!(a, b);
  }

  #[test]
  fn malformed_stored_hash_verifies_false() {
    assert!(!verify_password("abcdef", "not-a-phc-string"));
  }
}
