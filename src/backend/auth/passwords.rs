//! Password hashing
//!
//! bcrypt with the configured cost. Verification of a malformed stored hash
//! counts as a mismatch rather than an error, so a corrupt row cannot be
//! used to tell accounts apart.

use bcrypt::{hash, verify, BcryptError};

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("Password verification error: {:?}", e);
            false
        }
    }
}
