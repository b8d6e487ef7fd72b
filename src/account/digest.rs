//! Credential digests

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the plaintext secret.
///
/// No salt and no work factor: equal secrets always produce equal digests.
/// This matches the stored format and is weak against offline guessing.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a plaintext secret against a stored digest
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}
