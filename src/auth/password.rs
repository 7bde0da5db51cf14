use sha2::{Digest, Sha256};

use crate::models::user::DIGEST_LEN;

/// Compute the SHA-256 digest of a plaintext password
pub fn hash_password(password: &str) -> [u8; DIGEST_LEN] {
    let digest = Sha256::digest(password.as_bytes());
    digest.into()
}

/// Compare the digest of a submitted password against the stored digest
/// using constant-time comparison to prevent timing attacks
///
/// Returns false on any length or content mismatch.
pub fn verify_password(submitted: &str, stored_digest: &[u8]) -> bool {
    let computed = hash_password(submitted);

    stored_digest.len() == computed.len()
        && computed
            .iter()
            .zip(stored_digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
