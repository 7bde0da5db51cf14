use serde::{Deserialize, Serialize};

/// Length of a SHA-256 password digest in bytes
pub const DIGEST_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct User {
    /// User ID
    pub id: u32,
    /// Display name
    pub name: String,
    /// Email, the natural lookup key. Unique across active and
    /// deactivated accounts.
    pub email: String,
    /// SHA-256 digest of the password
    pub password_hash: [u8; DIGEST_LEN],
    /// Whether the account is active; deletes deactivate instead of removing
    pub is_active: bool,
}

impl User {
    pub fn new(id: u32, name: String, email: String, password_hash: [u8; DIGEST_LEN]) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            is_active: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User payload returned to clients; never carries the password digest
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            active: user.is_active,
        }
    }
}
