use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::models::user::{User, DIGEST_LEN};

/// Rejection reasons for account writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountWriteError {
    #[error("user not found")]
    NotFound,

    #[error("email already claimed")]
    EmailTaken,
}

/// In-memory store for user accounts.
///
/// The email index is the uniqueness authority: a write claims its email
/// through the index entry before the account becomes visible, so two
/// simultaneous registrations of one email cannot both succeed.
///
/// Deletes deactivate rather than remove, so a deactivated account still
/// holds its email claim and uniqueness stays unambiguous across active
/// and inactive accounts.
pub struct UserStore {
    users: DashMap<u32, Arc<User>>,
    emails: DashMap<String, u32>,
    next_id: AtomicU32,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Add a user, claiming the email and assigning the next ID
    pub fn insert(
        &self,
        name: String,
        email: String,
        password_hash: [u8; DIGEST_LEN],
    ) -> Result<Arc<User>, AccountWriteError> {
        match self.emails.entry(email.clone()) {
            Entry::Occupied(_) => Err(AccountWriteError::EmailTaken),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(id);

                let user = Arc::new(User::new(id, name, email, password_hash));
                self.users.insert(id, Arc::clone(&user));
                Ok(user)
            }
        }
    }

    pub fn get(&self, id: u32) -> Option<Arc<User>> {
        self.users.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up a user by email, active or not
    pub fn get_by_email(&self, email: &str) -> Option<Arc<User>> {
        let id = *self.emails.get(email)?;
        self.get(id)
    }

    /// Replace a stored user's profile fields, re-claiming the email when
    /// it changes. The freed email becomes available to other accounts.
    pub fn update(
        &self,
        id: u32,
        name: String,
        email: String,
        password_hash: [u8; DIGEST_LEN],
    ) -> Result<Arc<User>, AccountWriteError> {
        let current = self.get(id).ok_or(AccountWriteError::NotFound)?;

        if email != current.email {
            match self.emails.entry(email.clone()) {
                Entry::Occupied(entry) => {
                    if *entry.get() != id {
                        return Err(AccountWriteError::EmailTaken);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.emails.remove(&current.email);
        }

        let mut entry = self.users.get_mut(&id).ok_or(AccountWriteError::NotFound)?;
        let updated = Arc::new(User {
            id,
            name,
            email,
            password_hash,
            is_active: entry.value().is_active,
        });
        *entry.value_mut() = Arc::clone(&updated);
        Ok(updated)
    }

    /// Soft delete: flips the active flag, keeping the record and its
    /// email claim
    /// Returns false if the user does not exist
    pub fn deactivate(&self, id: u32) -> bool {
        match self.users.get_mut(&id) {
            Some(mut entry) => {
                let mut user = (**entry.value()).clone();
                user.is_active = false;
                *entry.value_mut() = Arc::new(user);
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> Vec<Arc<User>> {
        let mut users: Vec<_> = self
            .users
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        users.sort_by_key(|user| user.id);
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
