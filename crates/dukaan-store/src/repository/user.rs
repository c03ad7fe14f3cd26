//! # User Repository
//!
//! Account storage. Phones are stored normalized and must be unique after
//! normalization; the uniqueness check and the insert run under the users
//! lock so two simultaneous signups cannot both win.

use chrono::Utc;
use tracing::debug;

use dukaan_core::ops::find_user_by_phone;
use dukaan_core::User;

use crate::collection::Collection;
use crate::error::StoreResult;
use crate::store::Store;

/// Repository for user account operations.
#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub(crate) fn new(store: Store) -> Self {
        UserRepository { store }
    }

    /// Lists the whole user collection.
    pub async fn list(&self) -> Vec<User> {
        self.store.read(Collection::Users).await
    }

    /// Looks up a user by phone; raw or formatted numbers both work.
    pub async fn find_by_phone(&self, raw_phone: &str) -> Option<User> {
        let users = self.list().await;
        find_user_by_phone(&users, raw_phone).cloned()
    }

    /// Creates an account. `phone` must already be normalized and validated
    /// by the caller. Returns `None` when the phone is already registered
    /// (the caller's 409).
    ///
    /// The account id is the epoch-millisecond timestamp of the signup -
    /// time-based rather than max+1, matching existing account data.
    pub async fn signup(
        &self,
        phone: &str,
        password: &str,
        name: &str,
    ) -> StoreResult<Option<User>> {
        let _guard = self.store.lock(Collection::Users).await;
        let mut users: Vec<User> = self.store.read(Collection::Users).await;

        if find_user_by_phone(&users, phone).is_some() {
            return Ok(None);
        }

        let user = User {
            id: Utc::now().timestamp_millis(),
            phone: phone.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };

        users.push(user.clone());
        self.store.write(Collection::Users, &users).await?;

        debug!(id = user.id, phone = %user.phone, "user created");
        Ok(Some(user))
    }
}

// =============================================================================
// Tests
// =============================================================================
