//! # Transaction Repository
//!
//! Append-only order log. Transactions are created once and never mutated
//! or deleted through the API; everything else is a filtered read.

use chrono::Utc;
use tracing::info;

use dukaan_core::ops::{build_transaction, transactions_for_phone, transactions_for_user};
use dukaan_core::{ids::next_id, Transaction, TransactionRequest, User};

use crate::collection::Collection;
use crate::error::StoreResult;
use crate::store::Store;

/// Repository for the transaction log.
#[derive(Clone)]
pub struct TransactionRepository {
    store: Store,
}

impl TransactionRepository {
    pub(crate) fn new(store: Store) -> Self {
        TransactionRepository { store }
    }

    /// Lists the whole transaction log (admin/debug view).
    pub async fn list(&self) -> Vec<Transaction> {
        self.store.read(Collection::Transactions).await
    }

    /// Records a transaction from a permissive request, resolving the phone
    /// attribution chain against the current user collection.
    pub async fn append(&self, request: &TransactionRequest) -> StoreResult<Transaction> {
        // Users are read outside the transactions lock: attribution only
        // needs a point-in-time snapshot.
        let users: Vec<User> = self.store.read(Collection::Users).await;

        let _guard = self.store.lock(Collection::Transactions).await;
        let mut transactions: Vec<Transaction> = self.store.read(Collection::Transactions).await;

        let id = next_id(transactions.iter().map(|t| t.id));
        let transaction = build_transaction(id, request, &users, Utc::now());

        transactions.push(transaction.clone());
        self.store
            .write(Collection::Transactions, &transactions)
            .await?;

        info!(
            id = transaction.id,
            phone = %transaction.phone,
            user_id = ?transaction.user_id,
            "transaction saved"
        );
        Ok(transaction)
    }

    /// Transactions attributed to a user id (text-compared, wire style).
    pub async fn for_user(&self, user_id_param: &str) -> Vec<Transaction> {
        transactions_for_user(&self.list().await, user_id_param)
    }

    /// Transactions attributed to a phone number (normalized compare).
    pub async fn for_phone(&self, raw_phone: &str) -> Vec<Transaction> {
        transactions_for_phone(&self.list().await, raw_phone)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use serde_json::json;

    async fn open_temp() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_ids_and_defaults() {
        let (store, _dir) = open_temp().await;
        let repo = store.transactions();
        let a = repo.append(&TransactionRequest::default()).await.unwrap();
        let b = repo.append(&TransactionRequest::default()).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, "PAID");
        assert_eq!(a.phone, "guest");
    }

    #[tokio::test]
    async fn test_phone_resolved_from_user_record() {
        let (store, _dir) = open_temp().await;
        let user = store
            .users()
            .signup("1234567890", "pw", "Asha")
            .await
            .unwrap()
            .unwrap();

        let request = TransactionRequest {
            user_id: Some(user.id),
            ..Default::default()
        };
        let tx = store.transactions().append(&request).await.unwrap();
        assert_eq!(tx.phone, "1234567890");
        assert_eq!(tx.user_id, Some(user.id));

        let mine = store.transactions().for_user(&user.id.to_string()).await;
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_for_phone_accepts_formatted_numbers() {
        let (store, _dir) = open_temp().await;
        let request = TransactionRequest {
            phone: Some(json!("1234567890")),
            ..Default::default()
        };
        store.transactions().append(&request).await.unwrap();

        let found = store.transactions().for_phone("123-456-7890").await;
        assert_eq!(found.len(), 1);
    }
}
