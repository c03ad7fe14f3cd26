//! # API Client
//!
//! Typed reqwest wrapper over the REST API. One method per endpoint; every
//! non-success response is decoded into [`SyncError::Api`] carrying the
//! machine-readable error code from the body.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use dukaan_core::{
    AccountSummary, PingResponse, Product, ProductDraft, Transaction, TransactionRequest,
};

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};

/// HTTP client for the Dukaan REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from configuration (validated first).
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(ApiClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    // =========================================================================
    // Health
    // =========================================================================

    pub async fn ping(&self) -> SyncResult<PingResponse> {
        let response = self.http.get(self.url("ping")).send().await?;
        decode(response).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn products(&self) -> SyncResult<Vec<Product>> {
        let response = self.http.get(self.url("products")).send().await?;
        decode(response).await
    }

    pub async fn product(&self, id: u64) -> SyncResult<Product> {
        let response = self
            .http
            .get(self.url(&format!("products/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    /// Creates a product. Strict about the status: anything but 201 is a
    /// failure, even another 2xx.
    pub async fn create_product(&self, draft: &ProductDraft) -> SyncResult<Product> {
        debug!(name = %draft.name, "creating product");
        let response = self
            .http
            .post(self.url("products"))
            .json(draft)
            .send()
            .await?;
        if response.status() != StatusCode::CREATED {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn update_product(&self, id: u64, draft: &ProductDraft) -> SyncResult<Product> {
        debug!(id, "updating product");
        let response = self
            .http
            .put(self.url(&format!("products/{id}")))
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_product(&self, id: u64) -> SyncResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("products/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    pub async fn signup(
        &self,
        phone: &str,
        password: &str,
        name: &str,
    ) -> SyncResult<AccountSummary> {
        let response = self
            .http
            .post(self.url("signup"))
            .json(&json!({ "phone": phone, "password": password, "name": name }))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn login(&self, phone: &str, password: &str) -> SyncResult<AccountSummary> {
        let response = self
            .http
            .post(self.url("login"))
            .json(&json!({ "phone": phone, "password": password }))
            .send()
            .await?;
        decode(response).await
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> SyncResult<Transaction> {
        let response = self
            .http
            .post(self.url("transactions"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// Order history by account id (`?userId=`).
    pub async fn transactions_for_user(&self, user_id: i64) -> SyncResult<Vec<Transaction>> {
        let response = self
            .http
            .get(self.url("transactions"))
            .query(&[("userId", user_id.to_string())])
            .send()
            .await?;
        decode(response).await
    }

    /// Order history by phone (path form, digits preferred).
    pub async fn transactions_for_phone(&self, phone: &str) -> SyncResult<Vec<Transaction>> {
        let response = self
            .http
            .get(self.url(&format!("transactions/{phone}")))
            .send()
            .await?;
        decode(response).await
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Parses a success body, or turns an error response into `SyncError::Api`.
async fn decode<T: DeserializeOwned>(response: Response) -> SyncResult<T> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json().await?)
}

/// Decodes the `{"error": "<code>"}` body; responses without one (proxies,
/// crashes) get a generic code so the status is never lost.
async fn api_error(response: Response) -> SyncError {
    let status = response.status().as_u16();
    let code = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| "unknown_error".to_string());
    SyncError::Api { status, code }
}
