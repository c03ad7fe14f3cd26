//! Transaction recording and order history.
//!
//! The POST endpoint is permissive: checkout clients send
//! whatever they have and the documented defaults fill the rest (see
//! [`dukaan_core::TransactionRequest`]). Recorded transactions are
//! append-only - there is no update or delete here.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use dukaan_core::{Transaction, TransactionRequest};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Order-history query: `?userId=` takes precedence over `?phone=`;
/// neither returns the whole log (admin/debug view).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: Option<String>,
    pub phone: Option<String>,
}

/// `POST /api/transactions`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state.store.transactions().append(&request).await?;
    Ok(Json(transaction))
}

/// `GET /api/transactions?userId=&phone=`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<Transaction>> {
    let repo = state.store.transactions();

    if let Some(user_id) = query.user_id.filter(|s| !s.is_empty()) {
        return Json(repo.for_user(&user_id).await);
    }
    if let Some(phone) = query.phone.filter(|s| !s.is_empty()) {
        return Json(repo.for_phone(&phone).await);
    }
    Json(repo.list().await)
}

/// `GET /api/transactions/{phone}` - path form of the phone lookup.
pub async fn by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Json<Vec<Transaction>> {
    Json(state.store.transactions().for_phone(&phone).await)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::routes::testing::{app, bare_request, body_json, json_request};

    #[tokio::test]
    async fn test_empty_body_records_guest_paid_transaction() {
        let (app, _dir) = app().await;
        let response = app
            .oneshot(json_request("POST", "/api/transactions", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let tx = body_json(response).await;
        assert_eq!(tx["id"], json!(1));
        assert_eq!(tx["status"], json!("PAID"));
        assert_eq!(tx["phone"], json!("guest"));
        assert_eq!(tx["total"], json!(0.0));
        assert_eq!(tx["items"], json!([]));
        assert_eq!(tx["payment"], json!(null));
    }

    #[tokio::test]
    async fn test_user_id_resolves_phone_from_account() {
        let (app, _dir) = app().await;

        let account = body_json(
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/api/signup",
                    json!({"phone": "123-456-7890", "password": "pw"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        let user_id = account["id"].as_i64().unwrap();

        let tx = body_json(
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/api/transactions",
                    json!({"userId": user_id, "amount": 750.0}),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(tx["phone"], json!("1234567890"));
        assert_eq!(tx["total"], json!(750.0));

        // history by userId
        let by_user = body_json(
            app.clone()
                .oneshot(bare_request(
                    "GET",
                    &format!("/api/transactions?userId={user_id}"),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(by_user.as_array().unwrap().len(), 1);

        // history by phone, path form, formatted number
        let by_phone = body_json(
            app.oneshot(bare_request("GET", "/api/transactions/123-456-7890"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(by_phone.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_full_checkout_payload_round_trips() {
        let (app, _dir) = app().await;
        let payload = json!({
            "phone": "9876543210",
            "items": [
                {"id": 1, "name": "Rug", "price": 1250.0, "quantity": 2},
                {"id": 3, "name": "Lamp", "price": 499.0, "quantity": 1}
            ],
            "total": 2999.0,
            "payment": {"method": "UPI", "details": {"upiId": "asha@upi"}},
            "status": "PLACED"
        });

        let tx = body_json(
            app.clone()
                .oneshot(json_request("POST", "/api/transactions", payload))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(tx["status"], json!("PLACED"));
        assert_eq!(tx["payment"]["method"], json!("UPI"));
        assert_eq!(tx["items"].as_array().unwrap().len(), 2);

        // the log keeps it verbatim
        let all = body_json(
            app.oneshot(bare_request("GET", "/api/transactions"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(all[0]["payment"]["details"]["upiId"], json!("asha@upi"));
    }

    #[tokio::test]
    async fn test_user_id_filter_is_exact_text() {
        let (app, _dir) = app().await;
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/transactions",
                json!({"userId": 42}),
            ))
            .await
            .unwrap();

        let hits = body_json(
            app.clone()
                .oneshot(bare_request("GET", "/api/transactions?userId=42"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(hits.as_array().unwrap().len(), 1);

        let misses = body_json(
            app.oneshot(bare_request("GET", "/api/transactions?userId=042"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(misses.as_array().unwrap().len(), 0);
    }
}
