//! Health check.

use axum::Json;
use chrono::Utc;

use dukaan_core::ops::iso_timestamp;
use dukaan_core::PingResponse;

/// `GET /api/ping`
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        time: iso_timestamp(Utc::now()),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::routes::testing::{app, bare_request, body_json};

    #[tokio::test]
    async fn test_ping() {
        let (app, _dir) = app().await;
        let response = app.oneshot(bare_request("GET", "/api/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["ok"], serde_json::json!(true));
        assert!(body["time"].as_str().unwrap().ends_with('Z'));
    }
}
