//! Product CRUD.
//!
//! Bodies are loose (`Option<Value>` fields) so that the
//! validation below - not serde - decides what `invalid_input` means:
//! `name` must be a non-empty string, `price` anything number-coercible,
//! `image` anything string-coercible (blank falls back to the placeholder
//! on create, to the existing image on update).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use dukaan_core::ops::{coerce_price, coerce_string};
use dukaan_core::validation::{validate_price, validate_product_name};
use dukaan_core::{Product, ProductDraft};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Create/update body. Every field optional; validation decides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductBody {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub image: Option<Value>,
}

/// Applies the product input rules; the error is always `invalid_input`.
fn parse_draft(body: ProductBody) -> Result<ProductDraft, ApiError> {
    let name = match body.name {
        Some(Value::String(name)) => name,
        _ => return Err(ApiError::InvalidInput),
    };
    validate_product_name(&name)?;

    let price = body
        .price
        .as_ref()
        .and_then(coerce_price)
        .ok_or(ApiError::InvalidInput)?;
    validate_price(price)?;

    let image = body
        .image
        .as_ref()
        .map(coerce_string)
        .filter(|s| !s.trim().is_empty());

    Ok(ProductDraft { name, price, image })
}

/// Parses an `{id}` path segment; anything non-numeric is `invalid_id`.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// `GET /api/products`
pub async fn list(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.products().list().await)
}

/// `GET /api/products/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    state
        .store
        .products()
        .get(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProductBody>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = parse_draft(body)?;
    let product = state.store.products().insert(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<ProductBody>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let draft = parse_draft(body)?;
    state
        .store
        .products()
        .update(id, draft)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `DELETE /api/products/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    if state.store.products().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
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
    async fn test_create_assigns_id_and_placeholder() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/products",
                json!({"name": "Desk Lamp", "price": 499}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["id"], json!(1));
        assert_eq!(
            body["image"],
            json!("https://via.placeholder.com/300?text=Desk%20Lamp")
        );
    }

    #[tokio::test]
    async fn test_create_accepts_numeric_string_price() {
        let (app, _dir) = app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/products",
                json!({"name": "Rug", "price": "1250.5"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["price"], json!(1250.5));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let (app, _dir) = app().await;
        for body in [
            json!({"price": 10}),                       // no name
            json!({"name": "", "price": 10}),           // empty name
            json!({"name": 42, "price": 10}),           // non-string name
            json!({"name": "X"}),                       // no price
            json!({"name": "X", "price": "not-a-number"}),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/products", body.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(body_json(response).await["error"], json!("invalid_input"));
        }
    }

    #[tokio::test]
    async fn test_get_update_delete_lifecycle() {
        let (app, _dir) = app().await;

        let created = body_json(
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/api/products",
                    json!({"name": "Rug", "price": 1250, "image": "rug.png"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_u64().unwrap();

        // read back
        let response = app
            .clone()
            .oneshot(bare_request("GET", &format!("/api/products/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // update with a blank image keeps the old one
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/products/{id}"),
                json!({"name": "Big Rug", "price": 1500, "image": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["name"], json!("Big Rug"));
        assert_eq!(updated["image"], json!("rug.png"));

        // delete
        let response = app
            .clone()
            .oneshot(bare_request("DELETE", &format!("/api/products/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // now it is gone
        let response = app
            .oneshot(bare_request("GET", &format!("/api/products/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_invalid_id() {
        let (app, _dir) = app().await;
        for (method, uri) in [
            ("GET", "/api/products/abc"),
            ("DELETE", "/api/products/abc"),
        ] {
            let response = app.clone().oneshot(bare_request(method, uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["error"], json!("invalid_id"));
        }
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found_and_file_untouched() {
        let (app, dir) = app().await;
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/products",
                json!({"name": "Rug", "price": 1250}),
            ))
            .await
            .unwrap();

        let path = dir.path().join("products.json");
        let before = std::fs::read(&path).unwrap();

        let response = app
            .oneshot(bare_request("DELETE", "/api/products/42"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
