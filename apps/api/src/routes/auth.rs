//! Signup and login.
//!
//! There is no authentication security here: passwords are
//! stored and compared in plain text, and login returns the same account
//! summary signup does. The only invariant worth defending is phone
//! uniqueness after normalization.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use dukaan_core::ops::{coerce_string, json_truthy};
use dukaan_core::validation::{validate_password, validate_signup_phone};
use dukaan_core::{normalize_phone, AccountSummary};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Signup body. `phone` is a loose value (clients send strings and raw
/// numbers); `password` must be an actual string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupBody {
    pub phone: Option<Value>,
    pub password: Option<Value>,
    pub name: Option<Value>,
}

/// Login body, same field rules as signup.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
    pub phone: Option<Value>,
    pub password: Option<Value>,
}

/// `POST /api/signup`
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignupBody>,
) -> Result<(StatusCode, Json<AccountSummary>), ApiError> {
    let raw_phone = body.phone.as_ref().map(coerce_string).unwrap_or_default();
    let phone = validate_signup_phone(&raw_phone)?;

    let password = match &body.password {
        Some(Value::String(password)) => password.clone(),
        _ => return Err(ApiError::InvalidPassword),
    };
    validate_password(&password)?;

    let name = body
        .name
        .as_ref()
        .filter(|v| json_truthy(v))
        .map(coerce_string)
        .unwrap_or_default();

    match state.store.users().signup(&phone, &password, &name).await? {
        Some(user) => Ok((StatusCode::CREATED, Json(AccountSummary::from(&user)))),
        None => Err(ApiError::Exists),
    }
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<AccountSummary>, ApiError> {
    let raw_phone = body.phone.as_ref().map(coerce_string).unwrap_or_default();
    let phone = normalize_phone(&raw_phone);
    if phone.is_empty() {
        return Err(ApiError::InvalidPhone);
    }

    let Some(user) = state.store.users().find_by_phone(&phone).await else {
        return Err(ApiError::NotFound);
    };

    // Plain-text comparison. A missing or non-string password never
    // matches.
    let supplied = body.password.as_ref().and_then(Value::as_str);
    if supplied != Some(user.password.as_str()) {
        return Err(ApiError::WrongPassword);
    }

    Ok(Json(AccountSummary::from(&user)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::routes::testing::{app, body_json, json_request};

    #[tokio::test]
    async fn test_signup_then_login_with_different_formatting() {
        let (app, _dir) = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                json!({"phone": "123-456-7890", "password": "secret", "name": "Asha"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["phone"], json!("1234567890"));
        assert!(created.get("password").is_none());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/login",
                json!({"phone": "1234567890", "password": "secret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let logged_in = body_json(response).await;
        assert_eq!(logged_in["id"], created["id"]);
        assert_eq!(logged_in["name"], json!("Asha"));
    }

    #[tokio::test]
    async fn test_duplicate_phone_conflicts_regardless_of_formatting() {
        let (app, _dir) = app().await;
        let first = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                json!({"phone": "1234567890", "password": "a"}),
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(json_request(
                "POST",
                "/api/signup",
                json!({"phone": "(123) 456-7890", "password": "b"}),
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(second).await["error"], json!("exists"));
    }

    #[tokio::test]
    async fn test_signup_validation_codes() {
        let (app, _dir) = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                json!({"phone": "12345", "password": "x"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], json!("invalid_phone"));

        for password in [json!(""), json!(12345), json!(null)] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/signup",
                    json!({"phone": "1234567890", "password": password}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response).await["error"],
                json!("invalid_password")
            );
        }
    }

    #[tokio::test]
    async fn test_login_error_codes() {
        let (app, _dir) = app().await;
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                json!({"phone": "1234567890", "password": "secret"}),
            ))
            .await
            .unwrap();

        // unknown phone
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                json!({"phone": "9999999999", "password": "secret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // wrong password
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                json!({"phone": "1234567890", "password": "nope"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["error"],
            json!("wrong_password")
        );

        // digit-free phone
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/login",
                json!({"phone": "abc", "password": "secret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], json!("invalid_phone"));
    }
}
