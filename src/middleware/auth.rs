use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::utils::token::{decode_token, TOKEN_TYPE_ACCESS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub token_type: Option<String>,
}

impl Claims {
    /// The user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, crate::error::Error> {
        self.sub
            .parse()
            .map_err(|_| crate::error::Error::Unauthorized("invalid_token".to_string()))
    }
}

/// Require a bearer access token; the decoded claims are stored in the
/// request extensions for handlers to pick up.
pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response();
    };

    let config = crate::config::get_config();
    match decode_token(token, &config.jwt_secret) {
        Ok(claims) => {
            // Refresh tokens never grant access to API routes.
            if claims.token_type.as_deref() != Some(TOKEN_TYPE_ACCESS) {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error":"invalid_token"})),
                )
                    .into_response();
            }
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_token"})),
        )
            .into_response(),
    }
}
