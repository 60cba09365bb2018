use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::middleware::auth::Claims;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issue an HS256 access/refresh pair for the given user id.
pub fn issue_pair(
    user_id: i64,
    secret: &str,
    access_ttl_minutes: i64,
    refresh_ttl_days: i64,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let access = issue_token(
        user_id,
        secret,
        TOKEN_TYPE_ACCESS,
        Duration::minutes(access_ttl_minutes),
    )?;
    let refresh = issue_token(
        user_id,
        secret,
        TOKEN_TYPE_REFRESH,
        Duration::days(refresh_ttl_days),
    )?;
    Ok(TokenPair { access, refresh })
}

fn issue_token(
    user_id: i64,
    secret: &str,
    token_type: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + ttl).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        token_type: Some(token_type.to_string()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Exchange a refresh token for a fresh access token. Tokens of any
/// other type are rejected.
pub fn refresh_access(
    refresh_token: &str,
    secret: &str,
    access_ttl_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = decode_token(refresh_token, secret)?;
    if claims.token_type.as_deref() != Some(TOKEN_TYPE_REFRESH) {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSubject))?;
    issue_token(
        user_id,
        secret,
        TOKEN_TYPE_ACCESS,
        Duration::minutes(access_ttl_minutes),
    )
}
