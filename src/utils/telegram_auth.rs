use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signatures older than this are rejected even when valid.
pub const MAX_AUTH_AGE_SECS: i64 = 86_400;

/// The `user` member of a verified init-data payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InitDataError {
    #[error("init data is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("init data signature mismatch")]
    BadSignature,
    #[error("init data auth_date is too old")]
    Expired,
    #[error("init data user payload is malformed")]
    BadUser,
}

/// Verify a Telegram WebApp `initData` payload against the bot token.
///
/// The payload is a query-string of key/value pairs, one of which
/// (`hash`) signs the rest: the remaining pairs are percent-decoded,
/// formatted as `key=value`, sorted by key and joined with `\n`; the
/// signing key is the HMAC-SHA256 digest of the literal `"WebAppData"`
/// keyed by the bot token. Signatures are compared in constant time,
/// and an `auth_date` more than [`MAX_AUTH_AGE_SECS`] behind
/// `now_unix` is rejected even when the signature holds.
pub fn verify_init_data(
    init_data: &str,
    bot_token: &str,
    now_unix: i64,
) -> Result<TelegramUser, InitDataError> {
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(init_data.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let received_hash = pairs
        .iter()
        .find(|(k, _)| k == "hash")
        .map(|(_, v)| v.clone())
        .ok_or(InitDataError::MissingField("hash"))?;
    let received_hash =
        hex::decode(received_hash.as_bytes()).map_err(|_| InitDataError::BadSignature)?;

    let mut data_pairs: Vec<&(String, String)> =
        pairs.iter().filter(|(k, _)| k != "hash").collect();
    data_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let data_check_string = data_pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("\n");

    let mut secret = HmacSha256::new_from_slice(bot_token.as_bytes())
        .map_err(|_| InitDataError::BadSignature)?;
    secret.update(b"WebAppData");
    let secret_key = secret.finalize().into_bytes();

    let mut mac =
        HmacSha256::new_from_slice(&secret_key).map_err(|_| InitDataError::BadSignature)?;
    mac.update(data_check_string.as_bytes());
    let calculated = mac.finalize().into_bytes();

    if calculated.as_slice().ct_eq(received_hash.as_slice()).unwrap_u8() != 1 {
        return Err(InitDataError::BadSignature);
    }

    let auth_date: i64 = pairs
        .iter()
        .find(|(k, _)| k == "auth_date")
        .and_then(|(_, v)| v.parse().ok())
        .ok_or(InitDataError::MissingField("auth_date"))?;
    if now_unix - auth_date > MAX_AUTH_AGE_SECS {
        return Err(InitDataError::Expired);
    }

    let user_json = pairs
        .iter()
        .find(|(k, _)| k == "user")
        .map(|(_, v)| v.as_str())
        .ok_or(InitDataError::MissingField("user"))?;
    serde_json::from_str(user_json).map_err(|_| InitDataError::BadUser)
}
