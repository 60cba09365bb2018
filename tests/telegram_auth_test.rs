use hmac::{Hmac, Mac};
use sha2::Sha256;

use fiptster_backend::utils::telegram_auth::{verify_init_data, InitDataError, MAX_AUTH_AGE_SECS};

type HmacSha256 = Hmac<Sha256>;

const BOT_TOKEN: &str = "7000000001:AAtestbottokentestbottokentest";
const NOW: i64 = 1_750_000_000;

/// Sign a set of decoded pairs the way Telegram does and encode the
/// whole thing as an init-data query string.
fn signed_init_data(pairs: &[(&str, &str)], bot_token: &str) -> String {
    let mut sorted: Vec<(&str, &str)> = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let data_check_string = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("\n");

    let mut secret = HmacSha256::new_from_slice(bot_token.as_bytes()).unwrap();
    secret.update(b"WebAppData");
    let secret_key = secret.finalize().into_bytes();

    let mut mac = HmacSha256::new_from_slice(&secret_key).unwrap();
    mac.update(data_check_string.as_bytes());
    let hash = hex::encode(mac.finalize().into_bytes());

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.append_pair("hash", &hash);
    serializer.finish()
}

fn fresh_auth_date() -> String {
    (NOW - 60).to_string()
}

#[test]
fn accepts_a_valid_signed_payload() {
    let auth_date = fresh_auth_date();
    let user = r#"{"id":987654321,"first_name":"Alice","username":"alice_fipt","photo_url":"https://t.me/i/userpic/320/alice.jpg"}"#;
    let init_data = signed_init_data(
        &[
            ("query_id", "AAH4eXs9AAAAAPh5ez0pRHX-"),
            ("user", user),
            ("auth_date", &auth_date),
        ],
        BOT_TOKEN,
    );

    let verified = verify_init_data(&init_data, BOT_TOKEN, NOW).expect("valid payload");
    assert_eq!(verified.id, 987_654_321);
    assert_eq!(verified.username.as_deref(), Some("alice_fipt"));
    assert_eq!(verified.first_name.as_deref(), Some("Alice"));
}

#[test]
fn rejects_a_tampered_field() {
    let auth_date = fresh_auth_date();
    let user = r#"{"id":987654321,"first_name":"Alice"}"#;
    let init_data = signed_init_data(
        &[("user", user), ("auth_date", &auth_date)],
        BOT_TOKEN,
    );

    // Swap the embedded user id after signing.
    let tampered = init_data.replace("987654321", "123456789");
    assert_eq!(
        verify_init_data(&tampered, BOT_TOKEN, NOW),
        Err(InitDataError::BadSignature)
    );
}

#[test]
fn rejects_a_signature_from_another_bot() {
    let auth_date = fresh_auth_date();
    let init_data = signed_init_data(
        &[("user", r#"{"id":1}"#), ("auth_date", &auth_date)],
        "7000000002:AAsomeotherbotsomeotherbotsome",
    );
    assert_eq!(
        verify_init_data(&init_data, BOT_TOKEN, NOW),
        Err(InitDataError::BadSignature)
    );
}

#[test]
fn rejects_a_stale_auth_date() {
    let stale = (NOW - MAX_AUTH_AGE_SECS - 1).to_string();
    let init_data = signed_init_data(
        &[("user", r#"{"id":987654321}"#), ("auth_date", &stale)],
        BOT_TOKEN,
    );
    assert_eq!(
        verify_init_data(&init_data, BOT_TOKEN, NOW),
        Err(InitDataError::Expired)
    );
}

#[test]
fn accepts_auth_date_just_inside_the_window() {
    let edge = (NOW - MAX_AUTH_AGE_SECS).to_string();
    let init_data = signed_init_data(
        &[("user", r#"{"id":987654321}"#), ("auth_date", &edge)],
        BOT_TOKEN,
    );
    assert!(verify_init_data(&init_data, BOT_TOKEN, NOW).is_ok());
}

#[test]
fn rejects_when_hash_is_missing() {
    let init_data = "user=%7B%22id%22%3A1%7D&auth_date=1750000000";
    assert_eq!(
        verify_init_data(init_data, BOT_TOKEN, NOW),
        Err(InitDataError::MissingField("hash"))
    );
}

#[test]
fn rejects_a_signed_payload_without_user() {
    let auth_date = fresh_auth_date();
    let init_data = signed_init_data(
        &[("query_id", "AAH4eXs9"), ("auth_date", &auth_date)],
        BOT_TOKEN,
    );
    assert_eq!(
        verify_init_data(&init_data, BOT_TOKEN, NOW),
        Err(InitDataError::MissingField("user"))
    );
}

#[test]
fn rejects_a_signed_payload_without_auth_date() {
    let init_data = signed_init_data(&[("user", r#"{"id":1}"#)], BOT_TOKEN);
    assert_eq!(
        verify_init_data(&init_data, BOT_TOKEN, NOW),
        Err(InitDataError::MissingField("auth_date"))
    );
}

#[test]
fn rejects_malformed_user_json() {
    let auth_date = fresh_auth_date();
    let init_data = signed_init_data(
        &[("user", "not-json"), ("auth_date", &auth_date)],
        BOT_TOKEN,
    );
    assert_eq!(
        verify_init_data(&init_data, BOT_TOKEN, NOW),
        Err(InitDataError::BadUser)
    );
}
