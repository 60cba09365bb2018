use fiptster_backend::utils::token::{
    decode_token, issue_pair, refresh_access, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH,
};

const SECRET: &str = "test_secret_key";

#[test]
fn pair_carries_typed_claims_for_the_user() {
    let pair = issue_pair(42, SECRET, 30, 7).expect("pair");

    let access = decode_token(&pair.access, SECRET).expect("access decodes");
    assert_eq!(access.sub, "42");
    assert_eq!(access.token_type.as_deref(), Some(TOKEN_TYPE_ACCESS));

    let refresh = decode_token(&pair.refresh, SECRET).expect("refresh decodes");
    assert_eq!(refresh.sub, "42");
    assert_eq!(refresh.token_type.as_deref(), Some(TOKEN_TYPE_REFRESH));
}

#[test]
fn refresh_token_mints_a_new_access_token() {
    let pair = issue_pair(7, SECRET, 30, 7).expect("pair");
    let access = refresh_access(&pair.refresh, SECRET, 30).expect("refresh works");
    let claims = decode_token(&access, SECRET).expect("new access decodes");
    assert_eq!(claims.sub, "7");
    assert_eq!(claims.token_type.as_deref(), Some(TOKEN_TYPE_ACCESS));
}

#[test]
fn access_token_cannot_be_used_as_refresh() {
    let pair = issue_pair(7, SECRET, 30, 7).expect("pair");
    assert!(refresh_access(&pair.access, SECRET, 30).is_err());
}

#[test]
fn wrong_secret_is_rejected() {
    let pair = issue_pair(7, SECRET, 30, 7).expect("pair");
    assert!(decode_token(&pair.access, "another_secret").is_err());
}

#[test]
fn expired_access_token_is_rejected() {
    // Default decoding leeway is 60 seconds; go well past it.
    let pair = issue_pair(7, SECRET, -5, 7).expect("pair");
    assert!(decode_token(&pair.access, SECRET).is_err());
}
