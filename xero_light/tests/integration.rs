//! Integration tests for the user store and session guard over a real
//! (sqlite) data store.

mod common;

use serde_json::json;
use serial_test::serial;

use common::{callback_user, init_test_store};
use xero_light::{
    SessionState, User, UserError, UserStore, new_session_correlator, new_session_headers,
    resolve_session,
};

/// Turn the Set-Cookie headers of a fresh login into request headers, the
/// way a browser would replay them.
fn replay_as_request(headers: &http::HeaderMap) -> http::HeaderMap {
    let set_cookie = headers
        .get(http::header::SET_COOKIE)
        .expect("Set-Cookie must be present")
        .to_str()
        .expect("header value must be valid");
    let cookie_pair = set_cookie.split(';').next().expect("cookie pair");

    let mut request = http::HeaderMap::new();
    request.insert(http::header::COOKIE, cookie_pair.parse().unwrap());
    request
}

#[tokio::test]
#[serial]
async fn first_callback_creates_exactly_one_row() {
    init_test_store().await;

    let user = callback_user("a@b.com", "t1", &new_session_correlator());
    let created = UserStore::upsert_user(user).await.expect("upsert succeeds");

    assert!(created.id.is_some());
    assert_eq!(created.first_name, "A");
    assert_eq!(created.last_name, "B");
    assert_eq!(created.email, "a@b.com");
    assert_eq!(created.token_set, json!({"access_token": "t1"}));
    assert!(created.session.is_some());

    let fetched = UserStore::get_user_by_email("a@b.com")
        .await
        .expect("lookup succeeds")
        .expect("row exists");
    assert_eq!(fetched.id, created.id);
    assert_eq!(
        fetched.id_token_claims,
        json!({"email": "a@b.com", "given_name": "A", "family_name": "B"})
    );
}

#[tokio::test]
#[serial]
async fn second_callback_overwrites_without_second_row() {
    init_test_store().await;

    let first_session = new_session_correlator();
    let first = UserStore::upsert_user(callback_user("repeat@b.com", "t1", &first_session))
        .await
        .expect("first upsert succeeds");

    let second_session = new_session_correlator();
    let second = UserStore::upsert_user(callback_user("repeat@b.com", "t2", &second_session))
        .await
        .expect("second upsert succeeds");

    // Same primary key means the unique email constraint collapsed the two
    // callbacks onto one row.
    assert_eq!(first.id, second.id);
    assert_eq!(second.token_set, json!({"access_token": "t2"}));
    assert_ne!(first.session, second.session);

    let fetched = UserStore::get_user_by_email("repeat@b.com")
        .await
        .expect("lookup succeeds")
        .expect("row exists");
    assert_eq!(fetched.token_set, json!({"access_token": "t2"}));
    assert_eq!(fetched.session.as_deref(), Some(second_session.as_str()));
    // First insert's created_at survives the overwrite
    assert_eq!(fetched.created_at, first.created_at);
}

#[tokio::test]
#[serial]
async fn upsert_rejects_invalid_email() {
    init_test_store().await;

    let user = callback_user("not-an-email", "t1", &new_session_correlator());
    let result = UserStore::upsert_user(user).await;
    assert!(matches!(result, Err(UserError::InvalidEmail(_))));
}

#[tokio::test]
#[serial]
async fn session_lookup_matches_exact_correlator() {
    init_test_store().await;

    let correlator = new_session_correlator();
    UserStore::upsert_user(callback_user("session@b.com", "t1", &correlator))
        .await
        .expect("upsert succeeds");

    let found = UserStore::get_user_by_session(&correlator)
        .await
        .expect("lookup succeeds");
    assert_eq!(found.map(|u| u.email), Some("session@b.com".to_string()));

    let missing = UserStore::get_user_by_session("no-such-correlator")
        .await
        .expect("lookup succeeds");
    assert!(missing.is_none());
}

#[tokio::test]
#[serial]
async fn new_login_invalidates_previous_correlator() {
    init_test_store().await;

    let old = new_session_correlator();
    UserStore::upsert_user(callback_user("rotate@b.com", "t1", &old))
        .await
        .expect("upsert succeeds");

    let new = new_session_correlator();
    UserStore::upsert_user(callback_user("rotate@b.com", "t2", &new))
        .await
        .expect("upsert succeeds");

    assert!(
        UserStore::get_user_by_session(&old)
            .await
            .expect("lookup succeeds")
            .is_none()
    );
    assert!(
        UserStore::get_user_by_session(&new)
            .await
            .expect("lookup succeeds")
            .is_some()
    );
}

#[tokio::test]
#[serial]
async fn tenant_switch_persists_active_tenant() {
    init_test_store().await;

    UserStore::upsert_user(callback_user("tenant@b.com", "t1", &new_session_correlator()))
        .await
        .expect("upsert succeeds");

    let new_tenant = json!({"tenantId": "tenant-2", "tenantName": "Second Org"});
    UserStore::update_active_tenant("tenant@b.com", &new_tenant)
        .await
        .expect("update succeeds");

    let fetched = UserStore::get_user_by_email("tenant@b.com")
        .await
        .expect("lookup succeeds")
        .expect("row exists");
    assert_eq!(fetched.active_tenant, new_tenant);
}

#[tokio::test]
#[serial]
async fn refreshed_token_set_is_persisted() {
    init_test_store().await;

    UserStore::upsert_user(callback_user(
        "refresh@b.com",
        "t1",
        &new_session_correlator(),
    ))
    .await
    .expect("upsert succeeds");

    let refreshed = json!({"access_token": "t2", "refresh_token": "r2"});
    UserStore::update_token_set("refresh@b.com", &refreshed)
        .await
        .expect("update succeeds");

    let fetched = UserStore::get_user_by_email("refresh@b.com")
        .await
        .expect("lookup succeeds")
        .expect("row exists");
    assert_eq!(fetched.token_set, refreshed);
}

#[tokio::test]
#[serial]
async fn resolve_session_walks_the_three_states() {
    init_test_store().await;

    // Anonymous: no cookie at all
    let state = resolve_session(&http::HeaderMap::new())
        .await
        .expect("resolution succeeds");
    assert!(matches!(state, SessionState::Anonymous));

    // Stale: verified cookie with no matching row
    let orphan = new_session_headers(&new_session_correlator()).expect("signing succeeds");
    let state = resolve_session(&replay_as_request(&orphan))
        .await
        .expect("resolution succeeds");
    assert!(matches!(state, SessionState::Stale));

    // Authenticated: cookie correlator matches a stored row
    let correlator = new_session_correlator();
    UserStore::upsert_user(callback_user("resolve@b.com", "t1", &correlator))
        .await
        .expect("upsert succeeds");
    let live = new_session_headers(&correlator).expect("signing succeeds");
    let state = resolve_session(&replay_as_request(&live))
        .await
        .expect("resolution succeeds");
    match state {
        SessionState::Authenticated(user) => assert_eq!(user.email, "resolve@b.com"),
        other => panic!("expected Authenticated, got {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn logout_leaves_row_and_tokens_intact() {
    init_test_store().await;

    let correlator = new_session_correlator();
    UserStore::upsert_user(callback_user("retain@b.com", "t1", &correlator))
        .await
        .expect("upsert succeeds");

    // Logout only clears the browser cookie; nothing touches the store.
    let headers = xero_light::clear_session_headers().expect("clearing succeeds");
    assert!(headers.get(http::header::SET_COOKIE).is_some());

    let fetched = UserStore::get_user_by_email("retain@b.com")
        .await
        .expect("lookup succeeds")
        .expect("row still exists");
    assert_eq!(fetched.token_set, json!({"access_token": "t1"}));
    assert_eq!(fetched.session.as_deref(), Some(correlator.as_str()));
}

// User construction stays consistent with what the store returns.
#[tokio::test]
#[serial]
async fn upsert_returns_the_persisted_document_fields() {
    init_test_store().await;

    let user: User = callback_user("verbatim@b.com", "t1", &new_session_correlator());
    let claims = user.id_token_claims.clone();
    let tenant = user.active_tenant.clone();

    let created = UserStore::upsert_user(user).await.expect("upsert succeeds");
    assert_eq!(created.id_token_claims, claims);
    assert_eq!(created.active_tenant, tenant);
    assert_eq!(created.address, "6011");
}
