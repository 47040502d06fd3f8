use std::{env, sync::LazyLock};

pub(super) static XERO_CLIENT_ID: LazyLock<String> =
    LazyLock::new(|| env::var("XERO_CLIENT_ID").expect("XERO_CLIENT_ID must be set"));

pub(super) static XERO_CLIENT_SECRET: LazyLock<String> =
    LazyLock::new(|| env::var("XERO_CLIENT_SECRET").expect("XERO_CLIENT_SECRET must be set"));

pub(super) static XERO_REDIRECT_URI: LazyLock<String> =
    LazyLock::new(|| env::var("XERO_REDIRECT_URI").expect("XERO_REDIRECT_URI must be set"));

pub(super) static XERO_AUTH_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("XERO_AUTH_URL")
        .ok()
        .unwrap_or("https://login.xero.com/identity/connect/authorize".to_string())
});

pub(super) static XERO_TOKEN_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("XERO_TOKEN_URL")
        .ok()
        .unwrap_or("https://identity.xero.com/connect/token".to_string())
});

pub(super) static XERO_SCOPES: LazyLock<String> = LazyLock::new(|| {
    env::var("XERO_SCOPES").ok().unwrap_or(
        "offline_access openid profile email accounting.transactions.read accounting.settings"
            .to_string(),
    )
});

/// Fixed outbound timeout for every provider call.
pub(crate) static XERO_HTTP_TIMEOUT_MS: LazyLock<u64> = LazyLock::new(|| {
    env::var("XERO_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2000)
});
