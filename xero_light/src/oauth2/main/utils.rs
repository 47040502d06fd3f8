use std::{sync::LazyLock, time::Duration};

use crate::oauth2::config::XERO_HTTP_TIMEOUT_MS;

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(*XERO_HTTP_TIMEOUT_MS))
        .build()
        .expect("Failed to build HTTP client")
});

/// Shared outbound client with the fixed provider timeout.
pub(crate) fn get_client() -> &'static reqwest::Client {
    &HTTP_CLIENT
}
