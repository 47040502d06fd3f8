use std::{env, sync::LazyLock};

pub(super) static XERO_CONNECTIONS_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("XERO_CONNECTIONS_URL")
        .ok()
        .unwrap_or("https://api.xero.com/connections".to_string())
});

pub(super) static XERO_ACCOUNTING_API_BASE: LazyLock<String> = LazyLock::new(|| {
    env::var("XERO_ACCOUNTING_API_BASE")
        .ok()
        .unwrap_or("https://api.xero.com/api.xro/2.0".to_string())
});
