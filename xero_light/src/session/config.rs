use std::{env, sync::LazyLock};

/// Cookie carrying the signed session correlator.
pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("recentSession".to_string())
});

/// Cookie lifetime in seconds; the correlator has no server-side expiry
/// beyond this.
pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3600) // Default to 1 hour if not set or invalid
});

pub(super) static SESSION_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| match env::var("SESSION_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) => "default_secret_key_change_in_production"
            .to_string()
            .into_bytes(),
    });
