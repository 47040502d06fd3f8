use std::sync::Once;

use serde_json::json;
use xero_light::User;

static INIT_ENV: Once = Once::new();

/// Point the global data store at a throwaway sqlite file before its
/// LazyLock initializes. Must run before any store access in this process.
pub fn init_test_env() {
    INIT_ENV.call_once(|| {
        let db_path = std::env::temp_dir().join(format!(
            "xero_light_test_{}.sqlite3",
            std::process::id()
        ));
        // set_var mutates process-global state; all tests run serially
        unsafe {
            std::env::set_var("GENERIC_DATA_STORE_TYPE", "sqlite");
            std::env::set_var(
                "GENERIC_DATA_STORE_URL",
                format!("sqlite://{}", db_path.display()),
            );
        }
    });
}

/// Initialize the store schema for a test.
pub async fn init_test_store() {
    init_test_env();
    xero_light::init().await.expect("store init must succeed");
}

/// A user as the callback handler would assemble it.
pub fn callback_user(email: &str, access_token: &str, session: &str) -> User {
    User::new(
        "A".to_string(),
        "B".to_string(),
        "6011".to_string(),
        email.to_string(),
        "xero-sub-1".to_string(),
        json!({"email": email, "given_name": "A", "family_name": "B"}),
        json!({"access_token": access_token}),
        json!({"tenantId": "tenant-1", "tenantName": "Demo Company (NZ)"}),
        session.to_string(),
    )
}
