use serde_json::Value;

use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::{errors::UserError, types::User, types::validate_email};

use super::postgres::*;
use super::sqlite::*;

pub struct UserStore;

impl UserStore {
    /// Declare the users table against the live schema.
    pub async fn init() -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => create_tables_sqlite(pool).await,
            (_, Some(pool)) => create_tables_postgres(pool).await,
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    pub async fn get_user_by_email(email: &str) -> Result<Option<User>, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_user_by_email_sqlite(pool, email).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_email_postgres(pool, email).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Exact string match against the stored session correlator.
    pub async fn get_user_by_session(session: &str) -> Result<Option<User>, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_user_by_session_sqlite(pool, session).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_session_postgres(pool, session).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Atomic insert-or-update keyed on the unique email column. Every
    /// OAuth-derived field plus the session correlator is overwritten;
    /// `created_at` survives from the first insert.
    pub async fn upsert_user(user: User) -> Result<User, UserError> {
        if !validate_email(&user.email) {
            return Err(UserError::InvalidEmail(user.email));
        }

        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            upsert_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Persist the tenant selected through the dashboard.
    pub async fn update_active_tenant(email: &str, tenant: &Value) -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_active_tenant_sqlite(pool, email, tenant).await
        } else if let Some(pool) = store.as_postgres() {
            update_active_tenant_postgres(pool, email, tenant).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Write a refreshed token set back to the row.
    pub async fn update_token_set(email: &str, token_set: &Value) -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_token_set_sqlite(pool, email, token_set).await
        } else if let Some(pool) = store.as_postgres() {
            update_token_set_postgres(pool, email, token_set).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}
