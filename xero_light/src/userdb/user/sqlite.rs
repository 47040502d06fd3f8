use serde_json::Value;
use sqlx::{Pool, Sqlite};

use crate::storage::DB_TABLE_USERS;
use crate::userdb::{errors::UserError, types::User};

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            address TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            xero_user_id TEXT NOT NULL,
            id_token_claims TEXT NOT NULL,
            token_set TEXT NOT NULL,
            active_tenant TEXT NOT NULL,
            session TEXT,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_user_by_email_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {} WHERE email = ?
        "#,
        table_name
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn get_user_by_session_sqlite(
    pool: &Pool<Sqlite>,
    session: &str,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {} WHERE session = ?
        "#,
        table_name
    ))
    .bind(session)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn upsert_user_sqlite(pool: &Pool<Sqlite>, user: User) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO {} (
            first_name, last_name, address, email, xero_user_id,
            id_token_claims, token_set, active_tenant, session,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (email) DO UPDATE SET
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            address = excluded.address,
            xero_user_id = excluded.xero_user_id,
            id_token_claims = excluded.id_token_claims,
            token_set = excluded.token_set,
            active_tenant = excluded.active_tenant,
            session = excluded.session,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
        table_name
    ))
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.address)
    .bind(&user.email)
    .bind(&user.xero_user_id)
    .bind(&user.id_token_claims)
    .bind(&user.token_set)
    .bind(&user.active_tenant)
    .bind(&user.session)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn update_active_tenant_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
    tenant: &Value,
) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        UPDATE {} SET active_tenant = ?, updated_at = ? WHERE email = ?
        "#,
        table_name
    ))
    .bind(tenant)
    .bind(chrono::Utc::now())
    .bind(email)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn update_token_set_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
    token_set: &Value,
) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        UPDATE {} SET token_set = ?, updated_at = ? WHERE email = ?
        "#,
        table_name
    ))
    .bind(token_set)
    .bind(chrono::Utc::now())
    .bind(email)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}
