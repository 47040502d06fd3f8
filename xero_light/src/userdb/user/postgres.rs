use serde_json::Value;
use sqlx::{Pool, Postgres};

use crate::storage::DB_TABLE_USERS;
use crate::userdb::{errors::UserError, types::User};

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            address TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            xero_user_id TEXT NOT NULL,
            id_token_claims JSONB NOT NULL,
            token_set JSONB NOT NULL,
            active_tenant JSONB NOT NULL,
            session TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_user_by_email_postgres(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {} WHERE email = $1
        "#,
        table_name
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn get_user_by_session_postgres(
    pool: &Pool<Postgres>,
    session: &str,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {} WHERE session = $1
        "#,
        table_name
    ))
    .bind(session)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn upsert_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO {} (
            first_name, last_name, address, email, xero_user_id,
            id_token_claims, token_set, active_tenant, session,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (email) DO UPDATE SET
            first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            address = EXCLUDED.address,
            xero_user_id = EXCLUDED.xero_user_id,
            id_token_claims = EXCLUDED.id_token_claims,
            token_set = EXCLUDED.token_set,
            active_tenant = EXCLUDED.active_tenant,
            session = EXCLUDED.session,
            updated_at = EXCLUDED.updated_at
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

pub(super) async fn update_active_tenant_postgres(
    pool: &Pool<Postgres>,
    email: &str,
    tenant: &Value,
) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        UPDATE {} SET active_tenant = $1, updated_at = $2 WHERE email = $3
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

pub(super) async fn update_token_set_postgres(
    pool: &Pool<Postgres>,
    email: &str,
    token_set: &Value,
) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        UPDATE {} SET token_set = $1, updated_at = $2 WHERE email = $3
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
