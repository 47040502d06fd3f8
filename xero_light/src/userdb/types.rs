use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// One row per authenticated end user.
///
/// Created on the first successful OAuth callback for an email address and
/// fully overwritten (OAuth-derived fields plus session correlator) on every
/// subsequent callback for the same email. Rows are never deleted by the
/// application; logout only clears the browser cookie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Database-assigned primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// Postal code of the first tenant's organisation, empty when the
    /// organisation carries no address
    pub address: String,
    /// Unique user identifier; the only field with an enforced invariant
    pub email: String,
    /// Subject identifier issued by Xero
    pub xero_user_id: String,
    /// Decoded identity-token claims, stored verbatim
    pub id_token_claims: Value,
    /// Full OAuth token set including access/refresh tokens and expiry
    pub token_set: Value,
    /// Currently selected tenant document
    pub active_tenant: Value,
    /// Session correlator; overwritten on each login, never expired server-side
    pub session: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: String,
        last_name: String,
        address: String,
        email: String,
        xero_user_id: String,
        id_token_claims: Value,
        token_set: Value,
        active_tenant: Value,
        session: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            first_name,
            last_name,
            address,
            email,
            xero_user_id,
            id_token_claims,
            token_set,
            active_tenant,
            session: Some(session),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Syntactic email check: exactly one `@`, a non-empty local part and a
/// dot-separated domain with non-empty labels. No deliverability checks.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
