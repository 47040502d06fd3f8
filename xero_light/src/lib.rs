//! xero-light - Minimal Xero OAuth2 and accounting API integration
//!
//! This crate provides the pieces a small web application needs to sign a
//! user in against Xero, keep the obtained token material in a relational
//! user store, and query the accounting API for the signed-in tenant:
//! the authorization-code flow, a signed session-correlator cookie, and a
//! typed client for the handful of accounting endpoints the dashboard uses.

mod api;
mod oauth2;
mod session;
mod storage;
mod userdb;
mod utils;

pub use api::{
    ApiError, Invoice, InvoiceRow, Organisation, Tenant, deeplink_to_invoice, get_organisation,
    invoice_rows, list_connections, list_invoices,
};

pub use oauth2::{
    AuthResponse, IdTokenClaims, OAuth2Error, TokenSet, build_consent_url, decode_id_token,
    exchange_code, refresh_token_set,
};

pub use session::{
    SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SessionError, SessionState, clear_session_headers,
    new_session_correlator, new_session_headers, resolve_session, session_from_headers,
};

pub use userdb::{User, UserError, UserStore, validate_email};
pub use utils::UtilError;

/// Initialize the persistence layer: connect to the configured data store
/// and declare the users table schema.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    userdb::init().await?;
    Ok(())
}
