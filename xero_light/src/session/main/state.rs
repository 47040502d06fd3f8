use http::HeaderMap;

use crate::session::errors::SessionError;
use crate::userdb::{User, UserStore};

use super::cookie::session_from_headers;

/// Explicit authentication state of a request, resolved once by the guard
/// instead of being inferred from cookie presence plus ad hoc lookups.
#[derive(Debug)]
pub enum SessionState {
    /// No session cookie, or one whose signature does not verify.
    Anonymous,
    /// A verified cookie whose correlator matches no user row; the cookie
    /// is dead weight and should be cleared via logout.
    Stale,
    Authenticated(Box<User>),
}

/// Resolve the request's session: verify the cookie signature, then match
/// the correlator against the `session` column.
pub async fn resolve_session(headers: &HeaderMap) -> Result<SessionState, SessionError> {
    let Some(correlator) = session_from_headers(headers)? else {
        return Ok(SessionState::Anonymous);
    };

    let user = UserStore::get_user_by_session(&correlator)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    match user {
        Some(user) => Ok(SessionState::Authenticated(Box::new(user))),
        None => {
            tracing::debug!("Session cookie verified but no matching user row");
            Ok(SessionState::Stale)
        }
    }
}
