mod config;
mod errors;
mod main;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use main::{
    SessionState, clear_session_headers, new_session_correlator, new_session_headers,
    resolve_session, session_from_headers,
};
