use thiserror::Error;

use xero_light::{ApiError, OAuth2Error, SessionError, UserError};

/// Anything a request handler can fail with; rendered into the shared
/// error template.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("OAuth2 error: {0}")]
    OAuth2(#[from] OAuth2Error),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("User store error: {0}")]
    User(#[from] UserError),

    #[error("Unknown organisation id: {0}")]
    UnknownTenant(String),

    #[error("{0}")]
    Callback(String),

    #[error("Template error: {0}")]
    Template(String),
}
