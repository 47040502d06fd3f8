use crate::utils::UtilError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Token refresh error: {0}")]
    TokenRefresh(String),

    #[error("No refresh token in stored token set")]
    MissingRefreshToken,

    #[error("Id token error: {0}")]
    IdToken(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
