use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Connections request error: {0}")]
    Connections(String),

    #[error("Organisation request error: {0}")]
    Organisation(String),

    #[error("Invoices request error: {0}")]
    Invoices(String),

    #[error("Serde error: {0}")]
    Serde(String),
}
