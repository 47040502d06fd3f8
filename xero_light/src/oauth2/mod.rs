mod config;
mod errors;
mod main;
mod types;

pub use errors::OAuth2Error;
pub use main::{build_consent_url, decode_id_token, exchange_code, refresh_token_set};
pub use types::{AuthResponse, IdTokenClaims, TokenSet};

pub(crate) use main::get_client;
