mod core;
mod idtoken;
mod utils;

pub use core::{build_consent_url, exchange_code, refresh_token_set};
pub use idtoken::decode_id_token;

pub(crate) use utils::get_client;
