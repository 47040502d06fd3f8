use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::OAuth2Error;

/// OAuth2 access/refresh token bundle plus expiry metadata, exactly as the
/// token endpoint returns it. Persisted verbatim on the user row and passed
/// explicitly into every API call; there is no process-global token state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

impl TokenSet {
    pub fn to_value(&self) -> Result<Value, OAuth2Error> {
        serde_json::to_value(self).map_err(|e| OAuth2Error::Serde(e.to_string()))
    }

    pub fn from_value(value: &Value) -> Result<Self, OAuth2Error> {
        serde_json::from_value(value.clone()).map_err(|e| OAuth2Error::Serde(e.to_string()))
    }
}

/// Query parameters delivered to the redirect target by the provider.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub code: String,
    pub state: String,
}

/// Claims decoded from the identity token. Only `email` is required; the
/// profile fields default to empty and everything else is kept in `extra`
/// so the row stores the full claim document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub email: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub xero_userid: String,
    #[serde(default)]
    pub sub: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdTokenClaims {
    pub fn to_value(&self) -> Result<Value, OAuth2Error> {
        serde_json::to_value(self).map_err(|e| OAuth2Error::Serde(e.to_string()))
    }
}
