use crate::oauth2::config::{
    XERO_AUTH_URL, XERO_CLIENT_ID, XERO_CLIENT_SECRET, XERO_REDIRECT_URI, XERO_SCOPES,
    XERO_TOKEN_URL,
};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::TokenSet;
use crate::utils::gen_random_string;

use super::utils::get_client;

/// Build the provider-hosted consent page URL with a fresh `state` value.
pub fn build_consent_url() -> Result<String, OAuth2Error> {
    let state = gen_random_string(16)?;
    Ok(consent_url_from_parts(
        XERO_AUTH_URL.as_str(),
        XERO_CLIENT_ID.as_str(),
        XERO_REDIRECT_URI.as_str(),
        XERO_SCOPES.as_str(),
        &state,
    ))
}

fn consent_url_from_parts(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &str,
    state: &str,
) -> String {
    format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
        auth_url,
        client_id,
        urlencoding::encode(redirect_uri),
        urlencoding::encode(scopes),
        state
    )
}

/// Exchange the authorization code delivered to the redirect target for a
/// full token set.
pub async fn exchange_code(code: &str) -> Result<TokenSet, OAuth2Error> {
    let client = get_client();
    let response = client
        .post(XERO_TOKEN_URL.as_str())
        .basic_auth(XERO_CLIENT_ID.as_str(), Some(XERO_CLIENT_SECRET.as_str()))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", XERO_REDIRECT_URI.as_str()),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    if status != reqwest::StatusCode::OK {
        tracing::error!("Token exchange failed ({}): {}", status, response_body);
        return Err(OAuth2Error::TokenExchange(status.to_string()));
    }

    let token_set: TokenSet = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    tracing::debug!("Exchanged authorization code for token set");
    Ok(token_set)
}

/// Trade the refresh token of `token_set` for a new token set. The provider
/// rotates refresh tokens, so callers persist the returned set.
pub async fn refresh_token_set(token_set: &TokenSet) -> Result<TokenSet, OAuth2Error> {
    let refresh_token = token_set
        .refresh_token
        .as_deref()
        .ok_or(OAuth2Error::MissingRefreshToken)?;

    let client = get_client();
    let response = client
        .post(XERO_TOKEN_URL.as_str())
        .basic_auth(XERO_CLIENT_ID.as_str(), Some(XERO_CLIENT_SECRET.as_str()))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenRefresh(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenRefresh(e.to_string()))?;

    if status != reqwest::StatusCode::OK {
        tracing::error!("Token refresh failed ({}): {}", status, response_body);
        return Err(OAuth2Error::TokenRefresh(status.to_string()));
    }

    let refreshed: TokenSet = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::TokenRefresh(e.to_string()))?;

    tracing::debug!("Refreshed token set");
    Ok(refreshed)
}
