use crate::oauth2::{TokenSet, get_client};

use super::config::{XERO_ACCOUNTING_API_BASE, XERO_CONNECTIONS_URL};
use super::errors::ApiError;
use super::types::{Invoice, InvoicesResponse, Organisation, OrganisationsResponse, Tenant};

/// Fetch the organisations the token currently grants access to.
pub async fn list_connections(token_set: &TokenSet) -> Result<Vec<Tenant>, ApiError> {
    let client = get_client();
    let response = client
        .get(XERO_CONNECTIONS_URL.as_str())
        .bearer_auth(&token_set.access_token)
        .send()
        .await
        .map_err(|e| ApiError::Connections(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| ApiError::Connections(e.to_string()))?;

    if status != reqwest::StatusCode::OK {
        tracing::error!("Connections request failed ({}): {}", status, response_body);
        return Err(ApiError::Connections(status.to_string()));
    }

    let tenants: Vec<Tenant> = serde_json::from_str(&response_body)
        .map_err(|e| ApiError::Serde(format!("Failed to deserialize connections: {e}")))?;

    tracing::debug!("Fetched {} tenant connection(s)", tenants.len());
    Ok(tenants)
}

/// Fetch the organisation details of a tenant; the short code feeds the
/// invoice deep links and the postal code feeds the user's address field.
pub async fn get_organisation(
    token_set: &TokenSet,
    tenant_id: &str,
) -> Result<Organisation, ApiError> {
    let client = get_client();
    let url = format!("{}/Organisation", XERO_ACCOUNTING_API_BASE.as_str());
    let response = client
        .get(&url)
        .bearer_auth(&token_set.access_token)
        .header("Xero-tenant-id", tenant_id)
        .header(http::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Organisation(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| ApiError::Organisation(e.to_string()))?;

    if status != reqwest::StatusCode::OK {
        tracing::error!("Organisation request failed ({}): {}", status, response_body);
        return Err(ApiError::Organisation(status.to_string()));
    }

    let parsed: OrganisationsResponse = serde_json::from_str(&response_body)
        .map_err(|e| ApiError::Serde(format!("Failed to deserialize organisations: {e}")))?;

    parsed
        .organisations
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Organisation("No organisation returned for tenant".to_string()))
}

/// Fetch the invoice listing for a tenant.
pub async fn list_invoices(token_set: &TokenSet, tenant_id: &str) -> Result<Vec<Invoice>, ApiError> {
    let client = get_client();
    let url = format!("{}/Invoices", XERO_ACCOUNTING_API_BASE.as_str());
    let response = client
        .get(&url)
        .bearer_auth(&token_set.access_token)
        .header("Xero-tenant-id", tenant_id)
        .header(http::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Invoices(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| ApiError::Invoices(e.to_string()))?;

    if status != reqwest::StatusCode::OK {
        tracing::error!("Invoices request failed ({}): {}", status, response_body);
        return Err(ApiError::Invoices(status.to_string()));
    }

    let parsed: InvoicesResponse = serde_json::from_str(&response_body)
        .map_err(|e| ApiError::Serde(format!("Failed to deserialize invoices: {e}")))?;

    tracing::debug!("Fetched {} invoice(s)", parsed.invoices.len());
    Ok(parsed.invoices)
}

/// Deep link into the provider UI for a single invoice.
pub fn deeplink_to_invoice(invoice_id: &str, short_code: &str) -> String {
    format!(
        "https://go.xero.com/organisationlogin/default.aspx?shortcode={short_code}&redirecturl=/AccountsReceivable/View.aspx?InvoiceID={invoice_id}"
    )
}
