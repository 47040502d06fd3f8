use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::accounting::deeplink_to_invoice;
use super::errors::ApiError;

/// An organisation the authenticated user has access to, as returned by the
/// connections endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tenant {
    #[serde(rename = "id", default)]
    pub connection_id: String,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "tenantName", default)]
    pub tenant_name: String,
    #[serde(rename = "tenantType", default)]
    pub tenant_type: String,
}

impl Tenant {
    pub fn to_value(&self) -> Result<Value, ApiError> {
        serde_json::to_value(self).map_err(|e| ApiError::Serde(e.to_string()))
    }

    pub fn from_value(value: &Value) -> Result<Self, ApiError> {
        serde_json::from_value(value.clone()).map_err(|e| ApiError::Serde(e.to_string()))
    }
}

// Accounting API payloads use PascalCase field names.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "AddressType", default)]
    pub address_type: String,
    #[serde(rename = "PostalCode", default)]
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organisation {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "ShortCode", default)]
    pub short_code: String,
    #[serde(rename = "Addresses", default)]
    pub addresses: Vec<Address>,
}

impl Organisation {
    /// Postal code of the first listed address, or an empty string when the
    /// organisation carries no address.
    pub fn postal_address(&self) -> String {
        self.addresses
            .first()
            .map(|a| a.postal_code.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OrganisationsResponse {
    #[serde(rename = "Organisations", default)]
    pub(super) organisations: Vec<Organisation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "Name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "PaymentID", default)]
    pub payment_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "LineAmount", default)]
    pub line_amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "InvoiceID", default)]
    pub invoice_id: String,
    #[serde(rename = "Type", default)]
    pub invoice_type: String,
    #[serde(rename = "InvoiceNumber", default)]
    pub invoice_number: String,
    #[serde(rename = "AmountDue", default)]
    pub amount_due: f64,
    #[serde(rename = "Contact", default)]
    pub contact: Contact,
    #[serde(rename = "Payments", default)]
    pub payments: Vec<Payment>,
    #[serde(rename = "LineItems", default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct InvoicesResponse {
    #[serde(rename = "Invoices", default)]
    pub(super) invoices: Vec<Invoice>,
}

/// One dashboard table row projected from an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRow {
    pub contact_name: String,
    pub invoice_type: String,
    pub amount_due: String,
    pub invoice_number: String,
    pub payment_count: String,
    pub line_item_count: String,
    pub deep_link: String,
}

/// Project invoices into display rows, with deep links built from the
/// invoice id and the tenant organisation's short code.
pub fn invoice_rows(invoices: &[Invoice], short_code: &str) -> Vec<InvoiceRow> {
    invoices
        .iter()
        .map(|inv| InvoiceRow {
            contact_name: inv.contact.name.clone(),
            invoice_type: inv.invoice_type.clone(),
            amount_due: format!("{:.2}", inv.amount_due),
            invoice_number: inv.invoice_number.clone(),
            payment_count: inv.payments.len().to_string(),
            line_item_count: inv.line_items.len().to_string(),
            deep_link: deeplink_to_invoice(&inv.invoice_id, short_code),
        })
        .collect()
}
