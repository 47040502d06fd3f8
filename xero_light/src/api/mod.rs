mod accounting;
mod config;
mod errors;
mod types;

pub use accounting::{deeplink_to_invoice, get_organisation, list_connections, list_invoices};
pub use errors::ApiError;
pub use types::{Invoice, InvoiceRow, Organisation, Tenant, invoice_rows};
