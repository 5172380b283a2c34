mod list_invoice_templates;
mod open_invoice;

pub use list_invoice_templates::ListInvoiceTemplatesUseCase;
pub use open_invoice::{OpenInvoiceCommand, OpenInvoiceResponse, OpenInvoiceUseCase};
