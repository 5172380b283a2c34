pub mod document;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use document::{InvoiceDocument, InvoiceLineDocument};
pub use entities::{Invoice, InvoiceData, InvoiceLine, InvoiceLineData};
pub use errors::DocumentError;
pub use ports::{DocumentRenderer, InvoiceRepository};
pub use services::InvoiceService;
pub use value_objects::{TemplateName, month_name_pt};
