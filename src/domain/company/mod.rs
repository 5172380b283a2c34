pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{Company, CompanyData};
pub use ports::CompanyRepository;
pub use services::CompanyService;
