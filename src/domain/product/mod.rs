pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{Product, ProductData};
pub use ports::ProductRepository;
pub use services::ProductService;
