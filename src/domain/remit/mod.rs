pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{RemitInformation, RemitInformationData, RemitInformationLine, RemitLineData};
pub use ports::RemitInformationRepository;
pub use services::RemitInformationService;
