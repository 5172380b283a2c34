pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use dtos::ErrorResponse;
pub use errors::ApiError;
pub use handlers::session::SessionSettings;
pub use middleware::{BasicAuthMiddleware, RequestId, RequestIdMiddleware};
pub use routes::{RouteDependencies, configure_routes};
