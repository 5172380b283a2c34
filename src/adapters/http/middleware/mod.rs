pub mod basic_auth;
pub mod request_id;

pub use basic_auth::BasicAuthMiddleware;
pub use request_id::{RequestId, RequestIdMiddleware};
