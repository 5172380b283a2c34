use actix_files::NamedFile;
use actix_web::{HttpResponse, web};
use std::path::PathBuf;

use crate::adapters::http::errors::ApiError;

/// Settings shared by the unauthenticated routes
#[derive(Debug, Clone)]
pub struct SessionSettings {
  /// Realm announced in the Basic challenge
  pub realm: String,
  /// Front-end page served at `/`
  pub index_path: PathBuf,
}

/// Always answers 401 with the Basic challenge so the browser forgets the
/// cached credentials.
/// POST /api/logout
pub async fn logout_handler(settings: web::Data<SessionSettings>) -> Result<HttpResponse, ApiError> {
  tracing::debug!("Logout requested");
  Err(ApiError::Unauthorized(settings.realm.clone()))
}

/// GET /
pub async fn index_handler(settings: web::Data<SessionSettings>) -> Result<NamedFile, ApiError> {
  NamedFile::open_async(&settings.index_path)
    .await
    .map_err(|e| match e.kind() {
      std::io::ErrorKind::NotFound => {
        ApiError::NotFound(format!("Page not found: {}", settings.index_path.display()))
      }
      _ => ApiError::Internal(format!("Failed to open front-end page: {}", e)),
    })
}

/// GET /health
pub async fn health_handler() -> &'static str {
  "OK"
}
