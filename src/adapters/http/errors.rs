use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header},
};
use std::fmt;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::auth::AuthError;
use crate::domain::errors::RepositoryError;
use crate::domain::invoice::DocumentError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Client input error (400 Bad Request)
  Validation(String),

  /// Unknown record or template (404 Not Found)
  NotFound(String),

  /// Missing or wrong credentials (401), carries the challenge realm
  Unauthorized(String),

  /// Store failure or integrity violation (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Unauthorized(realm) => write!(f, "Unauthorized for realm {}", realm),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Unauthorized(_) => ("unauthorized", "Authentication required".to_string()),
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        ("internal_error", msg.clone())
      }
    };

    let mut response = HttpResponse::build(status);
    if let ApiError::Unauthorized(realm) = self {
      response.insert_header((
        header::WWW_AUTHENTICATE,
        format!("Basic realm=\"{}\"", realm),
      ));
    }

    response.json(ErrorResponse {
      error: error_type.to_string(),
      message,
    })
  }
}

impl From<RepositoryError> for ApiError {
  fn from(error: RepositoryError) -> Self {
    match error {
      RepositoryError::NotFound { .. } => ApiError::NotFound(error.to_string()),
      RepositoryError::Validation(msg) => ApiError::Validation(msg),
      RepositoryError::Restricted { .. }
      | RepositoryError::InvalidData(_)
      | RepositoryError::Database(_) => ApiError::Internal(error.to_string()),
    }
  }
}

impl From<DocumentError> for ApiError {
  fn from(error: DocumentError) -> Self {
    match error {
      DocumentError::InvalidTemplateName(_) => ApiError::Validation(error.to_string()),
      DocumentError::TemplateNotFound(_) => ApiError::NotFound(error.to_string()),
      DocumentError::Repository(err) => err.into(),
      DocumentError::Render(_) | DocumentError::Io(_) => ApiError::Internal(error.to_string()),
    }
  }
}

impl ApiError {
  /// Maps an authentication failure, announcing `realm` in the challenge
  pub fn from_auth_error(error: AuthError, realm: &str) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Unauthorized(realm.to_string()),
      AuthError::UsernameAlreadyExists(_) | AuthError::ValueObject(_) => {
        ApiError::Validation(error.to_string())
      }
      AuthError::Repository(err) => err.into(),
      AuthError::Hash(_) => ApiError::Internal(error.to_string()),
    }
  }
}

/// Collects messages from `errors`, descending into nested structs and lists.
/// Nested messages are prefixed with their path, e.g. `invoice_lines[0].quantity`.
fn collect_validation_messages(
  errors: &ValidationErrors,
  prefix: Option<&str>,
  messages: &mut Vec<String>,
) {
  for (field, kind) in errors.errors() {
    let path = match prefix {
      Some(prefix) => format!("{}.{}", prefix, field),
      None => field.to_string(),
    };

    match kind {
      ValidationErrorsKind::Field(field_errors) => {
        for error in field_errors {
          let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid field: {}", path));
          match prefix {
            Some(_) => messages.push(format!("{}: {}", path, message)),
            None => messages.push(message),
          }
        }
      }
      ValidationErrorsKind::Struct(nested) => {
        collect_validation_messages(nested, Some(&path), messages);
      }
      ValidationErrorsKind::List(items) => {
        for (index, nested) in items {
          collect_validation_messages(nested, Some(&format!("{}[{}]", path, index)), messages);
        }
      }
    }
  }
}

/// Convert validation errors from validator crate
impl From<ValidationErrors> for ApiError {
  fn from(errors: ValidationErrors) -> Self {
    let mut messages = Vec::new();
    collect_validation_messages(&errors, None, &mut messages);
    // HashMap order is arbitrary
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}
