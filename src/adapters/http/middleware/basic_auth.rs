use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use super::request_id::RequestId;
use crate::{
  adapters::http::errors::ApiError,
  application::auth::{AuthenticateUserCommand, AuthenticateUserUseCase},
  domain::auth::AuthError,
};

/// HTTP Basic authentication middleware
///
/// Decodes the `Authorization: Basic ...` header and checks the pair with
/// `AuthenticateUserUseCase`. Any failure answers 401 with a
/// `WWW-Authenticate: Basic realm="..."` challenge and the wrapped service
/// is never called.
pub struct BasicAuthMiddleware {
  authenticate_use_case: Arc<AuthenticateUserUseCase>,
  realm: Rc<str>,
}

impl BasicAuthMiddleware {
  pub fn new(authenticate_use_case: Arc<AuthenticateUserUseCase>, realm: impl AsRef<str>) -> Self {
    Self {
      authenticate_use_case,
      realm: Rc::from(realm.as_ref()),
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = BasicAuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(BasicAuthMiddlewareService {
      service: Rc::new(service),
      authenticate_use_case: self.authenticate_use_case.clone(),
      realm: self.realm.clone(),
    }))
  }
}

pub struct BasicAuthMiddlewareService<S> {
  service: Rc<S>,
  authenticate_use_case: Arc<AuthenticateUserUseCase>,
  realm: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let authenticate_use_case = self.authenticate_use_case.clone();
    let realm = self.realm.clone();

    Box::pin(async move {
      let challenge = |req: ServiceRequest| -> Result<ServiceResponse<EitherBody<B>>, Error> {
        let (request, _) = req.into_parts();
        let response = ApiError::Unauthorized(realm.to_string())
          .error_response()
          .map_into_right_body();
        Ok(ServiceResponse::new(request, response))
      };

      let Some(command) = extract_basic_credentials(&req) else {
        return challenge(req);
      };

      match authenticate_use_case.execute(command).await {
        Ok(user) => {
          tracing::debug!(user_id = user.id, username = %user.username, "Authenticated");
          req.extensions_mut().insert(user);
        }
        Err(AuthError::InvalidCredentials) => {
          let request_id = req.extensions().get::<RequestId>().copied();
          tracing::warn!(
            request_id = request_id.map(|id| id.to_string()),
            path = %req.path(),
            "Rejected credentials"
          );
          return challenge(req);
        }
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = ApiError::from_auth_error(e, &realm)
            .error_response()
            .map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      }

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Decodes `Authorization: Basic base64(username:password)`.
/// The scheme name is matched case-insensitively.
fn extract_basic_credentials(req: &ServiceRequest) -> Option<AuthenticateUserCommand> {
  let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
  let (scheme, encoded) = value.trim().split_once(' ')?;
  if !scheme.eq_ignore_ascii_case("basic") {
    return None;
  }

  let decoded = STANDARD.decode(encoded.trim()).ok()?;
  let decoded = String::from_utf8(decoded).ok()?;
  let (username, password) = decoded.split_once(':')?;

  Some(AuthenticateUserCommand {
    username: username.to_string(),
    password: password.to_string(),
  })
}
