//! Bearer-token gate for protected endpoints.
//!
//! Extracts the access token from the `Authorization` header, resolves it
//! through the `AccessTokenVerifier` registered as app data, and stores the
//! resulting `AuthContext` in the request extensions.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;

use parley_core::domain::value_objects::AuthContext;
use parley_core::services::auth::AccessTokenVerifier;

use crate::handlers::error::ApiError;

/// Shared verifier handle looked up by the middleware
pub type VerifierData = web::Data<Arc<dyn AccessTokenVerifier>>;

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                return Ok(reject(req, "Not authorized, no token"));
            };

            let Some(verifier) = req.app_data::<VerifierData>().cloned() else {
                return Ok(reject(req, "Not authorized, token failed"));
            };

            match verifier.authenticate(&token).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    debug!(code = e.code(), "bearer token rejected");
                    Ok(reject(req, "Not authorized, token failed"))
                }
            }
        })
    }
}

/// Short-circuits the request with a 401 envelope
fn reject<B>(req: ServiceRequest, message: &str) -> ServiceResponse<EitherBody<B>> {
    req.into_response(ApiError::unauthorized(message).error_response())
        .map_into_right_body()
}

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    bearer_from_request(req.request())
}

/// Same as `extract_bearer_token`, for handlers outside the gate
pub fn bearer_from_request(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for the principal established by `JwtAuth`
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub AuthContext);

impl Deref for Authenticated {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .map(Authenticated)
            .ok_or_else(|| ApiError::unauthorized("Authentication required").into());

        ready(result)
    }
}
