/// HTTP middleware utilities for blog-service
///
/// Provides cookie-session authentication and the redirect-to-login
/// contract: a request without a live session never reaches the wrapped
/// handler and is answered with a redirect to the login view carrying the
/// originally requested path.
pub mod permissions;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, web, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::SqlitePool;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::db::session_repo;
use crate::error::AppError;
use crate::security;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated identity stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Actix middleware that resolves the session cookie against the sessions
/// table. Missing, unknown, and expired sessions all fail the same way:
/// `AppError::LoginRequired` renders a 302 to the login view with the
/// original path in `next`.
pub struct SessionAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let next = req.path().to_string();

            let token = match req.request().cookie(SESSION_COOKIE) {
                Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
                _ => return Err(AppError::LoginRequired(next).into()),
            };

            let pool = req
                .app_data::<web::Data<SqlitePool>>()
                .map(|data| data.get_ref().clone())
                .ok_or_else(|| AppError::Internal("Database pool not configured".to_string()))?;

            let session = session_repo::find_authenticated_session(
                &pool,
                &security::hash_session_token(&token),
            )
            .await
            .map_err(AppError::from)?;

            let session = match session {
                Some(session) => session,
                None => return Err(AppError::LoginRequired(next).into()),
            };

            req.extensions_mut().insert(CurrentUser {
                id: session.user_id,
                username: session.username,
            });

            service.call(req).await
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentUser>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Authenticated user missing")),
        )
    }
}
