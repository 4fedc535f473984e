use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::debug;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::auth::actions::authenticate;
use crate::domains::auth::session_token;
use crate::server::app::AppState;

/// Authenticated admin information from the session cookie
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthAdmin {
    pub id: Uuid,
    pub email: String,
}

/// Session cookie authentication middleware
///
/// Verifies the `admin_token` cookie and adds AuthAdmin to request extensions.
/// If no cookie or an invalid token, the request continues without AuthAdmin (public access).
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(&jar);

    if let Some(claims) = authenticate(token.as_deref(), &state.deps.jwt_service) {
        debug!(admin_id = %claims.id, "Authenticated admin session");
        request.extensions_mut().insert(AuthAdmin {
            id: claims.id,
            email: claims.email,
        });
    }

    next.run(request).await
}

/// Extractor for handlers that require a signed-in admin.
///
/// Rejects with 401 when the session middleware found no valid session.
#[derive(Clone, Debug)]
pub struct RequireAdmin(pub AuthAdmin);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthAdmin>()
            .cloned()
            .map(RequireAdmin)
            .ok_or(ApiError::Unauthenticated)
    }
}
