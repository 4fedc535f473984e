//! Auth endpoints: login, bootstrap registration, session check, logout

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::common::validation::{is_valid_email, normalize_email};
use crate::common::{ApiError, ApiResult};
use crate::domains::auth::actions::{
    ensure_registration_open, login, register_admin, resolve_session, Registration,
    SessionOutcome,
};
use crate::domains::auth::models::AdminProfile;
use crate::domains::auth::session_token;
use crate::server::app::AppState;
use crate::server::routes::OkResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminResponse {
    pub ok: bool,
    pub admin: AdminProfile,
}

pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<OkResponse>)> {
    let Json(body) = payload?;
    if !is_valid_email(&normalize_email(&body.email)) || body.password.is_empty() {
        return Err(ApiError::invalid_input());
    }

    let token = login(&body.email, &body.password, &state.deps).await?;

    Ok((
        jar.add(state.deps.session_cookies.issue(token)),
        Json(OkResponse::new()),
    ))
}

/// Only the first admin may register; the closed check precedes body validation.
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<AdminResponse>)> {
    ensure_registration_open(&state.deps).await?;

    let Json(body) = payload?;
    let registration = Registration::parse(&body.email, &body.name, &body.password)?;
    let (admin, token) = register_admin(registration, &state.deps).await?;

    Ok((
        jar.add(state.deps.session_cookies.issue(token)),
        Json(AdminResponse {
            ok: true,
            admin: admin.summary(),
        }),
    ))
}

pub async fn me_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<AdminResponse>> {
    let token = session_token(&jar);

    match resolve_session(token.as_deref(), &state.deps).await? {
        SessionOutcome::Unauthenticated => Err(ApiError::Unauthenticated),
        SessionOutcome::IdentityMissing(_) => Err(ApiError::not_found()),
        SessionOutcome::Authorized { admin, .. } => Ok(Json(AdminResponse {
            ok: true,
            admin: admin.profile(),
        })),
    }
}

/// Always succeeds, with or without a session
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<OkResponse>) {
    (
        jar.add(state.deps.session_cookies.clear()),
        Json(OkResponse::new()),
    )
}
