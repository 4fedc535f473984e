use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::common::ApiResult;
use crate::domains::contact::{check_rate_limit, mailer, submit_contact, ContactInput};
use crate::server::app::AppState;
use crate::server::middleware::ClientIp;
use crate::server::routes::MessageResponse;

/// Public contact form. Configuration and rate limit are checked before the body.
pub async fn contact_handler(
    State(state): State<AppState>,
    Extension(client_ip): Extension<ClientIp>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    mailer(&state.deps)?;

    let client_key = client_ip.key();
    check_rate_limit(&client_key, &state.deps).await?;

    let Json(input) = payload?;
    submit_contact(input, &client_key, &state.deps).await?;

    Ok(Json(MessageResponse::new("Sent!")))
}
