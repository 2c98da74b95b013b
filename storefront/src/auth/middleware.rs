//! Admin gate middleware

use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{StatusCode, header};
use shared::error::{ApiResponse, AppError};

use super::{BASIC_REALM, BasicCredentials};
use crate::core::ServerState;
use crate::security_log;

/// 401 with a Basic challenge so browsers prompt for credentials
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(&AppError::not_authenticated());
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, BASIC_REALM)],
            Json(body),
        )
            .into_response()
    }
}

/// Require admin Basic credentials; the inner handler never runs otherwise.
///
/// Applied to the admin API router and the `/admin` static pages.
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(header_value) = header_value else {
        security_log!("WARN", "auth_missing", uri = req.uri().path());
        return Err(AuthRejection);
    };

    match BasicCredentials::from_header(header_value) {
        Some(creds) if creds.is_admin(&state.config.admin_password) => Ok(next.run(req).await),
        Some(creds) => {
            security_log!(
                "WARN",
                "auth_failed",
                username = creds.username.as_str(),
                uri = req.uri().path()
            );
            Err(AuthRejection)
        }
        None => {
            security_log!(
                "WARN",
                "auth_malformed",
                uri = req.uri().path()
            );
            Err(AuthRejection)
        }
    }
}
