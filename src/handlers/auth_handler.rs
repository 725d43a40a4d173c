//! Authentication handlers: OTP request, sign-in and logout.

use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use log::info;
use validator::Validate;

use crate::constants::{MSG_CODE_SENT, MSG_LOGOUT_SUCCESS, MSG_SIGN_IN_SUCCESS};
use crate::errors::ApiError;
use crate::models::{ApiResponse, AuthResponse, Claims, SendCodeRequest, SignInRequest};
use crate::services::{AuthService, TokenBlacklist};
use crate::validators::validation_errors_to_api_error;

/// Request a sign-in verification code
///
/// Sends a one-time code to the given phone through the notification
/// channel. Repeated requests within the resend interval are rejected.
#[utoipa::path(
    post,
    path = "/api/auth/send-code",
    tag = "Authentication",
    request_body = SendCodeRequest,
    responses(
        (status = 200, description = "Verification code sent"),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 429, description = "Code requested too recently", body = crate::models::ErrorResponse)
    )
)]
pub async fn send_code(
    auth_service: web::Data<AuthService>,
    body: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    auth_service.send_code(&body.phone).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_CODE_SENT)))
}

/// Sign in with a verification code
///
/// Verifies the code, creates the user on first sign-in and returns a JWT.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Invalid or expired code", body = crate::models::ErrorResponse)
    )
)]
pub async fn sign_in(
    auth_service: web::Data<AuthService>,
    body: web::Json<SignInRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let req = body.into_inner();
    let (user, token) = auth_service.sign_in(&req.phone, &req.code).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        message: MSG_SIGN_IN_SUCCESS.to_string(),
        token,
        user: user.into(),
    }))
}

/// Logout the current user
///
/// Invalidates the presented JWT by adding it to a server-side blacklist
/// until its natural expiration time.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "Invalid or missing token", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    req: HttpRequest,
    token_blacklist: web::Data<TokenBlacklist>,
) -> Result<HttpResponse, ApiError> {
    // Claims and raw token were placed into extensions by the AuthMiddleware
    let claims = req.extensions().get::<Claims>().cloned();
    let token = req.extensions().get::<String>().cloned();

    if let (Some(claims), Some(token)) = (claims, token) {
        token_blacklist.blacklist_token(&token, claims.exp).await;
        info!("User {} logged out", claims.sub);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_LOGOUT_SUCCESS)))
}
