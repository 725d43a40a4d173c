//! Current-user profile handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;
use validator::Validate;

use crate::constants::{ERR_NO_DATA_FOR_UPDATING, ERR_USER_NOT_FOUND, MSG_USER_PROFILE_RETRIEVED, MSG_USER_UPDATED};
use crate::errors::ApiError;
use crate::middleware::require_auth;
use crate::models::{ApiResponse, UpdateMeRequest, UserResponse};
use crate::services::UserService;
use crate::validators::validation_errors_to_api_error;

/// Get the currently authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_current_user(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    debug!("Fetching current user with id: {}", claims.sub);

    let user = user_service
        .get_user_by_id(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound(ERR_USER_NOT_FOUND.to_string()))?;

    let user_response: UserResponse = user.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MSG_USER_PROFILE_RETRIEVED,
        user_response,
    )))
}

/// Update the currently authenticated user's profile
#[utoipa::path(
    patch,
    path = "/api/user/me",
    tag = "Users",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error or empty update", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_current_user(
    user_service: web::Data<UserService>,
    body: web::Json<UpdateMeRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let update = body.into_inner();
    if !update.has_updates() {
        return Err(ApiError::BadRequest(ERR_NO_DATA_FOR_UPDATING.to_string()));
    }

    let user = user_service.update_me(&claims.sub, update).await?;
    let user_response: UserResponse = user.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_USER_UPDATED, user_response)))
}
