//! Shared validation utilities and helpers.

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::constants::{ERR_INVALID_CONDITION, ERR_INVALID_FILE_TYPE, ERR_INVALID_PHONE};
use crate::errors::ApiError;
use crate::models::OrderCondition;

lazy_static! {
    /// International phone format: plus sign and 10-15 digits.
    static ref PHONE_RE: Regex = Regex::new(r"^\+[0-9]{10,15}$").unwrap();
}

/// Allowed image content types for product image uploads.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Maximum file size for product image uploads (5MB).
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Convert validator errors to ApiError::ValidationError.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Validate a phone number in international format.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_phone");
    error.message = Some(ERR_INVALID_PHONE.into());
    Err(error)
}

/// Validate an order condition value.
pub fn validate_condition(condition: &str) -> Result<(), ValidationError> {
    if OrderCondition::parse(condition).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_condition");
    error.message = Some(ERR_INVALID_CONDITION.into());
    Err(error)
}

/// Validate image content type for uploads.
pub fn validate_image_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some(ct) if ALLOWED_IMAGE_TYPES.iter().any(|t| ct.starts_with(t)) => Ok(()),
        _ => Err(ApiError::BadRequest(ERR_INVALID_FILE_TYPE.to_string())),
    }
}

/// Get file extension from content type.
pub fn get_extension_from_content_type(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some("image/jpeg") => "jpg",
        Some("image/png") => "png",
        Some("image/webp") => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_international_phones() {
        assert!(validate_phone("+79991234567").is_ok());
        assert!(validate_phone("+12025550142").is_ok());
    }

    #[test]
    fn rejects_malformed_phones() {
        assert!(validate_phone("79991234567").is_err());
        assert!(validate_phone("+7 999 123 45 67").is_err());
        assert!(validate_phone("+799").is_err());
        assert!(validate_phone("not-a-phone").is_err());
    }

    #[test]
    fn validates_conditions() {
        assert!(validate_condition("new").is_ok());
        assert!(validate_condition("Rejected").is_ok());
        assert!(validate_condition("shipped").is_err());
    }

    #[test]
    fn validates_image_content_types() {
        assert!(validate_image_content_type(Some("image/png")).is_ok());
        assert!(validate_image_content_type(Some("image/webp")).is_ok());
        assert!(validate_image_content_type(Some("application/pdf")).is_err());
        assert!(validate_image_content_type(None).is_err());
    }

    #[test]
    fn maps_content_types_to_extensions() {
        assert_eq!(get_extension_from_content_type(Some("image/png")), "png");
        assert_eq!(get_extension_from_content_type(Some("image/jpeg")), "jpg");
        assert_eq!(get_extension_from_content_type(None), "jpg");
    }
}
