//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Authentication required";
pub const ERR_INVALID_AUTH_HEADER: &str = "Missing or invalid authorization header";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";
pub const ERR_TOKEN_REVOKED: &str = "Token has been revoked";
pub const ERR_INVALID_OTP: &str = "Invalid or expired verification code";
pub const ERR_OTP_RESEND_TOO_SOON: &str = "Verification code was requested too recently";
pub const ERR_ACCOUNT_DEACTIVATED: &str = "Account is deactivated";

// Authorization errors
pub const ERR_ADMIN_ONLY: &str = "This action requires administrator privileges";
pub const ERR_CANNOT_DEMOTE_SELF: &str =
    "Administrators cannot demote themselves. Ask another admin to do this.";

// User errors
pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_INVALID_USER_ID: &str = "Invalid user ID format";

// Product errors
pub const ERR_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const ERR_INVALID_PRODUCT_ID: &str = "Invalid product ID format";
pub const ERR_NOT_VARIANT_PRODUCT: &str = "Product does not support variants";
pub const ERR_PRODUCT_TYPE_MISMATCH: &str = "Product type does not match this operation";
pub const ERR_VARIANT_NOT_FOUND: &str = "Variant not found";
pub const ERR_INVALID_VARIANT_ID: &str = "Invalid variant ID format";
pub const ERR_MAX_IMAGES_EXCEEDED: &str = "Maximum number of product images exceeded";
pub const ERR_IMAGE_NOT_FOUND: &str = "Image not found";
pub const ERR_NO_IMAGE_FILES: &str =
    "No image files provided. Upload files with field name 'images'.";
pub const ERR_INVALID_FILE_TYPE: &str = "Invalid file type. Only JPEG, PNG and WebP are allowed.";
pub const ERR_FILE_TOO_LARGE: &str = "File too large. Maximum size is 5MB.";
pub const ERR_FAILED_PROCESS_UPLOAD: &str = "Failed to process upload";
pub const ERR_FAILED_READ_FILE: &str = "Failed to read file data";
pub const ERR_FAILED_SAVE_FILE: &str = "Failed to save file";

// Order errors
pub const ERR_ORDER_NOT_FOUND: &str = "Order not found";
pub const ERR_INVALID_ORDER_ID: &str = "Invalid order ID format";
pub const ERR_VARIANT_REQUIRED: &str = "Variant must be selected for this product";
pub const ERR_INVALID_CONDITION: &str =
    "Condition must be one of: new, processing, ready, done, rejected";

// Validation errors
pub const ERR_NO_DATA_FOR_UPDATING: &str = "No data for updating";
pub const ERR_INVALID_PHONE: &str = "Phone must be in international format, e.g. +79991234567";
