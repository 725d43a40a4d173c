//! Success message constants used throughout the application.

// Authentication messages
pub const MSG_CODE_SENT: &str = "Verification code sent";
pub const MSG_SIGN_IN_SUCCESS: &str = "Signed in successfully";
pub const MSG_LOGOUT_SUCCESS: &str = "Logout successful";

// User messages
pub const MSG_USER_PROFILE_RETRIEVED: &str = "User profile retrieved";
pub const MSG_USER_UPDATED: &str = "User profile updated successfully";
pub const MSG_ROLE_UPDATED: &str = "User role updated successfully";

// Product messages
pub const MSG_PRODUCT_CREATED: &str = "Product created successfully";
pub const MSG_PRODUCT_FOUND: &str = "Product found";
pub const MSG_PRODUCT_UPDATED: &str = "Product updated successfully";
pub const MSG_PRODUCT_DELETED: &str = "Product deleted successfully";
pub const MSG_VARIANT_CREATED: &str = "Variant created successfully";
pub const MSG_VARIANT_UPDATED: &str = "Variant updated successfully";
pub const MSG_VARIANT_DELETED: &str = "Variant deleted successfully";
pub const MSG_IMAGES_ATTACHED: &str = "Images attached successfully";
pub const MSG_IMAGE_DELETED: &str = "Image deleted successfully";

// Order messages
pub const MSG_ORDER_CREATED: &str = "Order created successfully";
pub const MSG_ORDER_FOUND: &str = "Order found";
pub const MSG_ORDER_CONDITION_UPDATED: &str = "Order condition updated successfully";
