//! MongoDB collection names.

pub const COLLECTION_USERS: &str = "users";
pub const COLLECTION_OTPS: &str = "otps";
pub const COLLECTION_PRODUCTS: &str = "products";
pub const COLLECTION_VARIANTS: &str = "variants";
pub const COLLECTION_ORDERS: &str = "orders";
