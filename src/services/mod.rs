//! Services organized by domain concern.

pub mod auth_service;
pub mod image_storage;
pub mod notification_service;
pub mod order_service;
pub mod otp_service;
pub mod product_service;
pub mod token_blacklist;
pub mod user_service;
pub mod variant_service;

pub use auth_service::AuthService;
pub use image_storage::ImageStorage;
pub use notification_service::NotificationService;
pub use order_service::OrderService;
pub use otp_service::OtpService;
pub use product_service::ProductService;
pub use token_blacklist::TokenBlacklist;
pub use user_service::UserService;
pub use variant_service::VariantService;
