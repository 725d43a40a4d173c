//! Repository layer for database operations.
//!
//! This module provides a clean separation between business logic (services)
//! and database operations (repositories), improving testability and maintainability.

pub mod order_repository;
pub mod otp_repository;
pub mod product_repository;
pub mod user_repository;
pub mod variant_repository;

pub use order_repository::OrderRepository;
pub use otp_repository::OtpRepository;
pub use product_repository::ProductRepository;
pub use user_repository::UserRepository;
pub use variant_repository::VariantRepository;
