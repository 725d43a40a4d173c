//! Data models organized by domain.

pub mod claims;
pub mod order;
pub mod otp;
pub mod product;
pub mod responses;
pub mod user;
pub mod variant;

pub use claims::*;
pub use order::*;
pub use otp::*;
pub use product::*;
pub use responses::*;
pub use user::*;
pub use variant::*;
