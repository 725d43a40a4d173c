use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    AuthResponse, CreateOrderRequest, CreateSingleProductRequest, CreateVariantProductRequest,
    CreateVariantRequest, Discount, DiscountType, ErrorResponse, HealthResponse, OrderCondition,
    OrderResponse, OrderedProductInput, OrderedProductResponse, PaginatedResponse, ProductResponse,
    ProductType, Role, SendCodeRequest, SignInRequest, UpdateConditionRequest, UpdateMeRequest,
    UpdateRoleRequest, UpdateSingleProductRequest, UpdateVariantProductRequest,
    UpdateVariantRequest, UserResponse, VariantResponse,
};

/// OpenAPI documentation for the shop backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "1.0.0",
        description = "E-commerce backend: products with variants, orders, OTP sign-in and Telegram notifications.",
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "OTP-based sign-in endpoints"),
        (name = "Users", description = "Current-user profile endpoints"),
        (name = "Products", description = "Public catalog endpoints"),
        (name = "Orders", description = "Order placement endpoints"),
        (name = "Admin", description = "Admin-only management endpoints")
    ),
    paths(
        crate::routes::health_check,
        crate::handlers::send_code,
        crate::handlers::sign_in,
        crate::handlers::logout,
        crate::handlers::get_current_user,
        crate::handlers::update_current_user,
        crate::handlers::get_users,
        crate::handlers::update_role,
        crate::handlers::get_products,
        crate::handlers::get_product,
        crate::handlers::admin_get_products,
        crate::handlers::admin_get_product,
        crate::handlers::create_single_product,
        crate::handlers::create_variant_product,
        crate::handlers::update_single_product,
        crate::handlers::update_variant_product,
        crate::handlers::delete_product,
        crate::handlers::add_variant,
        crate::handlers::update_variant,
        crate::handlers::delete_variant,
        crate::handlers::attach_images,
        crate::handlers::delete_image,
        crate::handlers::create_order,
        crate::handlers::get_orders,
        crate::handlers::get_order,
        crate::handlers::update_order_condition
    ),
    components(
        schemas(
            SendCodeRequest,
            SignInRequest,
            AuthResponse,
            UpdateMeRequest,
            UpdateRoleRequest,
            Role,
            UserResponse,
            ProductType,
            CreateSingleProductRequest,
            CreateVariantProductRequest,
            UpdateSingleProductRequest,
            UpdateVariantProductRequest,
            CreateVariantRequest,
            UpdateVariantRequest,
            ProductResponse,
            VariantResponse,
            OrderCondition,
            DiscountType,
            Discount,
            OrderedProductInput,
            CreateOrderRequest,
            UpdateConditionRequest,
            OrderedProductResponse,
            OrderResponse,
            PaginatedResponse<UserResponse>,
            PaginatedResponse<ProductResponse>,
            PaginatedResponse<OrderResponse>,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security configuration for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "JWT token obtained from the /api/auth/sign-in endpoint",
                        ))
                        .build(),
                ),
            );
        }
    }
}
