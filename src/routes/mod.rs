//! Route table and swagger mounting.

use actix_governor::Governor;
use actix_web::{web, HttpResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::middleware::{create_auth_rate_limiter_config, AuthMiddleware};
use crate::openapi::ApiDoc;
use crate::services::TokenBlacklist;

pub fn configure_routes(cfg: &mut web::ServiceConfig, blacklist: TokenBlacklist) {
    let governor_config = create_auth_rate_limiter_config();

    cfg.service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            // Auth routes (public, rate-limited)
            .service(
                web::scope("/auth")
                    .wrap(Governor::new(&governor_config))
                    .route("/send-code", web::post().to(handlers::send_code))
                    .route("/sign-in", web::post().to(handlers::sign_in))
                    .service(
                        web::resource("/logout")
                            .wrap(AuthMiddleware::new(blacklist.clone()))
                            .route(web::post().to(handlers::logout)),
                    ),
            )
            // Current-user routes (protected)
            .service(
                web::scope("/user")
                    .wrap(AuthMiddleware::new(blacklist.clone()))
                    .route("/me", web::get().to(handlers::get_current_user))
                    .route("/me", web::patch().to(handlers::update_current_user)),
            )
            // Public catalog
            .service(
                web::scope("/product")
                    .route("", web::get().to(handlers::get_products))
                    .route("/{id}", web::get().to(handlers::get_product)),
            )
            // Public order placement
            .route("/order", web::post().to(handlers::create_order))
            // Admin routes (protected, admin checked in handlers)
            .service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::new(blacklist))
                    .route("/users", web::get().to(handlers::get_users))
                    .route("/user/{id}/role", web::patch().to(handlers::update_role))
                    .route("/products", web::get().to(handlers::admin_get_products))
                    // Literal segments must come before /{id} routes
                    .route(
                        "/product/SINGLE",
                        web::post().to(handlers::create_single_product),
                    )
                    .route(
                        "/product/VARIANT",
                        web::post().to(handlers::create_variant_product),
                    )
                    .route(
                        "/product/SINGLE/{id}",
                        web::patch().to(handlers::update_single_product),
                    )
                    .route(
                        "/product/VARIANT/{id}",
                        web::patch().to(handlers::update_variant_product),
                    )
                    .route("/product/{id}", web::get().to(handlers::admin_get_product))
                    .route("/product/{id}", web::delete().to(handlers::delete_product))
                    .route(
                        "/product/{id}/variant",
                        web::post().to(handlers::add_variant),
                    )
                    .route(
                        "/product/{id}/variant/{variant_id}",
                        web::patch().to(handlers::update_variant),
                    )
                    .route(
                        "/product/{id}/variant/{variant_id}",
                        web::delete().to(handlers::delete_variant),
                    )
                    .route(
                        "/product/{id}/images",
                        web::put().to(handlers::attach_images),
                    )
                    .route(
                        "/product/{id}/images/{filename}",
                        web::delete().to(handlers::delete_image),
                    )
                    .route("/orders", web::get().to(handlers::get_orders))
                    .route("/order/{id}", web::get().to(handlers::get_order))
                    .route(
                        "/order/{id}/condition",
                        web::patch().to(handlers::update_order_condition),
                    ),
            ),
    );

    // Generated API documentation
    cfg.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = crate::models::HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Server is running"
    }))
}
