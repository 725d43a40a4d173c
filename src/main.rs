mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod repositories;
mod routes;
mod services;
mod telegram;
mod utils;
mod validators;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use mongodb::bson::doc;
use mongodb::Client;

use crate::config::CONFIG;
use crate::repositories::{
    OrderRepository, OtpRepository, ProductRepository, UserRepository, VariantRepository,
};
use crate::services::{
    AuthService, NotificationService, OrderService, OtpService, ProductService, TokenBlacklist,
    UserService, VariantService,
};
use crate::telegram::TelegramClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.database.uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&CONFIG.database.name);

    db.run_command(doc! { "ping": 1 })
        .await
        .expect("Failed to ping MongoDB");
    info!("Connected to MongoDB successfully!");

    // Repositories and startup indexes
    let user_repository = Arc::new(UserRepository::new(&db));
    let otp_repository = Arc::new(OtpRepository::new(&db));
    let product_repository = Arc::new(ProductRepository::new(&db));
    let variant_repository = Arc::new(VariantRepository::new(&db));
    let order_repository = Arc::new(OrderRepository::new(&db));

    user_repository
        .create_indexes()
        .await
        .expect("Failed to create user indexes");
    otp_repository
        .create_indexes()
        .await
        .expect("Failed to create otp indexes");
    product_repository
        .create_indexes()
        .await
        .expect("Failed to create product indexes");
    variant_repository
        .create_indexes()
        .await
        .expect("Failed to create variant indexes");
    order_repository
        .create_indexes()
        .await
        .expect("Failed to create order indexes");

    // Services
    let notification_service = Arc::new(NotificationService::new(TelegramClient::from_config()));
    let otp_service = Arc::new(OtpService::new(otp_repository));
    let user_service = Arc::new(UserService::new(user_repository));
    let auth_service = Arc::new(AuthService::new(
        otp_service,
        Arc::clone(&user_service),
        Arc::clone(&notification_service),
    ));
    let variant_service = Arc::new(VariantService::new(variant_repository));
    let product_service = Arc::new(ProductService::new(
        product_repository,
        Arc::clone(&variant_service),
    ));
    let order_service = Arc::new(OrderService::new(
        order_repository,
        Arc::clone(&product_service),
        variant_service,
        notification_service,
    ));

    let token_blacklist = TokenBlacklist::new();

    let auth_data = web::Data::from(auth_service);
    let user_data = web::Data::from(user_service);
    let product_data = web::Data::from(product_service);
    let order_data = web::Data::from(order_service);
    let blacklist_data = web::Data::new(token_blacklist.clone());

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server.host, CONFIG.server.port);
    info!("Starting server at http://{}", server_addr);
    info!("Swagger UI available at http://{}/docs/", server_addr);

    HttpServer::new(move || {
        let blacklist = token_blacklist.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(auth_data.clone())
            .app_data(user_data.clone())
            .app_data(product_data.clone())
            .app_data(order_data.clone())
            .app_data(blacklist_data.clone())
            .configure(|cfg| routes::configure_routes(cfg, blacklist))
    })
    .bind(&server_addr)?
    .run()
    .await
}
