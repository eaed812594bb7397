use std::io;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use serde_json::json;

use image_blog::database::{self, MemoryPostStore, MongoPostStore, PostStore};
use image_blog::middleware::cors::build_cors;
use image_blog::middleware::error_handler::handle_error;
use image_blog::middleware::not_found::not_found;
use image_blog::post::post_service::PostService;
use image_blog::router::index::routes;
use image_blog::uploader::cloudinary::{CloudinaryConfig, CloudinaryImageHost};
use image_blog::uploader::image_host::ImageHost;
use image_blog::utils::config::{AppConfig, StoreBackend};
use image_blog::utils::helpers::service_name;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the image blog API",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": service_name(),
    }))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;
    let cloudinary = CloudinaryConfig::from_env().map_err(|e| {
        error!("Invalid Cloudinary configuration: {}", e);
        io::Error::other(e)
    })?;

    let store: Arc<dyn PostStore> = match config.store_backend {
        StoreBackend::Mongo => {
            let mongo_client = database::connect_to_mongo(&config.mongodb_uri)
                .await
                .map_err(io::Error::other)?;
            Arc::new(MongoPostStore::new(&mongo_client, &config.database_name))
        }
        StoreBackend::Memory => {
            info!("Using the in-memory post store; posts are lost on restart");
            Arc::new(MemoryPostStore::new())
        }
    };
    let image_host: Arc<dyn ImageHost> = Arc::new(CloudinaryImageHost::new(cloudinary));

    let post_service = web::Data::new(PostService::new(
        store,
        image_host,
        config.image_folder.clone(),
    ));

    info!("Starting server on http://{}:{}", config.host, config.port);

    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&allowed_origin))
            .wrap(Logger::default())
            .app_data(post_service.clone())
            .configure(routes)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, not_found)
                    .default_handler(handle_error),
            )
            .service(default)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
