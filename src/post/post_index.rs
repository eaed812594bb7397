use super::post_controller::{create_post, delete_post, get_posts, update_post};
use crate::utils::error::CustomError;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| CustomError::ValidationError(err.to_string()).into());

    cfg.service(
        web::scope("/posts")
            .app_data(json_config)
            .route("", web::post().to(create_post))
            .route("", web::get().to(get_posts))
            .route("/{id}", web::put().to(update_post))
            .route("/{id}", web::delete().to(delete_post)),
    );
}
