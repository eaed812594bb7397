use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy for the browser frontend. `*` opens the API to any origin.
pub fn build_cors(allowed_origin: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    match allowed_origin.trim() {
        "*" => cors.allow_any_origin(),
        origin => cors.allowed_origin(origin),
    }
}
