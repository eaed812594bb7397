pub mod client;
pub mod database;
pub mod middleware;
pub mod post;
pub mod router;
pub mod uploader;
pub mod utils;
