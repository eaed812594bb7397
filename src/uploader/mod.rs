pub mod cloudinary;
pub mod image_host;
