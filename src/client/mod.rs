pub mod api;
pub mod commands;
pub mod controller;
pub mod state;
pub mod views;
