pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod response;
pub mod state;
pub mod upload;
pub mod validation;

pub use db::create_pool;
