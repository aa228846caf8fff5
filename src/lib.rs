// basic-api - HTTP router bootstrap over axum, tower-http and sqlx
// Author: kelexine (https://github.com/kelexine)

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod utils;
