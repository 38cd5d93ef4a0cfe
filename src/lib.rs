pub mod auth;
pub mod config;
pub mod db;
pub mod disputes;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod page;
pub mod routes;
pub mod store;
pub mod table;
