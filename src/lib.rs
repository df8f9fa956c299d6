pub mod auth;
pub mod config;
pub mod error;
pub mod links;
pub mod pipeline;
pub mod store;
pub mod table;
