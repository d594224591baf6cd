pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod users;
