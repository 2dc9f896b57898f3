pub mod config;
pub mod handlers;
pub mod provider;
pub mod proxy;
pub mod search;
pub mod server;
pub mod ui;
