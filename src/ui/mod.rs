pub mod client;
pub mod controller;
pub mod render;
pub mod terminal;

pub use client::{ClientError, ProxyClient};
pub use controller::{Phase, SearchController, Tab};
