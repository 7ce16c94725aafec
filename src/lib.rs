pub mod classifier;
pub mod client;
pub mod config;
pub mod model;
pub mod session;
pub mod view;
