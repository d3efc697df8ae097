pub mod backend;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod errors;
pub mod ids;
pub mod message;
pub mod mirror;
pub mod settings;
pub mod store;
