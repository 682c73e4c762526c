pub mod aggregate;
pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod export;
pub mod model;
mod utils;

pub use api::Mode;
pub use config::Config;
pub use error::Error;
pub use error::Result;
