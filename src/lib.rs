pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod output;
pub mod scoring;
pub mod state;
pub mod stderr_buffer;
pub mod tui;

pub use error::ValidationError;
