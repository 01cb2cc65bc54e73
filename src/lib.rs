pub mod cli;
pub mod config;
pub mod context;
pub mod editor;
pub mod pipeline;
pub mod storage;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
