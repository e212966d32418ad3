pub mod analyzer;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod kv;
pub mod logging;
pub mod session;
pub mod store;
