pub mod core;
pub mod error;
pub mod server;
pub mod static_files;
pub mod types;
