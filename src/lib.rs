pub mod cli;
pub mod config;
pub mod error;
pub mod resource;
pub mod translate;
pub mod types;
