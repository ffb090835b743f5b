pub mod app;
pub mod cli;
pub mod config;
pub mod export;
pub mod presentation;
pub mod utils;
