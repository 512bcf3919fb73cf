pub mod config;
pub mod formatters;
pub mod prompt;
pub mod session;
