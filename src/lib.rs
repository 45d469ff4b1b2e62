pub mod commands;
pub mod configuration;
