//! different utility modules used throughout the project
/// settings file: flash duration, double click window, messages, logging
pub mod config;
/// tiny module to set up console and file logging
pub mod logger;
